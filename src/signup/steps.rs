use crate::profile::Platform;

/// How an input step treats what the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRule {
    Required,
    /// Required, and no longer than the brand name limit.
    BrandName,
    Optional,
    /// Optional; when given, must be a valid handle for the platform.
    SocialHandle(Platform),
}

impl InputRule {
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Required | Self::BrandName)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputStep {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub help_text: &'static str,
    pub rule: InputRule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadStep {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub help_text: &'static str,
}

/// One screen of the onboarding flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStep {
    Input(InputStep),
    Upload(UploadStep),
}

impl WizardStep {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Input(step) => step.label,
            Self::Upload(step) => step.label,
        }
    }

    #[must_use]
    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::Input(step) => step.placeholder,
            Self::Upload(step) => step.placeholder,
        }
    }

    #[must_use]
    pub const fn help_text(&self) -> &'static str {
        match self {
            Self::Input(step) => step.help_text,
            Self::Upload(step) => step.help_text,
        }
    }

    #[must_use]
    pub const fn is_upload(&self) -> bool {
        matches!(self, Self::Upload(_))
    }
}

const fn social(platform: Platform, placeholder: &'static str) -> WizardStep {
    WizardStep::Input(InputStep {
        label: platform.label(),
        placeholder,
        help_text: "Optional. We'll pull your follower count to size your launch.",
        rule: InputRule::SocialHandle(platform),
    })
}

/// The onboarding steps, in order.
pub static STEPS: [WizardStep; 8] = [
    WizardStep::Input(InputStep {
        label: "Brand Name",
        placeholder: "Enter your brand name",
        help_text: "This is what your customers see in the app. 13 characters max.",
        rule: InputRule::BrandName,
    }),
    WizardStep::Upload(UploadStep {
        label: "Logo",
        placeholder: "Upload your logo (optional)",
        help_text: "PNG, JPG or SVG. You can skip this and add it later.",
    }),
    WizardStep::Input(InputStep {
        label: "First Name",
        placeholder: "Enter your first name",
        help_text: "The account owner's first name.",
        rule: InputRule::Required,
    }),
    WizardStep::Input(InputStep {
        label: "Last Name",
        placeholder: "Enter your last name",
        help_text: "The account owner's last name.",
        rule: InputRule::Required,
    }),
    WizardStep::Input(InputStep {
        label: "Country",
        placeholder: "Enter your country (optional)",
        help_text: "Used to pick your default server region.",
        rule: InputRule::Optional,
    }),
    social(Platform::Instagram, "Enter your Instagram handle (optional)"),
    social(Platform::TikTok, "Enter your TikTok handle (optional)"),
    social(Platform::Twitter, "Enter your Twitter handle (optional)"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_three_required_steps() {
        let required: Vec<&str> = STEPS
            .iter()
            .filter_map(|step| match step {
                WizardStep::Input(input) if input.rule.is_required() => Some(input.label),
                _ => None,
            })
            .collect();
        assert_eq!(required, ["Brand Name", "First Name", "Last Name"]);
    }

    #[test]
    fn logo_is_the_only_upload() {
        let uploads: Vec<usize> = STEPS
            .iter()
            .enumerate()
            .filter(|(_, step)| step.is_upload())
            .map(|(index, _)| index)
            .collect();
        assert_eq!(uploads, [1]);
        assert_eq!(STEPS[1].label(), "Logo");
    }

    #[test]
    fn social_steps_use_platform_labels() {
        for platform in Platform::ALL {
            let step = STEPS.iter().find(|step| step.label() == platform.label());
            assert!(
                matches!(step, Some(WizardStep::Input(InputStep { rule: InputRule::SocialHandle(p), .. })) if *p == platform),
                "missing step for {platform}"
            );
        }
    }
}
