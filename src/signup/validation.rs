//! Field validators for the signup wizard.

use crate::profile::Platform;
use regex::Regex;

pub const BRAND_NAME_MAX_CHARS: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Brand name must be 13 characters or fewer.")]
    BrandNameTooLong,
    #[error("Handle must start with '@'.")]
    MissingAt,
    #[error("Invalid social platform.")]
    UnknownPlatform,
    /// Carries the platform exactly as it was passed in.
    #[error("Invalid {0} handle format.")]
    HandleFormat(String),
}

/// Brand names are shown in app stores and tray icons, so they stay short.
///
/// # Errors
/// Returns [`ValidationError::BrandNameTooLong`] past 13 characters.
pub fn validate_brand_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() > BRAND_NAME_MAX_CHARS {
        return Err(ValidationError::BrandNameTooLong);
    }
    Ok(())
}

const fn handle_pattern(platform: Platform) -> &'static str {
    match platform {
        Platform::Instagram => r"^[A-Za-z0-9_.]{1,30}$",
        Platform::TikTok => r"^[A-Za-z0-9_.]{2,24}$",
        Platform::Twitter => r"^[A-Za-z0-9_]{1,15}$",
    }
}

/// Validate an `@handle` for `platform` (`instagram`, `tiktok` or `twitter`, any case).
///
/// # Errors
/// The `@` prefix is checked first, then the platform, then the handle format.
pub fn validate_social_handle(handle: &str, platform: &str) -> Result<(), ValidationError> {
    let Some(actual) = handle.strip_prefix('@') else {
        return Err(ValidationError::MissingAt);
    };

    let parsed = platform
        .parse::<Platform>()
        .map_err(|_| ValidationError::UnknownPlatform)?;
    let pattern = handle_pattern(parsed);

    if Regex::new(pattern).is_ok_and(|re| re.is_match(actual)) {
        Ok(())
    } else {
        Err(ValidationError::HandleFormat(platform.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_name_limit_is_inclusive() {
        assert_eq!(validate_brand_name(""), Ok(()));
        assert_eq!(validate_brand_name("MyVPNBrand123"), Ok(()));
        assert_eq!(
            validate_brand_name("MyVPNBrand1234"),
            Err(ValidationError::BrandNameTooLong)
        );
        assert_eq!(
            ValidationError::BrandNameTooLong.to_string(),
            "Brand name must be 13 characters or fewer."
        );
    }

    #[test]
    fn brand_name_counts_characters_not_bytes() {
        // 13 characters, 26 bytes
        assert_eq!(validate_brand_name("ééééééééééééé"), Ok(()));
        assert!(validate_brand_name("éééééééééééééé").is_err());
    }

    #[test]
    fn missing_at_wins_for_any_platform() {
        for platform in ["instagram", "tiktok", "twitter", "myspace", ""] {
            assert_eq!(
                validate_social_handle("cicada", platform),
                Err(ValidationError::MissingAt)
            );
        }
        assert_eq!(
            ValidationError::MissingAt.to_string(),
            "Handle must start with '@'."
        );
    }

    #[test]
    fn unknown_platform_is_distinct() {
        let err = validate_social_handle("@cicada", "myspace");
        assert_eq!(err, Err(ValidationError::UnknownPlatform));
        assert_eq!(
            ValidationError::UnknownPlatform.to_string(),
            "Invalid social platform."
        );
    }

    #[test]
    fn valid_handles_pass() {
        assert_eq!(validate_social_handle("@cicada.vpn", "instagram"), Ok(()));
        assert_eq!(validate_social_handle("@cicada_vpn", "TikTok"), Ok(()));
        assert_eq!(validate_social_handle("@jack", "Twitter"), Ok(()));
        assert_eq!(validate_social_handle(&format!("@{}", "a".repeat(30)), "instagram"), Ok(()));
    }

    #[test]
    fn instagram_handle_too_long() {
        // 31 characters after the '@'
        let handle = "@waytoolongusername1234567890abc";
        assert_eq!(handle.len(), 32);
        let err = validate_social_handle(handle, "instagram");
        assert_eq!(
            err.map_err(|e| e.to_string()),
            Err("Invalid instagram handle format.".to_string())
        );
    }

    #[test]
    fn platform_specific_rules() {
        // tiktok needs at least two characters
        assert!(validate_social_handle("@a", "tiktok").is_err());
        assert_eq!(validate_social_handle("@a", "instagram"), Ok(()));
        // twitter has no periods and caps at 15
        assert!(validate_social_handle("@cicada.vpn", "twitter").is_err());
        assert!(validate_social_handle("@abcdefghijklmnop", "twitter").is_err());
        // the bare prefix never matches
        assert_eq!(
            validate_social_handle("@", "Twitter"),
            Err(ValidationError::HandleFormat("Twitter".to_string()))
        );
    }
}
