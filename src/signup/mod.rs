//! Onboarding wizard for new private label resellers.

pub mod progress;
pub mod steps;
pub mod typing;
pub mod validation;

mod wizard;
pub use self::wizard::{
    Advance, DASHBOARD_PATH, HEADING, Phase, SUBHEADING, TRANSITION_DURATION, Wizard, WizardError,
    WizardEvent,
};

pub use self::progress::{FileHandle, ProgressEntry, UploadValue};
pub use self::steps::{STEPS, WizardStep};
