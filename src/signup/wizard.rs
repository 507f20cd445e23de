//! Signup wizard controller.
//!
//! Progresses linearly: Typing1 → Typing2 → Active(0..n) → Completed →
//! Transitioning. Every transition happens inside `&mut self` calls, and all
//! timers are elapsed-time inputs to [`Wizard::tick`], so nothing fires after
//! the wizard is dropped.

use crate::signup::{
    progress::{FileHandle, NO_INPUT_PROVIDED, ProgressEntry, UploadValue},
    steps::{InputRule, InputStep, STEPS, WizardStep},
    typing::TypingEffect,
    validation::{validate_brand_name, validate_social_handle},
};
use std::{collections::BTreeMap, time::Duration};
use tracing::debug;

pub const HEADING: &str = "Let’s get your deets";
pub const SUBHEADING: &str = "Launch your own VPN brand in under a minute.";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const TRANSITION_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Heading line is typing.
    Typing1,
    /// Second line is typing.
    Typing2,
    /// Waiting for the answer to `steps[i]`.
    Active(usize),
    Completed,
    Transitioning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// Typing finished; the first step is live.
    Started,
    /// The transition finished; go to this path.
    Navigate(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Now on this step.
    Step(usize),
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("wizard is not accepting input in phase {0:?}")]
    NotAccepting(Phase),
    #[error("{message}")]
    Invalid { step: usize, message: String },
}

#[derive(Debug)]
pub struct Wizard {
    steps: &'static [WizardStep],
    phase: Phase,
    heading: TypingEffect,
    subheading: TypingEffect,
    pending_input: String,
    pending_file: Option<FileHandle>,
    errors: BTreeMap<usize, String>,
    progress: Vec<ProgressEntry>,
    transition_elapsed: Duration,
    navigated: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self::with_steps(&STEPS, HEADING, SUBHEADING)
    }

    #[must_use]
    pub fn with_steps(
        steps: &'static [WizardStep],
        heading: impl Into<String>,
        subheading: impl Into<String>,
    ) -> Self {
        Self {
            steps,
            phase: Phase::Typing1,
            heading: TypingEffect::new(heading),
            subheading: TypingEffect::new(subheading),
            pending_input: String::new(),
            pending_file: None,
            errors: BTreeMap::new(),
            progress: Vec::with_capacity(steps.len()),
            transition_elapsed: Duration::ZERO,
            navigated: false,
        }
    }

    /// Drive the typing and transition timers.
    pub fn tick(&mut self, elapsed: Duration) -> Option<WizardEvent> {
        match self.phase {
            Phase::Typing1 => {
                let rest = self.heading.advance(elapsed)?;
                self.phase = Phase::Typing2;
                self.tick(rest)
            }
            Phase::Typing2 => {
                self.subheading.advance(elapsed)?;
                debug!("typing complete, starting step 0");
                self.phase = self.first_phase();
                Some(WizardEvent::Started)
            }
            Phase::Active(_) | Phase::Completed => None,
            Phase::Transitioning => {
                if self.navigated {
                    return None;
                }
                self.transition_elapsed = self.transition_elapsed.saturating_add(elapsed);
                if self.transition_elapsed < TRANSITION_DURATION {
                    return None;
                }
                self.navigated = true;
                debug!("transition finished, navigating to {}", DASHBOARD_PATH);
                Some(WizardEvent::Navigate(DASHBOARD_PATH))
            }
        }
    }

    const fn first_phase(&self) -> Phase {
        if self.steps.is_empty() {
            Phase::Completed
        } else {
            Phase::Active(0)
        }
    }

    /// Record what the user typed for the current step. Ignored outside `Active`.
    ///
    /// Brand names and handles are checked as they are typed. A step's error
    /// clears only once the pending value would be accepted; a blank required
    /// field keeps its "is required" message.
    pub fn set_input(&mut self, text: &str) {
        let Some((index, step)) = self.current() else {
            return;
        };
        self.pending_input = text.to_string();

        let WizardStep::Input(step) = step else {
            return;
        };

        match Self::accept_input(step, &self.pending_input) {
            Ok(_) => {
                self.errors.remove(&index);
            }
            Err(_) if self.pending_input.trim().is_empty() => {}
            Err(message) => {
                self.errors.insert(index, message);
            }
        }
    }

    /// Pick a file for the current upload step. Ignored on input steps.
    pub fn select_file(&mut self, file: FileHandle) {
        if let Some((_, WizardStep::Upload(_))) = self.current() {
            self.pending_file = Some(file);
        }
    }

    /// Submit the current step.
    ///
    /// # Errors
    /// Returns [`WizardError::NotAccepting`] outside `Active`, and
    /// [`WizardError::Invalid`] when the step's input is rejected; the error is
    /// also kept in the error map until the step becomes valid.
    pub fn submit(&mut self) -> Result<Advance, WizardError> {
        let Some((index, step)) = self.current() else {
            return Err(WizardError::NotAccepting(self.phase));
        };

        let entry = match step {
            WizardStep::Input(input) => match Self::accept_input(input, &self.pending_input) {
                Ok(entry) => entry,
                Err(message) => {
                    debug!("step {} rejected: {}", index, message);
                    self.errors.insert(index, message.clone());
                    return Err(WizardError::Invalid {
                        step: index,
                        message,
                    });
                }
            },
            WizardStep::Upload(upload) => ProgressEntry::Upload {
                label: upload.label.to_string(),
                value: self
                    .pending_file
                    .take()
                    .map_or(UploadValue::NotProvided, UploadValue::File),
            },
        };

        debug!("step {} accepted: {}", index, entry);
        self.progress.push(entry);
        self.errors.remove(&index);
        self.pending_input.clear();
        self.pending_file = None;

        let next = index + 1;
        if next < self.steps.len() {
            self.phase = Phase::Active(next);
            Ok(Advance::Step(next))
        } else {
            self.phase = Phase::Completed;
            Ok(Advance::Completed)
        }
    }

    fn accept_input(step: &InputStep, raw: &str) -> Result<ProgressEntry, String> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            if step.rule.is_required() {
                return Err(format!("{} is required.", step.label));
            }
            return Ok(ProgressEntry::Input {
                label: step.label.to_string(),
                value: NO_INPUT_PROVIDED.to_string(),
            });
        }

        let value = match step.rule {
            InputRule::BrandName => {
                validate_brand_name(trimmed).map_err(|err| err.to_string())?;
                trimmed
            }
            InputRule::SocialHandle(platform) => {
                validate_social_handle(trimmed, platform.key()).map_err(|err| err.to_string())?;
                trimmed.trim_start_matches('@')
            }
            InputRule::Required | InputRule::Optional => trimmed,
        };

        Ok(ProgressEntry::Input {
            label: step.label.to_string(),
            value: value.to_string(),
        })
    }

    /// Enter submits, except on upload steps where there is no text to send.
    pub fn key_enter(&mut self) -> Option<Result<Advance, WizardError>> {
        match self.current() {
            Some((_, WizardStep::Input(_))) => Some(self.submit()),
            Some((_, WizardStep::Upload(_))) | None => None,
        }
    }

    /// Clear the current step's pending input, file and error.
    pub fn reset_step(&mut self) {
        self.pending_input.clear();
        self.pending_file = None;
        if let Phase::Active(index) = self.phase {
            self.errors.remove(&index);
        }
    }

    /// Start over from the typing heading with nothing recorded.
    pub fn restart(&mut self) {
        debug!("restarting signup wizard");
        self.phase = Phase::Typing1;
        self.heading.restart();
        self.subheading.restart();
        self.pending_input.clear();
        self.pending_file = None;
        self.errors.clear();
        self.progress.clear();
        self.transition_elapsed = Duration::ZERO;
        self.navigated = false;
    }

    /// Whether the final continue action is enabled.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        self.phase == Phase::Completed && self.progress.len() == self.steps.len()
    }

    /// Start the transition to the dashboard.
    ///
    /// # Errors
    /// Returns [`WizardError::NotAccepting`] until every step is recorded.
    pub fn continue_to_dashboard(&mut self) -> Result<(), WizardError> {
        if !self.can_continue() {
            return Err(WizardError::NotAccepting(self.phase));
        }
        self.phase = Phase::Transitioning;
        self.transition_elapsed = Duration::ZERO;
        Ok(())
    }

    fn current(&self) -> Option<(usize, &'static WizardStep)> {
        match self.phase {
            Phase::Active(index) => self.steps.get(index).map(|step| (index, step)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&'static WizardStep> {
        self.current().map(|(_, step)| step)
    }

    #[must_use]
    pub const fn steps(&self) -> &'static [WizardStep] {
        self.steps
    }

    #[must_use]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    #[must_use]
    pub const fn pending_file(&self) -> Option<&FileHandle> {
        self.pending_file.as_ref()
    }

    #[must_use]
    pub fn error_for(&self, step: usize) -> Option<&str> {
        self.errors.get(&step).map(String::as_str)
    }

    #[must_use]
    pub const fn errors(&self) -> &BTreeMap<usize, String> {
        &self.errors
    }

    #[must_use]
    pub fn progress(&self) -> &[ProgressEntry] {
        &self.progress
    }

    /// Completed steps as a whole percentage, for the progress bar.
    #[must_use]
    pub fn progress_percentage(&self) -> u8 {
        if self.steps.is_empty() {
            return 100;
        }
        let percent = self.progress.len() * 100 / self.steps.len();
        u8::try_from(percent).unwrap_or(100)
    }

    #[must_use]
    pub fn heading_text(&self) -> &str {
        self.heading.rendered()
    }

    #[must_use]
    pub fn subheading_text(&self) -> &str {
        self.subheading.rendered()
    }
}
