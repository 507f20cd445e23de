//! Credential checks run before anything is sent to the hosted backend.

use regex::Regex;

/// Basic email format check, case-insensitive.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .is_ok_and(|regex| regex.is_match(&email.to_lowercase()))
}

/// At least 6 characters from letters, digits and `@$!%*?#&`.
pub fn valid_password(password: &str) -> bool {
    Regex::new(r"^[A-Za-z\d@$!%*?#&]{6,}$").is_ok_and(|regex| regex.is_match(password))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    SignUp,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFormError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error(
        "Password must be at least 8 characters long and include uppercase letters, lowercase letters, numbers, and special characters."
    )]
    WeakPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("You must agree to the Terms and Privacy Policy.")]
    TermsNotAccepted,
}

/// The email/password form on the auth screen.
#[derive(Debug, Clone)]
pub struct CredentialsForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepted_terms: bool,
}

impl CredentialsForm {
    #[must_use]
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::Login,
            email: email.into(),
            password: password.into(),
            confirm_password: String::new(),
            accepted_terms: false,
        }
    }

    #[must_use]
    pub fn sign_up(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
        accepted_terms: bool,
    ) -> Self {
        Self {
            mode: AuthMode::SignUp,
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            accepted_terms,
        }
    }

    /// # Errors
    /// Returns the first problem found, in the order the form shows them.
    pub fn validate(&self) -> Result<(), AuthFormError> {
        if !valid_email(&self.email) {
            return Err(AuthFormError::InvalidEmail);
        }
        if !valid_password(&self.password) {
            return Err(AuthFormError::WeakPassword);
        }
        if self.mode == AuthMode::SignUp {
            if self.password != self.confirm_password {
                return Err(AuthFormError::PasswordMismatch);
            }
            if !self.accepted_terms {
                return Err(AuthFormError::TermsNotAccepted);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("david@cicadavpn.com"));
        assert!(valid_email("Name.Surname@Example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-domain@"));
        assert!(!valid_email("two words@example.com"));
    }

    #[test]
    fn password_rules() {
        assert!(valid_password("abc123"));
        assert!(valid_password("S3cure!#"));
        assert!(!valid_password("short"));
        assert!(!valid_password("has space1"));
    }

    #[test]
    fn login_skips_sign_up_checks() {
        let form = CredentialsForm::login("david@cicadavpn.com", "hunter22");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn sign_up_checks_in_order() {
        let form = CredentialsForm::sign_up("bad", "x", "y", false);
        assert_eq!(form.validate(), Err(AuthFormError::InvalidEmail));

        let form = CredentialsForm::sign_up("a@b.co", "x", "y", false);
        assert_eq!(form.validate(), Err(AuthFormError::WeakPassword));

        let form = CredentialsForm::sign_up("a@b.co", "hunter22", "hunter23", false);
        assert_eq!(form.validate(), Err(AuthFormError::PasswordMismatch));
        assert_eq!(
            AuthFormError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );

        let form = CredentialsForm::sign_up("a@b.co", "hunter22", "hunter22", false);
        assert_eq!(form.validate(), Err(AuthFormError::TermsNotAccepted));

        let form = CredentialsForm::sign_up("a@b.co", "hunter22", "hunter22", true);
        assert_eq!(form.validate(), Ok(()));
    }
}
