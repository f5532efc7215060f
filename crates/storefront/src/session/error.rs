//! Session error types.

use thiserror::Error;

use wishshop_core::EmailError;

/// Malformed login or registration input.
///
/// This is the only error the state layer expects the UI to show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Email is blank.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password is shorter than the minimum length.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// Registration without a display name.
    #[error("name is required")]
    MissingName,
}

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Input failed validation; no provider call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The identity provider refused the credentials.
    #[error("sign-in rejected: {0}")]
    Rejected(String),
}

impl SessionError {
    /// User-facing message, matching the storefront's login/register copy.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Rejected(_) => "Login failed. Please check your credentials.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = ValidationError::PasswordTooShort { min: 6 };
        assert_eq!(err.to_string(), "password must be at least 6 characters");

        let err = ValidationError::InvalidEmail(EmailError::Empty);
        assert_eq!(err.to_string(), "invalid email: email cannot be empty");
    }

    #[test]
    fn test_user_message_hides_provider_detail() {
        let err = SessionError::Rejected("account locked in upstream IdP".to_string());
        assert!(!err.user_message().contains("IdP"));

        let err = SessionError::from(ValidationError::MissingName);
        assert_eq!(err.user_message(), "name is required");
    }
}
