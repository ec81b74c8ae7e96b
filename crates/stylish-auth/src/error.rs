//! Authentication errors.

use crate::FormField;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No token was stored and acquiring one failed.
    #[error("could not start a session: {0}")]
    Bootstrap(String),

    /// The API refused the credentials or request.
    #[error("{0}")]
    Rejected(String),

    /// A required form field is empty.
    #[error("{0} is required")]
    MissingField(FormField),

    /// A form field has the wrong format.
    #[error("please enter a valid {0}")]
    InvalidField(FormField),

    /// The token could not be persisted.
    #[error("storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::Bootstrap(_) | AuthError::Rejected(_))
    }

    /// Check if this is a local form validation failure.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, AuthError::MissingField(_) | AuthError::InvalidField(_))
    }
}
