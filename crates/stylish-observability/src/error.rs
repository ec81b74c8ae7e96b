//! Observability error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObservabilityError {
    /// Unrecognised log level name.
    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    /// Unrecognised log format name.
    #[error("invalid log format: {0}")]
    InvalidFormat(String),

    /// A global subscriber was already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}
