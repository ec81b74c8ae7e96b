//! Client error types.

use stylish_cache::CacheError;
use stylish_commerce::prelude::{CommerceError, RecipientField};
use stylish_data::FetchError;
use thiserror::Error;

/// Errors from application-state mutations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The cart rejected the change.
    #[error(transparent)]
    Cart(#[from] CommerceError),

    /// The change could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] CacheError),
}

/// Errors from the pagination controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PagerError {
    /// The page fetch failed. The controller stays usable.
    #[error("could not load products: {0}")]
    Fetch(#[from] FetchError),
}

/// Why a checkout attempt stopped.
///
/// Variants follow the order of the checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Another checkout is still running.
    #[error("a checkout is already in progress")]
    AlreadyInProgress,

    /// No session token could be obtained.
    #[error("please sign in again: {0}")]
    Authentication(String),

    /// The session token could not be saved.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("your cart is empty")]
    EmptyCart,

    #[error("please fill in the {0}")]
    MissingRecipientField(RecipientField),

    #[error("please check the format of the {0}")]
    InvalidRecipientField(RecipientField),

    /// Card fields are incomplete or invalid.
    #[error("payment data is invalid, please check your card details")]
    PaymentNotReady,

    /// The payment provider refused to tokenize the card.
    #[error("payment data is invalid (status {status})")]
    PaymentRejected { status: i32 },

    /// Order totals could not be computed.
    #[error("could not price the order: {0}")]
    Pricing(#[from] CommerceError),

    /// The order API failed. The cart is unchanged and may be resubmitted.
    #[error("order submission failed: {0}")]
    Submission(String),
}

impl CheckoutError {
    /// Whether the failure was detected locally, before any network call.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CheckoutError::EmptyCart
                | CheckoutError::MissingRecipientField(_)
                | CheckoutError::InvalidRecipientField(_)
                | CheckoutError::PaymentNotReady
        )
    }
}
