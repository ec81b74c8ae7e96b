//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Cart line not found.
    #[error("Cart line not found: {0}")]
    LineNotFound(usize),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u32, u32),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in price calculation")]
    Overflow,

    /// Unknown delivery slot.
    #[error("Unknown delivery slot: {0}")]
    UnknownDeliverySlot(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
