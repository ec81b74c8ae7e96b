//! Money type for representing storefront prices.
//!
//! The storefront sells in a single currency (NT dollars) with no
//! subunit, so amounts are whole non-negative integers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A non-negative amount of NT dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Create a new Money value.
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Zero amount.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the raw amount.
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Check if zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Checked multiplication by a quantity.
    pub fn checked_mul(&self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(u64::from(quantity)).map(Money)
    }

    /// Sum an iterator of amounts, returning `None` on overflow.
    pub fn try_sum<'a>(iter: impl IntoIterator<Item = &'a Money>) -> Option<Money> {
        iter.into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(*m))
    }

    /// Format for display (e.g., "NT.1330").
    pub fn display(&self) -> String {
        format!("NT.{}", self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturating add. Use `checked_add` where overflow must be reported.
    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl From<u64> for Money {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}
