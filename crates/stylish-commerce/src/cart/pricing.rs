//! Order totals.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Flat delivery fee charged on any non-empty order.
pub const FLAT_FREIGHT: Money = Money::new(30);

/// Pricing breakdown for a checkout.
///
/// Invariants: `total = subtotal + freight`; `freight` is [`FLAT_FREIGHT`]
/// when `subtotal > 0` and zero otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line prices times quantities.
    pub subtotal: Money,
    /// Delivery fee.
    pub freight: Money,
    /// Amount charged.
    pub total: Money,
}

impl OrderTotals {
    /// Derive freight and total from a subtotal.
    ///
    /// Returns `None` if the total would overflow.
    pub fn from_subtotal(subtotal: Money) -> Option<Self> {
        let freight = freight_for(subtotal);
        let total = subtotal.checked_add(freight)?;
        Some(Self {
            subtotal,
            freight,
            total,
        })
    }
}

/// Flat-rate freight rule. No weight or distance calculation.
pub fn freight_for(subtotal: Money) -> Money {
    if subtotal.is_zero() {
        Money::zero()
    } else {
        FLAT_FREIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freight_rule() {
        assert_eq!(freight_for(Money::zero()), Money::zero());
        assert_eq!(freight_for(Money::new(1)), FLAT_FREIGHT);
        assert_eq!(freight_for(Money::new(99_999)), FLAT_FREIGHT);
    }

    #[test]
    fn test_totals_invariant() {
        for subtotal in [0, 1, 29, 30, 1300, 1_000_000] {
            let totals = OrderTotals::from_subtotal(Money::new(subtotal)).unwrap();
            assert_eq!(totals.total.amount(), totals.subtotal.amount() + totals.freight.amount());
            assert_eq!(totals.freight.is_zero(), subtotal == 0);
        }
    }

    #[test]
    fn test_totals_overflow() {
        assert!(OrderTotals::from_subtotal(Money::new(u64::MAX)).is_none());
    }
}
