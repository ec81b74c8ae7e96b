//! Order submission types.

use crate::cart::{Cart, CartItem, OrderTotals};
use crate::checkout::Recipient;
use crate::error::CommerceError;
use crate::ids::OrderNumber;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How the order is shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Home delivery.
    #[default]
    Delivery,
}

/// How the order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Tokenized credit card.
    #[default]
    CreditCard,
}

/// An order, built fresh for each checkout attempt.
///
/// Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    shipping: ShippingMethod,
    payment: PaymentMethod,
    subtotal: Money,
    freight: Money,
    total: Money,
    recipient: Recipient,
    #[serde(rename = "list")]
    items: Vec<CartItem>,
}

impl Order {
    /// Snapshot a cart and recipient into an order.
    pub fn new(cart: &Cart, recipient: Recipient) -> Result<Self, CommerceError> {
        let totals = cart.totals()?;
        Ok(Self {
            shipping: ShippingMethod::Delivery,
            payment: PaymentMethod::CreditCard,
            subtotal: totals.subtotal,
            freight: totals.freight,
            total: totals.total,
            recipient,
            items: cart.items().to_vec(),
        })
    }

    pub fn shipping(&self) -> ShippingMethod {
        self.shipping
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            subtotal: self.subtotal,
            freight: self.freight,
            total: self.total,
        }
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}

/// Body of an order submission: payment proof plus order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    /// One-time payment proof ("prime") from the payment SDK.
    #[serde(rename = "prime")]
    pub payment_proof: String,
    /// The order.
    pub order: Order,
}

/// Result of a successful order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Number assigned by the order API.
    #[serde(rename = "number")]
    pub order_number: OrderNumber,
}
