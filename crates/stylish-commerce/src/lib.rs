//! Storefront domain types for the STYLiSH client.
//!
//! This crate is pure and synchronous. It provides:
//!
//! - **Catalog**: Products, color variants, promotional campaigns
//! - **Search**: Query context and cursor-based page results
//! - **Cart**: Cart lines and order totals (flat-rate freight)
//! - **Checkout**: Recipient form, delivery slots, order payloads
//! - **Account**: Session tokens and member profiles
//!
//! # Example
//!
//! ```rust
//! use stylish_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add_item(CartItem::new(ProductId::new("201807201824"), "Dress", Money::new(500), 2))
//!     .unwrap();
//! cart.add_item(CartItem::new(ProductId::new("201807242222"), "Shirt", Money::new(300), 1))
//!     .unwrap();
//!
//! let totals = cart.totals().unwrap();
//! assert_eq!(totals.subtotal, Money::new(1300));
//! assert_eq!(totals.freight, Money::new(30));
//! assert_eq!(totals.total, Money::new(1330));
//! ```

pub mod account;
pub mod error;
pub mod ids;
pub mod money;
pub mod validate;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Account
    pub use crate::account::{Profile, SessionToken};

    // Catalog
    pub use crate::catalog::{Campaign, ColorVariant, Product};

    // Search
    pub use crate::search::{Cursor, ProductPage, QueryContext, DEFAULT_CATEGORY};

    // Cart
    pub use crate::cart::{Cart, CartItem, OrderTotals, FLAT_FREIGHT};

    // Checkout
    pub use crate::checkout::{
        CheckoutPayload, DeliverySlot, Order, OrderConfirmation, PaymentMethod, Recipient,
        RecipientField, ShippingMethod,
    };
}
