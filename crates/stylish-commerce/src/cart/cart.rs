//! Cart and cart line types.

use crate::cart::OrderTotals;
use crate::catalog::{ColorVariant, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// A shopping cart: an ordered sequence of lines.
///
/// Serializes as a bare JSON array, the shape persisted under `cartItems`
/// and sent as the order's `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from existing lines.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Add a line to the cart.
    ///
    /// A line for the same product, color and size is merged by summing
    /// quantities. Returns the index of the affected line.
    pub fn add_item(&mut self, item: CartItem) -> Result<usize, CommerceError> {
        if item.quantity == 0 {
            return Err(CommerceError::InvalidQuantity(0));
        }

        if let Some(index) = self.items.iter().position(|i| i.same_variant(&item)) {
            let existing = &mut self.items[index];
            let new_quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            return Ok(index);
        }

        if item.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                item.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero removes the line entirely.
    pub fn update_quantity(&mut self, index: usize, quantity: u32) -> Result<(), CommerceError> {
        if quantity == 0 {
            return self.remove_item(index).map(|_| ());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = self
            .items
            .get_mut(index)
            .ok_or(CommerceError::LineNotFound(index))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Remove a line, returning it.
    pub fn remove_item(&mut self, index: usize) -> Result<CartItem, CommerceError> {
        if index >= self.items.len() {
            return Err(CommerceError::LineNotFound(index));
        }
        Ok(self.items.remove(index))
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Take the quantities of an ordered snapshot out of the cart.
    ///
    /// Lines added since the snapshot stay, and so do units added to an
    /// ordered line. A line whose quantity reaches zero is removed.
    pub fn remove_ordered(&mut self, ordered: &Cart) {
        for line in &ordered.items {
            if let Some(index) = self.items.iter().position(|i| i.same_variant(line)) {
                let remaining = self.items[index].quantity.saturating_sub(line.quantity);
                if remaining == 0 {
                    self.items.remove(index);
                } else {
                    self.items[index].quantity = remaining;
                }
            }
        }
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of price times quantity over all lines.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let line_totals = self
            .items
            .iter()
            .map(CartItem::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(line_totals.iter()).ok_or(CommerceError::Overflow)
    }

    /// Subtotal, freight and total for this cart.
    pub fn totals(&self) -> Result<OrderTotals, CommerceError> {
        OrderTotals::from_subtotal(self.subtotal()?).ok_or(CommerceError::Overflow)
    }
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product being purchased.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product title (denormalized for display).
    #[serde(default)]
    pub name: String,
    /// Unit price at the time the line was added.
    pub price: Money,
    /// Selected color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorVariant>,
    /// Selected size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Quantity; always positive.
    #[serde(rename = "qty")]
    pub quantity: u32,
    /// Thumbnail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    /// Create a new cart line.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            price,
            color: None,
            size: None,
            quantity,
            image: None,
        }
    }

    /// Create a line from a catalog product.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            image: product.listing_image().map(String::from),
            ..Self::new(product.id.clone(), product.title.clone(), product.price, quantity)
        }
    }

    /// Set the color.
    pub fn with_color(mut self, color: ColorVariant) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the size.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.price
            .checked_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    fn same_variant(&self, other: &CartItem) -> bool {
        self.product_id == other.product_id
            && self.color.as_ref().map(|c| &c.code) == other.color.as_ref().map(|c| &c.code)
            && self.size == other.size
    }
}
