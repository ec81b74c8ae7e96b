//! Cursor-based page results.

use crate::catalog::Product;
use crate::ids::string_or_number;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque server-assigned pagination position.
///
/// Passed back verbatim to fetch the next page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor(#[serde(deserialize_with = "string_or_number")] String);

impl Cursor {
    /// Wire value for "first page".
    pub const INITIAL: &'static str = "0";

    /// Create a cursor from its wire value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Cursor of the first page.
    pub fn initial() -> Self {
        Self::new(Self::INITIAL)
    }

    /// Get the wire value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products in server order.
    #[serde(rename = "data", default)]
    pub items: Vec<Product>,
    /// Cursor of the next page; `None` when no further pages exist.
    #[serde(rename = "next_paging", default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<Cursor>,
}

impl ProductPage {
    /// Create a page.
    pub fn new(items: Vec<Product>, next_cursor: Option<Cursor>) -> Self {
        Self { items, next_cursor }
    }

    /// Whether this is the last page.
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}
