//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A color variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorVariant {
    /// Hex color code without the leading `#` (e.g., "FFFFFF").
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl ColorVariant {
    /// Create a new color variant.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// CSS color string (e.g., "#FFFFFF").
    pub fn css(&self) -> String {
        format!("#{}", self.code)
    }
}

/// A product in the catalog. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price.
    pub price: Money,
    /// Available colors, in display order.
    #[serde(rename = "colors", default)]
    pub color_variants: Vec<ColorVariant>,
    /// Listing image.
    #[serde(default)]
    pub main_image: Option<String>,
    /// Additional images.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Create a new product.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            color_variants: Vec::new(),
            main_image: None,
            images: Vec::new(),
        }
    }

    /// Add a color variant.
    pub fn with_color(mut self, color: ColorVariant) -> Self {
        self.color_variants.push(color);
        self
    }

    /// Image to show in listings: the main image, else the first image.
    pub fn listing_image(&self) -> Option<&str> {
        self.main_image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_api_json() {
        let json = r##"{
            "id": 201807201824,
            "category": "women",
            "title": "前開衩扭結洋裝",
            "price": 799,
            "colors": [{"code": "FFFFFF", "name": "白色"}, {"code": "DDFFBB", "name": "亮綠"}],
            "sizes": ["S", "M"],
            "main_image": "https://cdn/main.jpg",
            "images": ["https://cdn/0.jpg"]
        }"##;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "201807201824");
        assert_eq!(product.price, Money::new(799));
        assert_eq!(product.color_variants.len(), 2);
        assert_eq!(product.color_variants[0].css(), "#FFFFFF");
        assert_eq!(product.listing_image(), Some("https://cdn/main.jpg"));
    }

    #[test]
    fn test_listing_image_falls_back() {
        let mut product = Product::new("1", "Tee", Money::new(100));
        assert_eq!(product.listing_image(), None);
        product.images.push("https://cdn/a.jpg".to_string());
        assert_eq!(product.listing_image(), Some("https://cdn/a.jpg"));
    }
}
