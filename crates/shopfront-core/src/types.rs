//! # Domain Types
//!
//! Product types shared by the cart and the catalog.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product API ──► Catalog (owns Vec<Product>) ──► Product Card           │
//! │                                                        │                │
//! │                                                  add_product(&p)        │
//! │                                                        ▼                │
//! │                              CartManager ──► CartEntry { product, qty } │
//! │                                                                         │
//! │  A Product is an immutable value. The cart keeps its own copy and       │
//! │  identifies it by `id` only.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{
    validate_price, validate_product_id, validate_product_title, ValidationResult,
};

// =============================================================================
// Product Id
// =============================================================================

/// Identifier of a product, as issued by the product API.
///
/// The API may send numeric ids; they are kept in their decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId(s.to_string())
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        ProductId(s)
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        ProductId(n.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product offered by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Identifier issued by the product API.
    pub id: ProductId,

    /// Display title, also the field searched by the product list.
    pub title: String,

    /// Unit price.
    pub price: Money,

    /// Image URL; empty when the API sends none.
    #[serde(default)]
    pub image: String,

    /// Optional long description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    /// Creates a product with no image or description.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            title: title.into(),
            price,
            image: String::new(),
            description: None,
        }
    }

    /// Sets the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks the product against the catalog rules.
    ///
    /// ## Rules
    /// - `id` is non-empty and at most 64 characters
    /// - `title` is non-empty and at most 200 characters
    /// - `price` is not negative
    pub fn validate(&self) -> ValidationResult<()> {
        validate_product_id(self.id.as_str())?;
        validate_product_title(&self.title)?;
        validate_price(self.price)?;
        Ok(())
    }

    /// Case-insensitive substring match of `term` against the title.
    ///
    /// `term` must already be lowercase; see [`crate::catalog::Catalog::search`].
    pub(crate) fn title_contains_lowercase(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_from_number() {
        let id = ProductId::from(7u64);
        assert_eq!(id.as_str(), "7");
        assert_eq!(id, ProductId::new("7"));
    }

    #[test]
    fn test_product_builder() {
        let p = Product::new("1", "Pretty watch", Money::from_cents(2233))
            .with_image("https://img/1.png")
            .with_description("Shiny");

        assert_eq!(p.id.as_str(), "1");
        assert_eq!(p.image, "https://img/1.png");
        assert_eq!(p.description.as_deref(), Some("Shiny"));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_product_validation_failures() {
        let untitled = Product::new("1", "   ", Money::from_cents(100));
        assert!(untitled.validate().is_err());

        let no_id = Product::new("", "Watch", Money::from_cents(100));
        assert!(no_id.validate().is_err());

        let negative = Product::new("1", "Watch", Money::from_cents(-1));
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let p = Product::new("1", "Watch", Money::from_cents(100));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["title"], "Watch");
        assert_eq!(json["price"], 100);
    }
}
