//! # Wire Payload
//!
//! JSON shape of `GET /api/products` and its conversion into validated
//! [`Product`]s.
//!
//! ## Body Format
//! ```json
//! {
//!   "products": [
//!     { "id": "1", "title": "Wrist Watch", "price": "22.33", "image": "https://..." },
//!     { "id": 2,   "title": "Leather Bag", "price": 15 }
//!   ]
//! }
//! ```
//!
//! Ids may be strings or numbers, prices decimal strings or numbers. Prices
//! are parsed from their textual form, never through a float.

use serde::Deserialize;
use shopfront_core::{Money, Product, ProductId, ValidationError};

use crate::error::{CatalogError, CatalogResult};

/// Top-level body of the products endpoint.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<ProductPayload>,
}

/// A product id as the API sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(u64),
    Text(String),
}

impl From<WireId> for ProductId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Number(n) => ProductId::from(n),
            WireId::Text(s) => ProductId::from(s),
        }
    }
}

/// A price as the API sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WirePrice {
    Number(serde_json::Number),
    Text(String),
}

impl WirePrice {
    fn to_money(&self) -> Result<Money, ValidationError> {
        match self {
            WirePrice::Number(n) => n.to_string().parse(),
            WirePrice::Text(s) => s.parse(),
        }
    }
}

/// One product entry of the body.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    pub id: WireId,
    pub title: String,
    pub price: WirePrice,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProductPayload {
    /// Converts to a domain product and checks it against the catalog rules.
    pub fn into_product(self) -> Result<Product, ValidationError> {
        let price = self.price.to_money()?;
        let mut product = Product::new(self.id, self.title.trim(), price);
        if let Some(image) = self.image {
            product = product.with_image(image);
        }
        if let Some(description) = self.description {
            product = product.with_description(description);
        }
        product.validate()?;
        Ok(product)
    }
}

/// Decodes a products body into validated products, keeping their order.
///
/// The whole list is rejected if any entry is invalid, so the storefront
/// never shows a partial catalog.
pub fn decode_products(body: &[u8]) -> CatalogResult<Vec<Product>> {
    let response: ProductsResponse = serde_json::from_slice(body)?;
    into_products(response)
}

/// Validates an already-deserialized body.
pub fn into_products(response: ProductsResponse) -> CatalogResult<Vec<Product>> {
    response
        .products
        .into_iter()
        .enumerate()
        .map(|(index, payload)| {
            payload
                .into_product()
                .map_err(|source| CatalogError::InvalidProduct { index, source })
        })
        .collect()
}
