//! # Product Commands
//!
//! Commands behind the product list page and the product card.
//!
//! ## Product Card Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shopper clicks "add to cart" on a card                                │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  add_to_cart(cart, catalog, "1")                                        │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Look up the product in the loaded catalog                  │    │
//! │  │  2. Open the cart overlay                                      │    │
//! │  │  3. Add the product (or bump its quantity if already there)    │    │
//! │  │  4. Return the updated cart                                    │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopfront_core::catalog::count_label;
use shopfront_core::Product;
use tracing::debug;

use crate::commands::cart::{get_cart, parse_product_id, CartResponse};
use crate::error::{ApiError, ErrorCode};
use crate::state::{CartManager, CatalogState};

/// Shown while the product list request is still in flight.
pub const STILL_LOADING_MESSAGE: &str = "Product list is still loading";

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub image: String,
    /// Formatted price, e.g. `$22.33`.
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        ProductView {
            id: product.id.to_string(),
            title: product.title.clone(),
            image: product.image.clone(),
            price: product.price.to_string(),
        }
    }
}

/// Product list page contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    /// The search term after trimming.
    pub term: String,
    pub products: Vec<ProductView>,
    /// `"0 Products"`, `"1 Product"`, `"N Products"`.
    pub count_label: String,
}

/// Lists the products whose title matches `term`.
///
/// ## Behavior
/// - Empty term: every product
/// - Otherwise: case-insensitive substring match on the title
/// - Catalog still loading or failed: `ApiError` with the load message
pub fn list_products(catalog: &CatalogState, term: &str) -> Result<ProductListResponse, ApiError> {
    debug!(term = %term, "list_products command");

    ensure_loaded(catalog)?;

    let products: Vec<ProductView> = catalog
        .search(term)?
        .iter()
        .map(ProductView::from)
        .collect();

    Ok(ProductListResponse {
        term: term.trim().to_string(),
        count_label: count_label(products.len()),
        products,
    })
}

/// "Add to cart" on a product card: opens the cart, then adds the product.
///
/// ## Errors
/// - `CATALOG_ERROR` if the product list is not loaded
/// - `NOT_FOUND` if the id is not in the loaded catalog
pub fn add_to_cart(
    cart: &CartManager,
    catalog: &CatalogState,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let id = parse_product_id(product_id)?;
    ensure_loaded(catalog)?;
    let product = catalog.product(&id)?;

    cart.open();
    cart.add_product(&product);

    Ok(get_cart(cart))
}

/// Fails with the load-state message unless the product list is loaded.
fn ensure_loaded(catalog: &CatalogState) -> Result<(), ApiError> {
    catalog.with_state(|state| {
        if state.catalog().is_some() {
            return Ok(());
        }
        let message = state.error_message().unwrap_or(STILL_LOADING_MESSAGE);
        Err(ApiError::new(ErrorCode::CatalogError, message))
    })
}
