//! # Cart Commands
//!
//! Commands behind the cart overlay and its line-item rows.
//!
//! ## Overlay
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart overlay                                  [toggle]  [close ✕]     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Pretty watch        $22.33      [-]  2  [+]   [remove]                │
//! │  Leather bag         $89.00      [-]  1  [+]   [remove]                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                 [clear cart]           │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//!   toggle ──► toggle_cart        [-] ──► decrease_quantity
//!   ✕      ──► close_cart         [+] ──► increase_quantity
//!   clear  ──► clear_cart         remove ──► remove_from_cart
//! ```
//!
//! With no entries the overlay shows "Cart is empty" and no clear button.
//! Every command returns the cart as it is after the action.

use serde::Serialize;
use shopfront_core::validation::validate_product_id;
use shopfront_core::{CartEntry, CartState, ProductId};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CartManager;

/// Text the overlay shows when there are no entries.
pub const EMPTY_CART_MESSAGE: &str = "Cart is empty";

/// One line-item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product_id: String,
    pub title: String,
    pub image: String,
    /// Formatted unit price, e.g. `$22.33`.
    pub price: String,
    pub quantity: u32,
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        CartItemView {
            product_id: entry.product.id.to_string(),
            title: entry.product.title.clone(),
            image: entry.product.image.clone(),
            price: entry.product.price.to_string(),
            quantity: entry.quantity,
        }
    }
}

/// Cart overlay contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub is_open: bool,
    pub items: Vec<CartItemView>,
    /// Badge count: sum of all quantities.
    pub total_items: u64,
    pub show_clear_button: bool,
    /// Set only when there are no entries.
    pub empty_message: Option<String>,
}

impl From<&CartState> for CartResponse {
    fn from(state: &CartState) -> Self {
        let is_empty = state.is_empty();
        CartResponse {
            is_open: state.is_open(),
            items: state.entries.iter().map(CartItemView::from).collect(),
            total_items: state.total_items(),
            show_clear_button: !is_empty,
            empty_message: is_empty.then(|| EMPTY_CART_MESSAGE.to_string()),
        }
    }
}

fn respond(cart: &CartManager) -> CartResponse {
    cart.with_state(|state| CartResponse::from(state))
}

/// Parses a product id typed by the shopper.
pub(crate) fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    let raw = raw.trim();
    validate_product_id(raw)?;
    Ok(ProductId::new(raw))
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartManager) -> CartResponse {
    debug!("get_cart command");
    respond(cart)
}

/// Flips the overlay between open and closed.
pub fn toggle_cart(cart: &CartManager) -> CartResponse {
    let visibility = cart.toggle();
    debug!(?visibility, "toggle_cart command");
    respond(cart)
}

/// Opens the overlay.
pub fn open_cart(cart: &CartManager) -> CartResponse {
    debug!("open_cart command");
    cart.open();
    respond(cart)
}

/// Closes the overlay.
pub fn close_cart(cart: &CartManager) -> CartResponse {
    debug!("close_cart command");
    cart.close();
    respond(cart)
}

/// Removes every entry. The overlay stays as it was.
pub fn clear_cart(cart: &CartManager) -> CartResponse {
    debug!("clear_cart command");
    cart.clear_products();
    respond(cart)
}

/// `+` on a line item. Unknown ids are ignored.
pub fn increase_quantity(cart: &CartManager, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "increase_quantity command");
    let id = parse_product_id(product_id)?;
    cart.increase_quantity(&id);
    Ok(respond(cart))
}

/// `-` on a line item. Stops at zero and keeps the row.
pub fn decrease_quantity(cart: &CartManager, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "decrease_quantity command");
    let id = parse_product_id(product_id)?;
    cart.decrease_quantity(&id);
    Ok(respond(cart))
}

/// Remove button on a line item. Unknown ids are ignored.
pub fn remove_from_cart(cart: &CartManager, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");
    let id = parse_product_id(product_id)?;
    cart.remove_product(&id);
    Ok(respond(cart))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use shopfront_core::{Money, Product};

    fn cart_with_watch() -> CartManager {
        let cart = CartManager::new();
        cart.add_product(&Product::new("1", "Pretty watch", Money::from_cents(2233)));
        cart
    }

    #[test]
    fn test_empty_cart_response() {
        let response = get_cart(&CartManager::new());
        assert!(!response.is_open);
        assert!(response.items.is_empty());
        assert_eq!(response.total_items, 0);
        assert!(!response.show_clear_button);
        assert_eq!(response.empty_message.as_deref(), Some(EMPTY_CART_MESSAGE));
    }

    #[test]
    fn test_line_item_view() {
        let response = get_cart(&cart_with_watch());
        assert!(response.show_clear_button);
        assert!(response.empty_message.is_none());
        assert_eq!(
            response.items,
            vec![CartItemView {
                product_id: "1".to_string(),
                title: "Pretty watch".to_string(),
                image: String::new(),
                price: "$22.33".to_string(),
                quantity: 1,
            }]
        );
    }

    #[test]
    fn test_visibility_commands() {
        let cart = CartManager::new();
        assert!(open_cart(&cart).is_open);
        assert!(open_cart(&cart).is_open);
        assert!(!toggle_cart(&cart).is_open);
        assert!(toggle_cart(&cart).is_open);
        assert!(!close_cart(&cart).is_open);
    }

    #[test]
    fn test_quantity_buttons() {
        let cart = cart_with_watch();
        assert_eq!(increase_quantity(&cart, "1").unwrap().total_items, 2);
        decrease_quantity(&cart, "1").unwrap();
        let response = decrease_quantity(&cart, "1").unwrap();
        assert_eq!(response.items[0].quantity, 0);

        let response = decrease_quantity(&cart, "1").unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 0);
    }

    #[test]
    fn test_remove_and_unknown_ids() {
        let cart = cart_with_watch();
        assert_eq!(remove_from_cart(&cart, "99").unwrap().items.len(), 1);
        assert_eq!(increase_quantity(&cart, "99").unwrap().total_items, 1);
        assert!(remove_from_cart(&cart, " 1 ").unwrap().items.is_empty());
    }

    #[test]
    fn test_blank_id_rejected() {
        let err = remove_from_cart(&cart_with_watch(), "   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_clear_keeps_visibility() {
        let cart = cart_with_watch();
        open_cart(&cart);
        let response = clear_cart(&cart);
        assert!(response.is_open);
        assert!(response.items.is_empty());
        assert!(!response.show_clear_button);
    }

    #[test]
    fn test_response_serialization() {
        let json = serde_json::to_value(get_cart(&cart_with_watch())).unwrap();
        assert_eq!(json["isOpen"], false);
        assert_eq!(json["totalItems"], 1);
        assert_eq!(json["showClearButton"], true);
        assert_eq!(json["items"][0]["productId"], "1");
        assert!(json["emptyMessage"].is_null());
    }
}
