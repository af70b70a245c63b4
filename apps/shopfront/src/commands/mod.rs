//! # Commands Module
//!
//! Every action a storefront component can take.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Product list, search, "add to cart" on a card
//! └── cart.rs     ◄─── Cart overlay and line-item buttons
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Shell line "add 2"                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn add_to_cart(                                                        │
//! │      cart: &CartManager,       ◄── session state, passed in            │
//! │      catalog: &CatalogState,   ◄── session state, passed in            │
//! │      product_id: &str,         ◄── from the shell line                 │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Serializable response (camelCase JSON for a UI, text for the shell)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command declares only the state it needs.

pub mod cart;
pub mod product;
