//! # shopfront-core: Pure Cart Logic for Shopfront
//!
//! This crate is the **heart** of Shopfront. It owns the shopping-cart state
//! machine that every storefront component reads from and writes to.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │  Product Card ──► Cart Overlay ──► Cart Line Item ──► Search    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / subscriptions               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopfront-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │CartManager│  │  search   │  │   │
//! │  │   │ ProductId │  │           │  │ CartState │  │  labels   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO PERSISTENCE                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              shopfront-catalog (Product fetch layer)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductId)
//! - [`money`] - Money type with integer minor units
//! - [`cart`] - CartManager, CartState snapshots, CartEvent notifications
//! - [`catalog`] - In-memory product catalog and title search
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{CartManager, Money, Product};
//!
//! let cart = CartManager::new();
//! let watch = Product::new("1", "Wrist Watch", Money::from_cents(2233));
//!
//! // What the product card does on "add to cart"
//! cart.open();
//! cart.add_product(&watch);
//!
//! assert!(cart.is_open());
//! assert_eq!(cart.total_items(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartEntry, CartEvent, CartManager, CartState, Visibility};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{Product, ProductId};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a search term, in characters.
pub const MAX_SEARCH_TERM_LEN: usize = 100;

/// Maximum length of a product title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a product identifier.
pub const MAX_PRODUCT_ID_LEN: usize = 64;

/// Buffered cart events per subscriber before the slowest one starts lagging.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
