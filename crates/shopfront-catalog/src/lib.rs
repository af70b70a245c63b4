//! # Shopfront Catalog
//!
//! Loads the product list for the storefront.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CatalogConfig ──► HttpProductSource ──GET /api/products──► API         │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                  payload::decode_products  (ids, prices, validation)    │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                  CatalogLoader ──watch──► LoadState subscribers         │
//! │                                                                         │
//! │  Offline mode swaps HttpProductSource for StaticProductSource::demo().  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use shopfront_catalog::{CatalogConfig, CatalogLoader, HttpProductSource};
//!
//! # async fn demo() -> shopfront_catalog::CatalogResult<()> {
//! let source = HttpProductSource::new(&CatalogConfig::default())?;
//! let loader = CatalogLoader::new(source);
//! loader.load().await?;
//! let watches = loader.search("watch").unwrap_or_default();
//! println!("{} watches", watches.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod payload;
pub mod source;

pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult, LOAD_FAILED_MESSAGE};
pub use loader::{CatalogLoader, LoadState};
pub use source::{HttpProductSource, ProductSource, StaticProductSource};
