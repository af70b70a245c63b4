//! # State Module
//!
//! Session state handed to every command.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┬──────────────────┐                        │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐           │
//! │  │ CartManager  │  │  CatalogState    │  │   ConfigState    │           │
//! │  │              │  │                  │  │                  │           │
//! │  │  watch +     │  │  CatalogLoader   │  │  store_name      │           │
//! │  │  broadcast   │  │  <StoreSource>   │  │  catalog         │           │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘           │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartManager: cloneable handle, mutations serialized by watch        │
//! │  • CatalogState: load state behind a watch channel                     │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is exactly one of each per session. Commands take them by
//! reference rather than reaching for a global.

mod catalog;
mod config;

pub use catalog::{CatalogState, StoreSource};
pub use config::{ConfigError, ConfigState, CONFIG_PATH_VAR};
pub use shopfront_core::CartManager;
