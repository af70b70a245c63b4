//! # Catalog Loader
//!
//! Drives one product-list load and publishes its progress.
//!
//! ## Load States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Idle ──load()──► Loading ──ok──►  Loaded(Catalog)                     │
//! │                       │                                                 │
//! │                       └──err──►  Failed("Problems loading the           │
//! │                                          product list!")                │
//! │                                                                         │
//! │   load() may be called again from Loaded or Failed; each call goes      │
//! │   back through Loading.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart does not depend on any of this. A failed load leaves an already
//! populated cart untouched.

use serde::Serialize;
use shopfront_core::validation::validate_search_term;
use shopfront_core::{Catalog, CoreError, CoreResult, Product, ProductId};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::error::CatalogResult;
use crate::source::ProductSource;

/// Progress of the product-list load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Products available.
    Loaded(Catalog),
    /// Load failed; carries the message shown to the shopper.
    Failed(String),
}

impl LoadState {
    /// The loaded catalog, if any.
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            LoadState::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }

    /// The failure message, if the last load failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Loads products from a [`ProductSource`] and answers catalog queries.
pub struct CatalogLoader<S> {
    source: S,
    state: watch::Sender<LoadState>,
}

impl<S: ProductSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        CatalogLoader { source, state }
    }

    /// Fetches the product list, moving through `Loading` to `Loaded` or
    /// `Failed`.
    ///
    /// The detailed error is returned to the caller for logging; subscribers
    /// only see the shopper-facing message.
    pub async fn load(&self) -> CatalogResult<usize> {
        info!(source = %self.source.describe(), "Loading product list");
        self.state.send_replace(LoadState::Loading);

        match self.source.fetch_products().await {
            Ok(products) => {
                let count = products.len();
                self.state.send_replace(LoadState::Loaded(Catalog::new(products)));
                info!(count, "Product list loaded");
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, transient = e.is_transient(), "Product list load failed");
                self.state
                    .send_replace(LoadState::Failed(e.user_message().to_string()));
                Err(e)
            }
        }
    }

    /// Current load state.
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Runs `f` against the current load state without cloning the catalog.
    ///
    /// The state is locked for the duration of `f`; do not call back into
    /// the loader from inside it.
    pub fn with_state<R>(&self, f: impl FnOnce(&LoadState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Receiver that wakes on every load-state change.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// The loaded catalog, if the last load succeeded.
    pub fn catalog(&self) -> Option<Catalog> {
        self.state.borrow().catalog().cloned()
    }

    /// Products whose title contains `term`, case-insensitively.
    ///
    /// Empty before a successful load.
    pub fn search(&self, term: &str) -> CoreResult<Vec<Product>> {
        let term = validate_search_term(term)?;
        let state = self.state.borrow();
        let results = match state.catalog() {
            Some(catalog) => catalog.search(&term).into_iter().cloned().collect(),
            None => Vec::new(),
        };
        debug!(term = %term, matches = results.len(), "Catalog search");
        Ok(results)
    }

    /// Looks up one product of the loaded catalog.
    ///
    /// Before a successful load every id is [`CoreError::ProductNotFound`].
    pub fn product(&self, id: &ProductId) -> CoreResult<Product> {
        match self.state.borrow().catalog() {
            Some(catalog) => catalog.require(id).cloned(),
            None => Err(CoreError::ProductNotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CatalogError, LOAD_FAILED_MESSAGE};
    use crate::source::StaticProductSource;
    use shopfront_core::Money;

    fn products() -> Vec<Product> {
        vec![
            Product::new("1", "Pretty watch", Money::from_cents(2233)),
            Product::new("2", "My loved watch", Money::from_cents(4590)),
            Product::new("3", "Leather bag", Money::from_cents(8900)),
        ]
    }

    #[tokio::test]
    async fn test_initial_state_is_idle() {
        let loader = CatalogLoader::new(StaticProductSource::new(products()));
        assert_eq!(loader.state(), LoadState::Idle);
        assert!(loader.catalog().is_none());
        assert!(loader.search("").unwrap().is_empty());
        assert!(loader.product(&ProductId::new("1")).is_err());
    }

    #[tokio::test]
    async fn test_successful_load() {
        let loader = CatalogLoader::new(StaticProductSource::new(products()));
        assert_eq!(loader.load().await.unwrap(), 3);

        let state = loader.state();
        assert_eq!(state.catalog().map(Catalog::len), Some(3));
        assert!(state.error_message().is_none());
    }

    #[tokio::test]
    async fn test_failed_load_shows_message() {
        let loader = CatalogLoader::new(StaticProductSource::failing("503"));
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Request(_)));

        assert_eq!(loader.state(), LoadState::Failed(LOAD_FAILED_MESSAGE.to_string()));
        assert!(loader.catalog().is_none());
        assert!(loader.search("watch").unwrap().is_empty());
        assert_eq!(
            loader.with_state(|state| state.error_message().map(str::to_string)),
            Some(LOAD_FAILED_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_subscriber_sees_transitions() {
        let loader = CatalogLoader::new(StaticProductSource::new(products()));
        let mut rx = loader.subscribe();
        assert_eq!(*rx.borrow_and_update(), LoadState::Idle);

        loader.load().await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert!(matches!(*rx.borrow_and_update(), LoadState::Loaded(_)));
    }

    #[tokio::test]
    async fn test_search_and_lookup() {
        let loader = CatalogLoader::new(StaticProductSource::new(products()));
        loader.load().await.unwrap();

        let titles: Vec<String> = loader
            .search("  WATCH ")
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Pretty watch", "My loved watch"]);

        assert_eq!(loader.search("").unwrap().len(), 3);
        assert!(loader.search("Pretty wrist").unwrap().is_empty());

        assert_eq!(loader.product(&ProductId::new("3")).unwrap().title, "Leather bag");
        assert!(matches!(
            loader.product(&ProductId::new("42")),
            Err(CoreError::ProductNotFound(id)) if id == "42"
        ));
    }

    #[tokio::test]
    async fn test_overlong_search_term_rejected() {
        let loader = CatalogLoader::new(StaticProductSource::new(products()));
        loader.load().await.unwrap();
        let term = "w".repeat(shopfront_core::MAX_SEARCH_TERM_LEN + 1);
        assert!(loader.search(&term).is_err());
    }

    #[test]
    fn test_load_state_serialization() {
        let failed = LoadState::Failed(LOAD_FAILED_MESSAGE.to_string());
        let json = serde_json::to_string(&failed).unwrap();
        assert_eq!(
            json,
            r#"{"status":"failed","detail":"Problems loading the product list!"}"#
        );
        assert_eq!(
            serde_json::to_string(&LoadState::Loading).unwrap(),
            r#"{"status":"loading"}"#
        );
    }
}
