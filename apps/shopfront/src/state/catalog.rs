//! # Catalog State
//!
//! The session's product list, fetched once at startup.
//!
//! The source is chosen from configuration: the storefront API normally,
//! the built-in demo list when `offline` is set.

use shopfront_catalog::{
    CatalogConfig, CatalogLoader, CatalogResult, HttpProductSource, ProductSource,
    StaticProductSource,
};
use shopfront_core::Product;

/// Product source selected at startup.
#[derive(Debug, Clone)]
pub enum StoreSource {
    Http(HttpProductSource),
    Static(StaticProductSource),
}

impl StoreSource {
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        if config.offline {
            Ok(StoreSource::Static(StaticProductSource::demo()))
        } else {
            Ok(StoreSource::Http(HttpProductSource::new(config)?))
        }
    }
}

impl ProductSource for StoreSource {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        match self {
            StoreSource::Http(source) => source.fetch_products().await,
            StoreSource::Static(source) => source.fetch_products().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            StoreSource::Http(source) => source.describe(),
            StoreSource::Static(source) => source.describe(),
        }
    }
}

/// Catalog loader shared by the product commands.
pub type CatalogState = CatalogLoader<StoreSource>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_uses_demo_catalog() {
        let config = CatalogConfig {
            offline: true,
            ..CatalogConfig::default()
        };
        let source = StoreSource::from_config(&config).unwrap();
        assert!(matches!(source, StoreSource::Static(_)));

        let catalog = CatalogState::new(source);
        assert!(catalog.load().await.unwrap() > 0);
    }

    #[test]
    fn test_online_uses_http() {
        let source = StoreSource::from_config(&CatalogConfig::default()).unwrap();
        assert!(matches!(source, StoreSource::Http(_)));
        assert!(source.describe().contains("/api/products"));
    }
}
