//! # Product Sources
//!
//! Where a catalog comes from.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ProductSource                                 │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────────┐    │
//! │  │  HttpProductSource       │      │  StaticProductSource         │    │
//! │  │                          │      │                              │    │
//! │  │  GET {base}/api/products │      │  fixed list (offline mode)   │    │
//! │  │  one attempt, timeout    │      │  or a scripted failure       │    │
//! │  └──────────────────────────┘      └──────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sources do not retry. A failed load is reported once and the storefront
//! shows the load-failure message.

use std::future::Future;
use std::time::Duration;

use shopfront_core::{Money, Product};
use tracing::{debug, error, info};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::payload::decode_products;

/// Anything that can produce the product list.
pub trait ProductSource: Send + Sync {
    /// Fetches every product, in display order.
    fn fetch_products(&self) -> impl Future<Output = CatalogResult<Vec<Product>>> + Send;

    /// Short label for logs.
    fn describe(&self) -> String;
}

// =============================================================================
// HTTP Source
// =============================================================================

/// Fetches products from the storefront API with a single GET.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpProductSource {
    /// Builds a source from validated settings.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CatalogError::InvalidConfig(e.to_string()))?;

        Ok(HttpProductSource {
            client,
            endpoint: config.endpoint()?,
            timeout: config.timeout(),
        })
    }

    /// URL this source requests.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn map_transport_error(&self, e: reqwest::Error) -> CatalogError {
        if e.is_timeout() {
            CatalogError::Timeout(self.timeout.as_secs())
        } else {
            CatalogError::Request(e.to_string())
        }
    }
}

impl ProductSource for HttpProductSource {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        debug!(url = %self.endpoint, "Requesting product list");

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            error!(url = %self.endpoint, status = status.as_u16(), "Product list request rejected");
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let products = decode_products(&body)?;
        info!(count = products.len(), "Product list fetched");
        Ok(products)
    }

    fn describe(&self) -> String {
        format!("http {}", self.endpoint)
    }
}

// =============================================================================
// Static Source
// =============================================================================

/// Serves a fixed product list, or fails on every fetch.
#[derive(Debug, Clone)]
pub struct StaticProductSource {
    outcome: Result<Vec<Product>, String>,
}

impl StaticProductSource {
    /// Serves `products` on every fetch.
    pub fn new(products: Vec<Product>) -> Self {
        StaticProductSource {
            outcome: Ok(products),
        }
    }

    /// Fails every fetch with a request error carrying `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        StaticProductSource {
            outcome: Err(reason.into()),
        }
    }

    /// Small built-in catalog used when the storefront runs offline.
    pub fn demo() -> Self {
        let image = |n: u32| format!("https://picsum.photos/seed/shopfront-{}/400/400", n);

        StaticProductSource::new(vec![
            Product::new(1u64, "Pretty watch", Money::from_cents(2233)).with_image(image(1)),
            Product::new(2u64, "My loved watch", Money::from_cents(4590)).with_image(image(2)),
            Product::new(3u64, "My other watch", Money::from_cents(3100)).with_image(image(3)),
            Product::new(4u64, "Pretty wrist band", Money::from_cents(1299)).with_image(image(4)),
            Product::new(5u64, "Leather bag", Money::from_cents(8900))
                .with_image(image(5))
                .with_description("Hand-stitched, fits a laptop"),
            Product::new(6u64, "Canvas backpack", Money::from_cents(5450)).with_image(image(6)),
        ])
    }
}

impl ProductSource for StaticProductSource {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        match &self.outcome {
            Ok(products) => Ok(products.clone()),
            Err(reason) => Err(CatalogError::Request(reason.clone())),
        }
    }

    fn describe(&self) -> String {
        match &self.outcome {
            Ok(products) => format!("static ({} products)", products.len()),
            Err(_) => "static (failing)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpProductSource {
        let config = CatalogConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            ..CatalogConfig::default()
        };
        HttpProductSource::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_static_source_serves_products() {
        let source = StaticProductSource::new(vec![Product::new(
            "1",
            "Watch",
            Money::from_cents(100),
        )]);

        let products = source.fetch_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(source.describe(), "static (1 products)");
    }

    #[tokio::test]
    async fn test_failing_source() {
        let source = StaticProductSource::failing("connection refused");
        let err = source.fetch_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Request(ref r) if r == "connection refused"));
    }

    #[tokio::test]
    async fn test_demo_catalog_is_valid() {
        let products = StaticProductSource::demo().fetch_products().await.unwrap();
        assert!(!products.is_empty());
        for product in &products {
            assert!(product.validate().is_ok(), "{} should be valid", product.title);
        }
    }

    #[test]
    fn test_http_source_rejects_bad_config() {
        let config = CatalogConfig {
            base_url: "ftp://shop.example.com".to_string(),
            ..CatalogConfig::default()
        };
        assert!(HttpProductSource::new(&config).is_err());
    }

    #[test]
    fn test_http_source_endpoint() {
        let source = HttpProductSource::new(&CatalogConfig::default()).unwrap();
        assert_eq!(source.endpoint().as_str(), "http://localhost:3000/api/products");
        assert!(source.describe().starts_with("http "));
    }

    #[tokio::test]
    async fn test_http_source_unreachable_host() {
        let config = CatalogConfig {
            // Port 9 (discard) on loopback is closed in test environments.
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..CatalogConfig::default()
        };
        let source = HttpProductSource::new(&config).unwrap();
        let err = source.fetch_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Request(_) | CatalogError::Timeout(_)));
        assert_eq!(err.user_message(), crate::LOAD_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_http_source_fetches_product_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [
                    {"id": 2, "title": "My loved watch", "price": "45.90"},
                    {"id": "1", "title": "Pretty watch", "price": 22.33, "image": "/img/1.png"},
                    {"id": 3, "title": "Leather bag", "price": "89"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let products = source_for(&server).fetch_products().await.unwrap();

        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
        assert_eq!(products[0].price, Money::from_cents(4590));
        assert_eq!(products[1].price, Money::from_cents(2233));
        assert_eq!(products[1].image, "/img/1.png");
        assert_eq!(products[2].price, Money::from_cents(8900));

        server.verify().await;
    }

    #[tokio::test]
    async fn test_http_source_server_error_is_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Status(500)));
        assert!(err.is_transient());
        assert_eq!(err.user_message(), crate::LOAD_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_http_source_client_error_is_not_transient() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Status(404)));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_http_source_html_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string("<html><body>Down for maintenance</body></html>"),
            )
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
        assert!(!err.is_transient());
    }
}
