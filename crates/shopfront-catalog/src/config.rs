//! # Catalog Configuration
//!
//! Where the product list lives and how long to wait for it.
//!
//! ## Configuration File Format
//! ```toml
//! # shopfront.toml
//! [catalog]
//! base_url = "http://localhost:3000"
//! products_path = "/api/products"
//! timeout_secs = 10
//! offline = false
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Settings for fetching the product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Scheme, host and port of the storefront API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the products endpoint.
    #[serde(default = "default_products_path")]
    pub products_path: String,

    /// Request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Serve the built-in demo catalog instead of calling the API.
    #[serde(default)]
    pub offline: bool,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_products_path() -> String {
    "/api/products".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            base_url: default_base_url(),
            products_path: default_products_path(),
            timeout_secs: default_timeout(),
            offline: false,
        }
    }
}

impl CatalogConfig {
    /// Absolute URL of the products endpoint.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_catalog::CatalogConfig;
    ///
    /// let config = CatalogConfig::default();
    /// assert_eq!(config.endpoint().unwrap().as_str(), "http://localhost:3000/api/products");
    /// ```
    pub fn endpoint(&self) -> CatalogResult<Url> {
        let base = Url::parse(&self.base_url)?;
        if base.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(format!(
                "'{}' cannot be used as a base URL",
                self.base_url
            )));
        }
        Ok(base.join(&self.products_path)?)
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks the settings before the first request.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.timeout_secs == 0 {
            return Err(CatalogError::InvalidConfig(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        if !self.offline {
            let endpoint = self.endpoint()?;
            if !matches!(endpoint.scheme(), "http" | "https") {
                return Err(CatalogError::InvalidUrl(format!(
                    "unsupported scheme '{}'",
                    endpoint.scheme()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.products_path, "/api/products");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(!config.offline);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_joins_path() {
        let config = CatalogConfig {
            base_url: "https://shop.example.com/".to_string(),
            products_path: "api/products".to_string(),
            ..CatalogConfig::default()
        };
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://shop.example.com/api/products"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = CatalogConfig {
            base_url: "not a url".to_string(),
            ..CatalogConfig::default()
        };
        assert!(matches!(config.validate(), Err(CatalogError::InvalidUrl(_))));
    }

    #[test]
    fn test_unsupported_scheme() {
        let config = CatalogConfig {
            base_url: "ftp://shop.example.com".to_string(),
            ..CatalogConfig::default()
        };
        assert!(matches!(config.validate(), Err(CatalogError::InvalidUrl(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = CatalogConfig {
            timeout_secs: 0,
            ..CatalogConfig::default()
        };
        assert!(matches!(config.validate(), Err(CatalogError::InvalidConfig(_))));
    }

    #[test]
    fn test_offline_skips_url_checks() {
        let config = CatalogConfig {
            base_url: "not a url".to_string(),
            offline: true,
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CatalogConfig =
            serde_json::from_str(r#"{"base_url": "http://api:8080"}"#).unwrap();
        assert_eq!(config.base_url, "http://api:8080");
        assert_eq!(config.products_path, "/api/products");
        assert_eq!(config.timeout_secs, 10);
    }
}
