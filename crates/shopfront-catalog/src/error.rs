//! # Catalog Error Types
//!
//! Error types for loading the product catalog.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Payload             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Request        │  │  Decode                 │ │
//! │  │  InvalidUrl     │  │  Status         │  │  InvalidProduct         │ │
//! │  │                 │  │  Timeout        │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Whatever the cause, the shopper sees one sentence:                    │
//! │  "Problems loading the product list!" (see `user_message`)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopfront_core::ValidationError;
use thiserror::Error;

/// Text shown in place of the product list when loading fails.
pub const LOAD_FAILED_MESSAGE: &str = "Problems loading the product list!";

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog error type covering all possible fetch failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid catalog configuration.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// Base URL or products path does not form a valid URL.
    #[error("Invalid products URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request could not be sent or the body could not be read.
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("Products endpoint returned HTTP {0}")]
    Status(u16),

    /// No answer within the configured timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// Body is not the expected JSON shape.
    #[error("Failed to decode product list: {0}")]
    Decode(String),

    /// A product in the list breaks a catalog rule.
    #[error("Product #{index} is invalid: {source}")]
    InvalidProduct {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

impl CatalogError {
    /// The sentence the storefront shows instead of the product list.
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }

    /// Whether trying again later might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            CatalogError::Request(_) | CatalogError::Timeout(_) => true,
            CatalogError::Status(code) => *code >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Decode(e.to_string())
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(e: url::ParseError) -> Self {
        CatalogError::InvalidUrl(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CatalogError::Status(503).to_string(),
            "Products endpoint returned HTTP 503"
        );

        let err = CatalogError::InvalidProduct {
            index: 2,
            source: ValidationError::Required {
                field: "title".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Product #2 is invalid: title is required");
    }

    #[test]
    fn test_user_message_is_uniform() {
        assert_eq!(CatalogError::Timeout(10).user_message(), LOAD_FAILED_MESSAGE);
        assert_eq!(
            CatalogError::Decode("eof".to_string()).user_message(),
            LOAD_FAILED_MESSAGE
        );
    }

    #[test]
    fn test_transient_classification() {
        assert!(CatalogError::Timeout(10).is_transient());
        assert!(CatalogError::Status(502).is_transient());
        assert!(!CatalogError::Status(404).is_transient());
        assert!(!CatalogError::Decode("x".to_string()).is_transient());
    }
}
