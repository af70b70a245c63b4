//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Shell / UI                   Command Function                          │
//! │  ──────────                   ────────────────                          │
//! │                                                                         │
//! │  add 42 ─────────────────►  Result<CartResponse, ApiError>              │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │              Unknown product? ─── CoreError::ProductNotFound ──┐        │
//! │                                    │                           │        │
//! │              Bad input?  ───────── ValidationError ────────────┤        │
//! │                                    │                           ▼        │
//! │              Not loaded? ───────── LoadState ─────────────► ApiError    │
//! │                                                                │        │
//! │  ◄─────────────────────────────────────────────────────────────┘        │
//! │  { "code": "NOT_FOUND", "message": "Product not found: 42" }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations themselves never fail. Errors only come from product
//! lookup, input validation and a product list that is not loaded. The
//! fetch error behind a failed load is logged by the loader; commands only
//! see the shopper-facing message it leaves in the load state.

use serde::Serialize;
use shopfront_core::{CoreError, ValidationError};

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product id not in the loaded catalog
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Product list could not be loaded
    CatalogError,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Terminal I/O failures in the shell.
impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {}", err);
        ApiError::new(ErrorCode::Internal, "Input/output failed")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_from_core() {
        let err = ApiError::from(CoreError::ProductNotFound("42".to_string()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 42");
    }

    #[test]
    fn test_validation_from_core() {
        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "id".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_io_error_is_internal() {
        let err = ApiError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe"));
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.to_string(), "[Internal] Input/output failed");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&ApiError::not_found("Product", "7")).unwrap();
        assert_eq!(json, r#"{"code":"NOT_FOUND","message":"Product not found: 7"}"#);
    }
}
