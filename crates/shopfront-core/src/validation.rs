//! # Validation Module
//!
//! Input validation for products arriving from the product API and for
//! search terms typed by the shopper.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Wire payload (shopfront-catalog)                             │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Product ids, titles, prices                                       │
//! │  └── Search terms                                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: CartManager                                                  │
//! │  └── Accepts any Product; unknown ids are no-ops                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::{validate_product_title, validate_search_term};
//!
//! validate_product_title("Wrist Watch").unwrap();
//!
//! // Search terms are trimmed; an empty term means "show everything"
//! assert_eq!(validate_search_term("  watch ").unwrap(), "watch");
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_PRODUCT_ID_LEN, MAX_SEARCH_TERM_LEN, MAX_TITLE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.chars().count() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_product_title;
///
/// assert!(validate_product_title("Relógio bonito").is_ok());
/// assert!(validate_product_title("").is_err());
/// ```
pub fn validate_product_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a search term.
///
/// ## Rules
/// - Can be empty (the product list shows every product)
/// - At most 100 characters
///
/// ## Returns
/// The trimmed term.
pub fn validate_search_term(term: &str) -> ValidationResult<String> {
    let term = term.trim();

    if term.chars().count() > MAX_SEARCH_TERM_LEN {
        return Err(ValidationError::TooLong {
            field: "term".to_string(),
            max: MAX_SEARCH_TERM_LEN,
        });
    }

    Ok(term.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (zero is a free item)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("1").is_ok());
        assert!(validate_product_id("abc-123").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("  ").is_err());
        assert!(validate_product_id(&"9".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_product_title() {
        assert!(validate_product_title("Pretty watch").is_ok());
        assert!(validate_product_title("").is_err());
        assert!(validate_product_title(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_search_term() {
        assert_eq!(validate_search_term("").unwrap(), "");
        assert_eq!(validate_search_term(" Pretty wrist ").unwrap(), "Pretty wrist");
        assert!(matches!(
            validate_search_term(&"x".repeat(101)),
            Err(ValidationError::TooLong { max: 100, .. })
        ));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(2233)).is_ok());
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(-100)).is_err());
    }
}
