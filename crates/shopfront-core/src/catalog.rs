//! # Catalog
//!
//! The in-memory product list the storefront shows, independent of the cart.
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  term = ""           → every product, in catalog order                 │
//! │  term = "watch"      → titles containing "watch", any letter case      │
//! │  term = "  Watch  "  → trimmed first, same as "watch"                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, ProductId};

/// Ordered product list as returned by the product API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wraps a product list, keeping its order.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// All products in order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products whose title contains `term`, case-insensitively.
    ///
    /// The term is trimmed; an empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.products.iter().collect();
        }

        self.products
            .iter()
            .filter(|p| p.title_contains_lowercase(&term))
            .collect()
    }

    /// Product with the given id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Product with the given id, or [`CoreError::ProductNotFound`].
    pub fn require(&self, id: &ProductId) -> CoreResult<&Product> {
        self.get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Catalog::new(products)
    }
}

/// Product count as the product list header shows it.
///
/// ## Example
/// ```rust
/// use shopfront_core::catalog::count_label;
///
/// assert_eq!(count_label(0), "0 Products");
/// assert_eq!(count_label(1), "1 Product");
/// assert_eq!(count_label(10), "10 Products");
/// ```
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 Product".to_string()
    } else {
        format!("{} Products", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new("1", "Wrist Watch", Money::from_cents(1000)),
            Product::new("2", "My loved watch", Money::from_cents(2000)),
            Product::new("3", "Leather Bag", Money::from_cents(3000)),
            Product::new("4", "My other WATCH", Money::from_cents(4000)),
        ])
    }

    fn titles(products: Vec<&Product>) -> Vec<&str> {
        products.into_iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_empty_term_returns_everything_in_order() {
        let catalog = catalog();
        assert_eq!(catalog.search("").len(), 4);
        assert_eq!(catalog.search("   ").len(), 4);
        assert_eq!(catalog.search("")[0].title, "Wrist Watch");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = catalog();
        assert_eq!(
            titles(catalog.search("watch")),
            vec!["Wrist Watch", "My loved watch", "My other WATCH"]
        );
        assert_eq!(titles(catalog.search("MY ")), vec!["My loved watch", "My other WATCH"]);
        assert_eq!(titles(catalog.search("  bag ")), vec!["Leather Bag"]);
    }

    #[test]
    fn test_search_without_match() {
        assert!(catalog().search("Pretty wrist").is_empty());
    }

    #[test]
    fn test_get_and_require() {
        let catalog = catalog();
        assert_eq!(catalog.get(&ProductId::new("3")).unwrap().title, "Leather Bag");
        assert!(catalog.get(&ProductId::new("9")).is_none());
        assert!(matches!(
            catalog.require(&ProductId::new("9")),
            Err(CoreError::ProductNotFound(id)) if id == "9"
        ));
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(0), "0 Products");
        assert_eq!(count_label(1), "1 Product");
        assert_eq!(count_label(2), "2 Products");
    }
}
