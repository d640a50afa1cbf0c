//! # Product Categories
//!
//! The fixed category set with its bidirectional key/display mapping.
//!
//! ## Two Names Per Category
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Category Naming                                 │
//! │                                                                     │
//! │  Internal key (storage, serde)     Display name (presentation)      │
//! │  ────────────────────────────      ──────────────────────────       │
//! │  ELECTRONICS                       Электроника                      │
//! │  CLOTHING                          Одежда                           │
//! │  FOOD                              Продукты                         │
//! │  BOOKS                             Книги                            │
//! │  OTHER                             Другое                           │
//! │                                                                     │
//! │  The mapping is total and injective; parse() accepts either side    │
//! │  and rejects everything else as a ValidationError.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// =============================================================================
// Product Category
// =============================================================================

/// A product category.
///
/// Persistence stores the stable key; the presentation layer shows
/// [`ProductCategory::display_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductCategory {
    Electronics,
    Clothing,
    Food,
    Books,
    Other,
}

impl ProductCategory {
    /// All categories, in the order they are offered to the user.
    pub const ALL: [ProductCategory; 5] = [
        ProductCategory::Electronics,
        ProductCategory::Clothing,
        ProductCategory::Food,
        ProductCategory::Books,
        ProductCategory::Other,
    ];

    /// Stable internal key used in storage and serialization.
    pub const fn key(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "ELECTRONICS",
            ProductCategory::Clothing => "CLOTHING",
            ProductCategory::Food => "FOOD",
            ProductCategory::Books => "BOOKS",
            ProductCategory::Other => "OTHER",
        }
    }

    /// Localized display name shown to the user.
    pub const fn display_name(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "Электроника",
            ProductCategory::Clothing => "Одежда",
            ProductCategory::Food => "Продукты",
            ProductCategory::Books => "Книги",
            ProductCategory::Other => "Другое",
        }
    }

    /// Resolves category text supplied by a caller.
    ///
    /// Accepts either the internal key (`"ELECTRONICS"`) or the display
    /// name (`"Электроника"`). Anything else is a validation error; there
    /// is no silent default.
    ///
    /// ## Example
    /// ```rust
    /// use lavka_core::category::ProductCategory;
    ///
    /// assert_eq!(
    ///     ProductCategory::parse("BOOKS").unwrap(),
    ///     ProductCategory::Books
    /// );
    /// assert_eq!(
    ///     ProductCategory::parse("Книги").unwrap(),
    ///     ProductCategory::Books
    /// );
    /// assert!(ProductCategory::parse("Gadgets").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key() == value || c.display_name() == value)
            .ok_or_else(|| ValidationError::UnknownCategory {
                value: value.to_string(),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_key() {
        for category in ProductCategory::ALL {
            assert_eq!(ProductCategory::parse(category.key()).unwrap(), category);
        }
    }

    #[test]
    fn test_parse_by_display_name() {
        for category in ProductCategory::ALL {
            assert_eq!(
                ProductCategory::parse(category.display_name()).unwrap(),
                category
            );
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(
            ProductCategory::parse("  FOOD ").unwrap(),
            ProductCategory::Food
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(ProductCategory::parse("").is_err());
        assert!(ProductCategory::parse("Gadgets").is_err());
        assert!(ProductCategory::parse("electronics").is_err());
    }

    #[test]
    fn test_mapping_is_injective() {
        // No two categories share a key or a display name
        for a in ProductCategory::ALL {
            for b in ProductCategory::ALL {
                if a != b {
                    assert_ne!(a.key(), b.key());
                    assert_ne!(a.display_name(), b.display_name());
                }
            }
        }
    }

    #[test]
    fn test_serde_uses_stable_key() {
        let json = serde_json::to_string(&ProductCategory::Electronics).unwrap();
        assert_eq!(json, "\"ELECTRONICS\"");

        let back: ProductCategory = serde_json::from_str("\"CLOTHING\"").unwrap();
        assert_eq!(back, ProductCategory::Clothing);
    }
}
