//! # Product Repository
//!
//! Read access to the product table.
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    How Product Search Works                         │
//! │                                                                     │
//! │  User types: "кни"                                                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Case-insensitive substring match against:                          │
//! │    • product name                                                   │
//! │    • category display text ("Книги", not the key "BOOKS")           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Results keep storage (id) order - stable across calls              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The category match runs over the display mapping in Rust rather than in
//! SQL; the database only ever sees stable category keys.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use lavka_core::validation::validate_search_query;
use lavka_core::{Product, ValidationError};

const SELECT_PRODUCT: &str =
    "SELECT id, name, category, price, quantity, min_stock, barcode, description, created_at \
     FROM products";

/// Repository for product reads.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let all = repo.list_all().await?;
/// let hits = repo.search("кни").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by its barcode.
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        let product =
            sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE barcode = ?1"))
                .bind(barcode)
                .fetch_optional(&self.pool)
                .await?;

        Ok(product)
    }

    /// Lists all products in storage (id) order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Searches products by name or category display text.
    ///
    /// ## Rules
    /// - Case-insensitive substring match
    /// - Matches the localized category name, not the storage key
    /// - An empty query returns all products
    /// - Results keep storage (id) order
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, SearchError> {
        let query = validate_search_query(query)?;
        let needle = query.to_lowercase();

        debug!(query = %needle, "Searching products");

        let products = self.list_all().await?;
        if needle.is_empty() {
            return Ok(products);
        }

        let hits: Vec<Product> = products
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.category.display_name().to_lowercase().contains(&needle)
            })
            .collect();

        debug!(count = hits.len(), "Search returned products");
        Ok(hits)
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Search can fail on the query itself or in storage.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] crate::error::DbError),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NewProduct;
    use crate::pool::{Database, DbConfig};
    use lavka_core::Money;

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let engine = db.engine();
        for (name, category) in [
            ("Ноутбук Lenovo", "Электроника"),
            ("Роман-эпопея", "Книги"),
            ("Кофе зерновой", "Продукты"),
        ] {
            engine
                .create_product(NewProduct::new(name, category, Money::from_minor(1000), 5, 1))
                .await
                .unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_search_by_name_is_case_insensitive() {
        let db = seeded_db().await;

        let hits = db.products().search("ноутбук").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ноутбук Lenovo");

        let hits = db.products().search("LENOVO").await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_search_matches_category_display_text() {
        let db = seeded_db().await;

        // "книги" matches the Books display name, not any product name
        let hits = db.products().search("КНИГИ").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Роман-эпопея");

        // The storage key is not part of the searched text
        let hits = db.products().search("BOOKS").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_query_returns_all_in_storage_order() {
        let db = seeded_db().await;

        let hits = db.products().search("").await.unwrap();
        assert_eq!(hits.len(), 3);
        assert!(hits.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_search_rejects_overlong_query() {
        let db = seeded_db().await;

        let err = db.products().search(&"я".repeat(200)).await.unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_by_barcode() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .engine()
            .create_product(
                NewProduct::new("Кофе", "Продукты", Money::from_minor(1000), 5, 1)
                    .barcode("4600000000017"),
            )
            .await
            .unwrap();

        let found = db.products().get_by_barcode("4600000000017").await.unwrap();
        assert_eq!(found.map(|p| p.id), Some(product.id));

        let missing = db.products().get_by_barcode("0000000000000").await.unwrap();
        assert!(missing.is_none());
    }
}
