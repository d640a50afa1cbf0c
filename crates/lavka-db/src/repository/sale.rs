//! # Sales Log Repository
//!
//! Read access to the append-only sales log.
//!
//! Sales are never edited or deleted. Rows may reference a product that has
//! since been removed; consumers that resolve product details must handle a
//! missing lookup (the report layer substitutes a placeholder label).

use sqlx::SqlitePool;

use crate::error::DbResult;
use lavka_core::Sale;

const SELECT_SALE: &str =
    "SELECT id, product_id, customer_id, quantity, unit_price, total, created_at FROM sales";

/// Repository for sales-log reads.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets a sale by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!("{SELECT_SALE} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Lists the whole sales log, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!("{SELECT_SALE} ORDER BY id DESC"))
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Counts sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
