//! # Supplies Log Repository
//!
//! Read access to the append-only supplies log. Same rules as the sales
//! log: rows are immutable and may outlive the product they reference.

use sqlx::SqlitePool;

use crate::error::DbResult;
use lavka_core::Supply;

const SELECT_SUPPLY: &str =
    "SELECT id, supplier, product_id, quantity, cost, created_at FROM supplies";

/// Repository for supplies-log reads.
#[derive(Debug, Clone)]
pub struct SupplyRepository {
    pool: SqlitePool,
}

impl SupplyRepository {
    /// Creates a new SupplyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplyRepository { pool }
    }

    /// Gets a supply record by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Supply>> {
        let supply = sqlx::query_as::<_, Supply>(&format!("{SELECT_SUPPLY} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(supply)
    }

    /// Lists the whole supplies log, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<Supply>> {
        let supplies = sqlx::query_as::<_, Supply>(&format!("{SELECT_SUPPLY} ORDER BY id DESC"))
            .fetch_all(&self.pool)
            .await?;

        Ok(supplies)
    }

    /// Counts supplies (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM supplies")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
