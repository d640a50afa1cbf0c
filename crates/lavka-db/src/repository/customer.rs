//! # Customer Repository
//!
//! Read access to the customer table. The running purchase statistic on
//! each customer is maintained by the transaction engine, never here.

use sqlx::SqlitePool;

use crate::error::DbResult;
use lavka_core::Customer;

const SELECT_CUSTOMER: &str =
    "SELECT id, name, phone, email, discount, total_purchases, created_at FROM customers";

/// Repository for customer reads.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer =
            sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMER} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(customer)
    }

    /// Lists all customers in storage (id) order.
    pub async fn list_all(&self) -> DbResult<Vec<Customer>> {
        let customers =
            sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMER} ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(customers)
    }

    /// Counts customers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
