//! # Query / Aggregation Layer
//!
//! Pure read operations over the entity tables and the append-only logs.
//! Nothing here mutates state.
//!
//! ## Derived Views
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Aggregations                                  │
//! │                                                                     │
//! │  products ──► low_stock_products, total_inventory_value,            │
//! │              inventory_summary                                      │
//! │                                                                     │
//! │  sales ─────► sales_in_period, total_sales_amount,                  │
//! │              best_sellers, recent_sales                             │
//! │                                                                     │
//! │  supplies ──► total_supplies_cost, recent_supplies                  │
//! │                                                                     │
//! │  both logs ─► gross_profit, financial_summary                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Period filters are inclusive on both ends. Aggregations over a log that
//! references a deleted product substitute a placeholder label instead of
//! failing; history outlives the catalog.

use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use lavka_core::{Money, Period, Product, Sale, Supply};

/// Label shown for sales of a product that has since been deleted.
pub const MISSING_PRODUCT_LABEL: &str = "Неизвестно";

// =============================================================================
// View Types
// =============================================================================

/// One row of the best-sellers view.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct BestSeller {
    /// Product id as recorded in the sales log (may be dangling).
    pub product_id: i64,
    /// Current product name, or [`MISSING_PRODUCT_LABEL`] if deleted.
    pub product_name: String,
    /// Units sold across the whole log.
    pub total_quantity: i64,
    /// Amount charged across the whole log.
    pub revenue: Money,
}

/// The numbers behind an inventory report.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct InventorySummary {
    pub total_products: i64,
    pub total_value: Money,
    /// Products above zero but below their minimum-stock threshold.
    pub low_stock_count: i64,
    /// Products with zero quantity.
    pub out_of_stock_count: i64,
}

/// The numbers behind a financial report for a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub sales_total: Money,
    pub supplies_cost: Money,
    pub gross_profit: Money,
    /// Value of the inventory at the time of the query (not period-bound).
    pub inventory_value: Money,
    /// Gross margin as a percentage of sales; None when there were no sales.
    pub margin_percentage: Option<f64>,
}

// =============================================================================
// Reports
// =============================================================================

const SELECT_PRODUCT: &str =
    "SELECT id, name, category, price, quantity, min_stock, barcode, description, created_at \
     FROM products";

const SELECT_SALE: &str =
    "SELECT id, product_id, customer_id, quantity, unit_price, total, created_at FROM sales";

const SELECT_SUPPLY: &str =
    "SELECT id, supplier, product_id, quantity, cost, created_at FROM supplies";

/// The query/aggregation layer.
#[derive(Debug, Clone)]
pub struct Reports {
    pool: SqlitePool,
}

impl Reports {
    /// Creates the report layer over a pool.
    pub fn new(pool: SqlitePool) -> Self {
        Reports { pool }
    }

    // -------------------------------------------------------------------------
    // Inventory views
    // -------------------------------------------------------------------------

    /// Products whose quantity is below their minimum-stock threshold,
    /// including products that are fully out of stock.
    pub async fn low_stock_products(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "{SELECT_PRODUCT} WHERE quantity < min_stock ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Σ price × quantity over all products.
    pub async fn total_inventory_value(&self) -> DbResult<Money> {
        let total = sqlx::query_scalar::<_, Money>(
            "SELECT COALESCE(SUM(price * quantity), 0) FROM products",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Product count, stock value and low/out-of-stock counts in one pass.
    pub async fn inventory_summary(&self) -> DbResult<InventorySummary> {
        let summary = sqlx::query_as::<_, InventorySummary>(
            "SELECT \
                COUNT(*) AS total_products, \
                COALESCE(SUM(price * quantity), 0) AS total_value, \
                COALESCE(SUM(CASE WHEN quantity > 0 AND quantity < min_stock THEN 1 ELSE 0 END), 0) AS low_stock_count, \
                COALESCE(SUM(CASE WHEN quantity = 0 THEN 1 ELSE 0 END), 0) AS out_of_stock_count \
             FROM products",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    // -------------------------------------------------------------------------
    // Sales and supplies views
    // -------------------------------------------------------------------------

    /// Sales whose timestamp falls inside the period, both ends inclusive,
    /// in creation order.
    pub async fn sales_in_period(&self, period: Period) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "{SELECT_SALE} WHERE created_at BETWEEN ?1 AND ?2 ORDER BY id"
        ))
        .bind(period.start)
        .bind(period.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Σ total over the sales log, optionally period-filtered.
    pub async fn total_sales_amount(&self, period: Option<Period>) -> DbResult<Money> {
        let total = match period {
            Some(p) => {
                sqlx::query_scalar::<_, Money>(
                    "SELECT COALESCE(SUM(total), 0) FROM sales WHERE created_at BETWEEN ?1 AND ?2",
                )
                .bind(p.start)
                .bind(p.end)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, Money>("SELECT COALESCE(SUM(total), 0) FROM sales")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(total)
    }

    /// Σ cost over the supplies log, optionally period-filtered.
    pub async fn total_supplies_cost(&self, period: Option<Period>) -> DbResult<Money> {
        let total = match period {
            Some(p) => {
                sqlx::query_scalar::<_, Money>(
                    "SELECT COALESCE(SUM(cost), 0) FROM supplies WHERE created_at BETWEEN ?1 AND ?2",
                )
                .bind(p.start)
                .bind(p.end)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, Money>("SELECT COALESCE(SUM(cost), 0) FROM supplies")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(total)
    }

    /// Sales minus supply costs over matching periods. Can be negative.
    pub async fn gross_profit(&self, period: Option<Period>) -> DbResult<Money> {
        let sales = self.total_sales_amount(period).await?;
        let supplies = self.total_supplies_cost(period).await?;
        Ok(sales - supplies)
    }

    /// Best-selling products by summed sold quantity, descending.
    ///
    /// Ties keep first-encountered order (the product whose first sale
    /// happened earlier comes first). Sales of deleted products stay in
    /// the view under [`MISSING_PRODUCT_LABEL`].
    pub async fn best_sellers(&self, limit: u32) -> DbResult<Vec<BestSeller>> {
        debug!(limit, "Computing best sellers");

        let rows = sqlx::query_as::<_, BestSeller>(
            "SELECT \
                s.product_id AS product_id, \
                COALESCE(p.name, ?1) AS product_name, \
                SUM(s.quantity) AS total_quantity, \
                SUM(s.total) AS revenue, \
                MIN(s.id) AS first_sale_id \
             FROM sales s \
             LEFT JOIN products p ON p.id = s.product_id \
             GROUP BY s.product_id \
             ORDER BY total_quantity DESC, first_sale_id ASC \
             LIMIT ?2",
        )
        .bind(MISSING_PRODUCT_LABEL)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Sales from the trailing `days` days, newest first.
    pub async fn recent_sales(&self, days: i64) -> DbResult<Vec<Sale>> {
        let cutoff = Utc::now() - Duration::days(days);

        let sales = sqlx::query_as::<_, Sale>(&format!(
            "{SELECT_SALE} WHERE created_at >= ?1 ORDER BY id DESC"
        ))
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Supplies from the trailing `days` days, newest first.
    pub async fn recent_supplies(&self, days: i64) -> DbResult<Vec<Supply>> {
        let cutoff = Utc::now() - Duration::days(days);

        let supplies = sqlx::query_as::<_, Supply>(&format!(
            "{SELECT_SUPPLY} WHERE created_at >= ?1 ORDER BY id DESC"
        ))
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(supplies)
    }

    /// Sales, costs, profit and margin for a period plus the current
    /// inventory value.
    pub async fn financial_summary(&self, period: Period) -> DbResult<FinancialSummary> {
        let sales_total = self.total_sales_amount(Some(period)).await?;
        let supplies_cost = self.total_supplies_cost(Some(period)).await?;
        let inventory_value = self.total_inventory_value().await?;
        let gross_profit = sales_total - supplies_cost;

        let margin_percentage = if sales_total.is_zero() {
            None
        } else {
            Some(gross_profit.minor() as f64 / sales_total.minor() as f64 * 100.0)
        };

        Ok(FinancialSummary {
            sales_total,
            supplies_cost,
            gross_profit,
            inventory_value,
            margin_percentage,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{NewCustomer, NewProduct};
    use crate::pool::{Database, DbConfig};
    use chrono::{DateTime, TimeZone};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn add_product(db: &Database, name: &str, category: &str, price: i64, qty: i64, min: i64) -> i64 {
        db.engine()
            .create_product(NewProduct::new(name, category, Money::from_minor(price), qty, min))
            .await
            .unwrap()
            .id
    }

    /// Inserts a sale row directly so the test controls the timestamp.
    async fn insert_sale_at(db: &Database, product_id: i64, quantity: i64, total: i64, at: DateTime<Utc>) {
        sqlx::query(
            "INSERT INTO sales (product_id, customer_id, quantity, unit_price, total, created_at) \
             VALUES (?1, NULL, ?2, ?3, ?4, ?5)",
        )
        .bind(product_id)
        .bind(quantity)
        .bind(Money::from_minor(total / quantity.max(1)))
        .bind(Money::from_minor(total))
        .bind(at)
        .execute(db.pool())
        .await
        .unwrap();
    }

    async fn insert_supply_at(db: &Database, product_id: i64, cost: i64, at: DateTime<Utc>) {
        sqlx::query(
            "INSERT INTO supplies (supplier, product_id, quantity, cost, created_at) \
             VALUES ('Acme', ?1, 1, ?2, ?3)",
        )
        .bind(product_id)
        .bind(Money::from_minor(cost))
        .bind(at)
        .execute(db.pool())
        .await
        .unwrap();
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    // -------------------------------------------------------------------------
    // Inventory views
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_low_stock_products() {
        let db = test_db().await;
        let empty = add_product(&db, "Чай", "Продукты", 4_590, 0, 10).await;
        let low = add_product(&db, "Шоколад", "Продукты", 1_590, 2, 20).await;
        let _ok = add_product(&db, "Кофе", "Продукты", 12_990, 30, 12).await;
        let _at_threshold = add_product(&db, "Сахар", "Продукты", 990, 5, 5).await;
        let _zero_zero = add_product(&db, "Соль", "Продукты", 490, 0, 0).await;

        let low_stock = db.reports().low_stock_products().await.unwrap();
        let ids: Vec<i64> = low_stock.iter().map(|p| p.id).collect();

        // Out-of-stock products with a threshold are included; products at
        // or above their threshold are not, and neither is min_stock == 0
        assert_eq!(ids, vec![empty, low]);
    }

    #[tokio::test]
    async fn test_total_inventory_value() {
        let db = test_db().await;
        assert_eq!(
            db.reports().total_inventory_value().await.unwrap(),
            Money::zero()
        );

        add_product(&db, "Кофе", "Продукты", 10_000, 3, 1).await; // 300.00
        add_product(&db, "Чай", "Продукты", 5_000, 2, 1).await; // 100.00

        assert_eq!(
            db.reports().total_inventory_value().await.unwrap(),
            Money::from_minor(40_000)
        );
    }

    #[tokio::test]
    async fn test_inventory_summary() {
        let db = test_db().await;
        add_product(&db, "Чай", "Продукты", 4_590, 0, 10).await;
        add_product(&db, "Шоколад", "Продукты", 1_590, 2, 20).await;
        add_product(&db, "Кофе", "Продукты", 12_990, 30, 12).await;

        let summary = db.reports().inventory_summary().await.unwrap();
        assert_eq!(summary.total_products, 3);
        assert_eq!(summary.out_of_stock_count, 1);
        assert_eq!(summary.low_stock_count, 1);
        assert_eq!(
            summary.total_value,
            Money::from_minor(2 * 1_590 + 30 * 12_990)
        );
    }

    // -------------------------------------------------------------------------
    // Period filters
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_sales_in_period_is_inclusive() {
        let db = test_db().await;
        let product = add_product(&db, "Кофе", "Продукты", 10_000, 100, 1).await;

        insert_sale_at(&db, product, 1, 10_000, at(10, 9)).await;
        insert_sale_at(&db, product, 1, 10_000, at(15, 12)).await;
        insert_sale_at(&db, product, 1, 10_000, at(20, 18)).await;

        // Bounds land exactly on the first and second sale
        let period = Period::new(at(10, 9), at(15, 12));
        let sales = db.reports().sales_in_period(period).await.unwrap();
        assert_eq!(sales.len(), 2);
        // Creation order within the period
        assert!(sales[0].id < sales[1].id);

        let everything = Period::new(at(1, 0), at(31, 23));
        assert_eq!(db.reports().sales_in_period(everything).await.unwrap().len(), 3);

        let before = Period::new(at(1, 0), at(9, 23));
        assert!(db.reports().sales_in_period(before).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_totals_and_gross_profit() {
        let db = test_db().await;
        let product = add_product(&db, "Кофе", "Продукты", 10_000, 100, 1).await;

        insert_sale_at(&db, product, 1, 18_000, at(10, 9)).await;
        insert_sale_at(&db, product, 1, 12_000, at(20, 9)).await;
        insert_supply_at(&db, product, 5_000, at(12, 9)).await;
        insert_supply_at(&db, product, 40_000, at(25, 9)).await;

        let reports = db.reports();

        // Unfiltered totals cover the whole logs
        assert_eq!(
            reports.total_sales_amount(None).await.unwrap(),
            Money::from_minor(30_000)
        );
        assert_eq!(
            reports.total_supplies_cost(None).await.unwrap(),
            Money::from_minor(45_000)
        );
        // 300.00 of sales against 450.00 of supplies: a loss
        assert_eq!(
            reports.gross_profit(None).await.unwrap(),
            Money::from_minor(-15_000)
        );

        // Period-filtered: first half of the month
        let first_half = Some(Period::new(at(1, 0), at(15, 23)));
        assert_eq!(
            reports.total_sales_amount(first_half).await.unwrap(),
            Money::from_minor(18_000)
        );
        assert_eq!(
            reports.total_supplies_cost(first_half).await.unwrap(),
            Money::from_minor(5_000)
        );
        assert_eq!(
            reports.gross_profit(first_half).await.unwrap(),
            Money::from_minor(13_000)
        );
    }

    #[tokio::test]
    async fn test_financial_summary() {
        let db = test_db().await;
        let product = add_product(&db, "Кофе", "Продукты", 10_000, 10, 1).await;

        insert_sale_at(&db, product, 1, 18_000, at(10, 9)).await;
        insert_supply_at(&db, product, 5_000, at(12, 9)).await;

        let summary = db
            .reports()
            .financial_summary(Period::new(at(1, 0), at(31, 23)))
            .await
            .unwrap();

        assert_eq!(summary.sales_total, Money::from_minor(18_000));
        assert_eq!(summary.supplies_cost, Money::from_minor(5_000));
        assert_eq!(summary.gross_profit, Money::from_minor(13_000));
        assert_eq!(summary.inventory_value, Money::from_minor(100_000));
        let margin = summary.margin_percentage.unwrap();
        assert!((margin - 72.222).abs() < 0.01);

        // No sales in the period: no margin to speak of
        let empty = db
            .reports()
            .financial_summary(Period::new(at(1, 0), at(2, 0)))
            .await
            .unwrap();
        assert_eq!(empty.sales_total, Money::zero());
        assert!(empty.margin_percentage.is_none());
    }

    // -------------------------------------------------------------------------
    // Best sellers
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_best_sellers_ordering_and_ties() {
        let db = test_db().await;
        let engine = db.engine();
        let a = add_product(&db, "Кофе", "Продукты", 10_000, 100, 1).await;
        let b = add_product(&db, "Чай", "Продукты", 5_000, 100, 1).await;
        let c = add_product(&db, "Сахар", "Продукты", 1_000, 100, 1).await;

        // a: 5 total; c: 7 total (first sale before b's); b: 7 total
        engine.record_sale(a, 5, None).await.unwrap();
        engine.record_sale(c, 3, None).await.unwrap();
        engine.record_sale(b, 7, None).await.unwrap();
        engine.record_sale(c, 4, None).await.unwrap();

        let best = db.reports().best_sellers(10).await.unwrap();
        let ids: Vec<i64> = best.iter().map(|r| r.product_id).collect();

        // Ties keep first-encountered order: c's first sale precedes b's
        assert_eq!(ids, vec![c, b, a]);
        assert_eq!(best[0].total_quantity, 7);
        assert_eq!(best[0].product_name, "Сахар");
        assert_eq!(best[0].revenue, Money::from_minor(7_000));

        // Limit is respected
        let top_two = db.reports().best_sellers(2).await.unwrap();
        assert_eq!(top_two.len(), 2);
        assert_eq!(top_two[1].product_id, b);
    }

    #[tokio::test]
    async fn test_best_sellers_survive_product_deletion() {
        let db = test_db().await;
        let engine = db.engine();
        let product = add_product(&db, "Кофе", "Продукты", 10_000, 100, 1).await;

        engine.record_sale(product, 4, None).await.unwrap();
        engine.delete_product(product).await.unwrap();

        let best = db.reports().best_sellers(10).await.unwrap();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].product_id, product);
        assert_eq!(best[0].product_name, MISSING_PRODUCT_LABEL);
        assert_eq!(best[0].total_quantity, 4);
    }

    // -------------------------------------------------------------------------
    // Trailing windows
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_recent_sales_and_supplies() {
        let db = test_db().await;
        let engine = db.engine();
        let product = add_product(&db, "Кофе", "Продукты", 10_000, 100, 1).await;

        // One fresh sale through the engine, one stale row from last year
        engine.record_sale(product, 1, None).await.unwrap();
        insert_sale_at(&db, product, 1, 10_000, Utc::now() - Duration::days(400)).await;

        let recent = db.reports().recent_sales(7).await.unwrap();
        assert_eq!(recent.len(), 1);

        engine
            .record_supply("Acme", product, 5, Money::from_minor(1_000))
            .await
            .unwrap();
        insert_supply_at(&db, product, 2_000, Utc::now() - Duration::days(400)).await;

        let recent = db.reports().recent_supplies(30).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].supplier, "Acme");
    }

    #[tokio::test]
    async fn test_customer_sales_period_totals_match_engine_data() {
        let db = test_db().await;
        let engine = db.engine();
        let product = add_product(&db, "Кофе", "Продукты", 10_000, 100, 1).await;
        let customer = engine
            .create_customer(
                NewCustomer::new("Петрова Анна", "+7 900 222-33-44").discount_percentage(10.0),
            )
            .await
            .unwrap();

        engine.record_sale(product, 2, Some(customer.id)).await.unwrap();

        // Engine-recorded sales land inside a "today" period
        let today = Period::new(Utc::now() - Duration::hours(1), Utc::now() + Duration::hours(1));
        assert_eq!(
            db.reports().total_sales_amount(Some(today)).await.unwrap(),
            Money::from_minor(18_000)
        );
    }
}
