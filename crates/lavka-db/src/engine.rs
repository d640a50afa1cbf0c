//! # Transaction Engine
//!
//! The single authoritative implementation of every mutating operation.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      record_sale(product, qty, customer?)           │
//! │                                                                     │
//! │  validate quantity > 0                                              │
//! │       │                                                             │
//! │       ▼                                  ┌───────────────────────┐  │
//! │  BEGIN TRANSACTION ──────────────────────│  one unit of work:    │  │
//! │       │                                  │  nothing below is     │  │
//! │       ▼                                  │  visible partially    │  │
//! │  load product        → NotFound?         └───────────────────────┘  │
//! │  load customer (opt) → NotFound?                                    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  UPDATE products                                                    │
//! │     SET quantity = quantity - qty                                   │
//! │   WHERE id = ? AND quantity >= qty   ← atomic stock guard           │
//! │       │                                                             │
//! │       ├── 0 rows → InsufficientStock, stock untouched               │
//! │       ▼                                                             │
//! │  total = unit_price × qty, minus customer discount                  │
//! │  INSERT sale row (price frozen at sale time)                        │
//! │  UPDATE customer total_purchases += total                           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  COMMIT → Sale returned with its assigned id                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The conditional UPDATE makes check-then-decrement atomic: two sales
//! racing for the same stock serialize on the row, and the loser fails
//! with InsufficientStock instead of driving the quantity negative.
//!
//! An error anywhere before COMMIT rolls the transaction back, so a failed
//! operation leaves every table unchanged.

use chrono::Utc;
use sqlx::Sqlite;
use tracing::{debug, info};

use crate::error::{DbError, EngineResult};
use crate::pool::Database;
use lavka_core::validation::{
    validate_cost, validate_customer_name, validate_min_stock, validate_phone, validate_price,
    validate_product_name, validate_quantity, validate_stock_level, validate_supplier,
};
use lavka_core::{
    CoreError, Customer, DiscountRate, Money, Product, ProductCategory, Sale, Supply,
};

const SELECT_PRODUCT: &str =
    "SELECT id, name, category, price, quantity, min_stock, barcode, description, created_at \
     FROM products WHERE id = ?1";

const SELECT_CUSTOMER: &str =
    "SELECT id, name, phone, email, discount, total_purchases, created_at \
     FROM customers WHERE id = ?1";

// =============================================================================
// Operation Inputs
// =============================================================================

/// Input for creating a product.
///
/// The category arrives as text (either the stable key or the localized
/// display name) and is resolved against the category mapping; unmapped
/// input fails validation instead of defaulting.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub quantity: i64,
    pub min_stock: i64,
    pub barcode: Option<String>,
    pub description: Option<String>,
}

impl NewProduct {
    /// Creates a product input with the required fields.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        quantity: i64,
        min_stock: i64,
    ) -> Self {
        NewProduct {
            name: name.into(),
            category: category.into(),
            price,
            quantity,
            min_stock,
            barcode: None,
            description: None,
        }
    }

    /// Sets the barcode.
    pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Field-level patch for editing a product.
///
/// `Some(value)` replaces the field, `None` leaves it untouched. Every
/// provided value goes through the same validation as on create.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub quantity: Option<i64>,
    pub min_stock: Option<i64>,
    pub barcode: Option<String>,
    pub description: Option<String>,
}

/// Input for creating a customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// Personal discount as a percentage in [0, 100].
    pub discount_percentage: f64,
}

impl NewCustomer {
    /// Creates a customer input with no email and no discount.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        NewCustomer {
            name: name.into(),
            phone: phone.into(),
            email: None,
            discount_percentage: 0.0,
        }
    }

    /// Sets the contact email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the personal discount percentage.
    pub fn discount_percentage(mut self, pct: f64) -> Self {
        self.discount_percentage = pct;
        self
    }
}

// =============================================================================
// Store Engine
// =============================================================================

/// The transaction engine.
///
/// Holds a handle to the [`Database`] and performs every mutating
/// operation as one transaction. Readers (repositories, reports) never
/// observe a partially applied operation.
#[derive(Debug, Clone)]
pub struct StoreEngine {
    db: Database,
}

impl StoreEngine {
    /// Creates an engine over the given database handle.
    pub fn new(db: Database) -> Self {
        StoreEngine { db }
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Creates a product and returns it with its assigned id.
    ///
    /// ## Errors
    /// - `ValidationError` for an empty name, negative price, negative
    ///   quantity, negative min_stock, or an unrecognized category
    pub async fn create_product(&self, input: NewProduct) -> EngineResult<Product> {
        validate_product_name(&input.name)?;
        let category = ProductCategory::parse(&input.category)?;
        validate_price(input.price)?;
        validate_stock_level(input.quantity)?;
        validate_min_stock(input.min_stock)?;

        let name = input.name.trim().to_string();
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO products (name, category, price, quantity, min_stock, barcode, description, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&name)
        .bind(category)
        .bind(input.price)
        .bind(input.quantity)
        .bind(input.min_stock)
        .bind(&input.barcode)
        .bind(&input.description)
        .bind(now)
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        info!(id, name = %name, "Product created");

        Ok(Product {
            id,
            name,
            category,
            price: input.price,
            quantity: input.quantity,
            min_stock: input.min_stock,
            barcode: input.barcode,
            description: input.description,
            created_at: now,
        })
    }

    /// Applies a field patch to a product and returns the updated record.
    ///
    /// ## Errors
    /// - `ProductNotFound` if the id doesn't exist
    /// - `ValidationError` if any provided field fails its rule
    pub async fn update_product(&self, id: i64, patch: ProductUpdate) -> EngineResult<Product> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut product = sqlx::query_as::<Sqlite, Product>(SELECT_PRODUCT)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::ProductNotFound(id))?;

        if let Some(name) = patch.name {
            validate_product_name(&name)?;
            product.name = name.trim().to_string();
        }
        if let Some(category) = patch.category {
            product.category = ProductCategory::parse(&category)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
            product.price = price;
        }
        if let Some(quantity) = patch.quantity {
            validate_stock_level(quantity)?;
            product.quantity = quantity;
        }
        if let Some(min_stock) = patch.min_stock {
            validate_min_stock(min_stock)?;
            product.min_stock = min_stock;
        }
        if let Some(barcode) = patch.barcode {
            product.barcode = Some(barcode);
        }
        if let Some(description) = patch.description {
            product.description = Some(description);
        }

        sqlx::query(
            "UPDATE products SET name = ?2, category = ?3, price = ?4, quantity = ?5, \
             min_stock = ?6, barcode = ?7, description = ?8 WHERE id = ?1",
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.category)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.min_stock)
        .bind(&product.barcode)
        .bind(&product.description)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(id, "Product updated");
        Ok(product)
    }

    /// Deletes a product.
    ///
    /// Historical sales and supplies referencing the product are retained;
    /// reports substitute a placeholder label for the missing name. New
    /// sales or supplies against the id fail with `ProductNotFound`.
    pub async fn delete_product(&self, id: i64) -> EngineResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::ProductNotFound(id).into());
        }

        info!(id, "Product deleted");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    /// Creates a customer and returns it with its assigned id.
    ///
    /// ## Errors
    /// - `ValidationError` for an empty name or phone, or a discount
    ///   percentage outside [0, 100]
    pub async fn create_customer(&self, input: NewCustomer) -> EngineResult<Customer> {
        validate_customer_name(&input.name)?;
        validate_phone(&input.phone)?;
        let discount = DiscountRate::from_percentage(input.discount_percentage)?;

        let name = input.name.trim().to_string();
        let phone = input.phone.trim().to_string();
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO customers (name, phone, email, discount, total_purchases, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&name)
        .bind(&phone)
        .bind(&input.email)
        .bind(discount)
        .bind(Money::zero())
        .bind(now)
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        info!(id, name = %name, "Customer created");

        Ok(Customer {
            id,
            name,
            phone,
            email: input.email,
            discount,
            total_purchases: Money::zero(),
            created_at: now,
        })
    }

    // -------------------------------------------------------------------------
    // Sales
    // -------------------------------------------------------------------------

    /// Records a sale and returns it with its assigned id.
    ///
    /// One transaction covers the stock decrement, the log append and the
    /// customer statistics update. The charged total uses the product's
    /// current price and, when a customer is attached, that customer's
    /// current discount; both are frozen into the sale row.
    ///
    /// ## Errors
    /// - `ValidationError` if quantity is not positive
    /// - `ProductNotFound` / `CustomerNotFound` for missing references
    /// - `InsufficientStock` if the quantity exceeds available stock; the
    ///   stock level is left unchanged
    pub async fn record_sale(
        &self,
        product_id: i64,
        quantity: i64,
        customer_id: Option<i64>,
    ) -> EngineResult<Sale> {
        validate_quantity(quantity)?;

        debug!(product_id, quantity, ?customer_id, "Recording sale");

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let product = sqlx::query_as::<Sqlite, Product>(SELECT_PRODUCT)
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::ProductNotFound(product_id))?;

        let customer = match customer_id {
            Some(cid) => Some(
                sqlx::query_as::<Sqlite, Customer>(SELECT_CUSTOMER)
                    .bind(cid)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or(CoreError::CustomerNotFound(cid))?,
            ),
            None => None,
        };

        // The quantity guard repeats inside the UPDATE so that the
        // check-then-decrement pair is atomic even with concurrent writers.
        let decremented = sqlx::query(
            "UPDATE products SET quantity = quantity - ?1 WHERE id = ?2 AND quantity >= ?1",
        )
        .bind(quantity)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            return Err(CoreError::InsufficientStock {
                product_id,
                available: product.quantity,
                requested: quantity,
            }
            .into());
        }

        let total = Sale::compute_total(
            product.price,
            quantity,
            customer.as_ref().map(|c| c.discount),
        );
        let now = Utc::now();

        let inserted = sqlx::query(
            "INSERT INTO sales (product_id, customer_id, quantity, unit_price, total, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(product_id)
        .bind(customer_id)
        .bind(quantity)
        .bind(product.price)
        .bind(total)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if let Some(customer) = &customer {
            sqlx::query("UPDATE customers SET total_purchases = total_purchases + ?1 WHERE id = ?2")
                .bind(total)
                .bind(customer.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let sale = Sale {
            id: inserted.last_insert_rowid(),
            product_id,
            customer_id,
            quantity,
            unit_price: product.price,
            total,
            created_at: now,
        };

        info!(
            sale_id = sale.id,
            product_id,
            quantity,
            total = %total,
            "Sale recorded"
        );
        Ok(sale)
    }

    // -------------------------------------------------------------------------
    // Supplies
    // -------------------------------------------------------------------------

    /// Records a supply and returns it with its assigned id.
    ///
    /// One transaction covers the stock increment and the log append.
    ///
    /// ## Errors
    /// - `ValidationError` for an empty supplier, non-positive quantity or
    ///   negative cost
    /// - `ProductNotFound` for a missing product reference
    pub async fn record_supply(
        &self,
        supplier: &str,
        product_id: i64,
        quantity: i64,
        cost: Money,
    ) -> EngineResult<Supply> {
        validate_supplier(supplier)?;
        validate_quantity(quantity)?;
        validate_cost(cost)?;

        debug!(product_id, quantity, supplier, "Recording supply");

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        // Increment doubles as the existence check: zero rows means there
        // is no product to replenish, and no orphan log row is created.
        let incremented =
            sqlx::query("UPDATE products SET quantity = quantity + ?1 WHERE id = ?2")
                .bind(quantity)
                .bind(product_id)
                .execute(&mut *tx)
                .await?;

        if incremented.rows_affected() == 0 {
            return Err(CoreError::ProductNotFound(product_id).into());
        }

        let supplier = supplier.trim().to_string();
        let now = Utc::now();

        let inserted = sqlx::query(
            "INSERT INTO supplies (supplier, product_id, quantity, cost, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&supplier)
        .bind(product_id)
        .bind(quantity)
        .bind(cost)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let supply = Supply {
            id: inserted.last_insert_rowid(),
            supplier,
            product_id,
            quantity,
            cost,
            created_at: now,
        };

        info!(
            supply_id = supply.id,
            product_id,
            quantity,
            cost = %cost,
            "Supply recorded"
        );
        Ok(supply)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
