//! # Domain Types
//!
//! Core entity records used throughout Lavka.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Entity Records                              │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐                              │
//! │  │    Product    │   │   Customer    │   mutable entities           │
//! │  │  ───────────  │   │  ───────────  │                              │
//! │  │  id (i64)     │   │  id (i64)     │                              │
//! │  │  category     │   │  discount     │                              │
//! │  │  price        │   │  total_       │                              │
//! │  │  quantity     │   │   purchases   │                              │
//! │  └───────────────┘   └───────────────┘                              │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐                              │
//! │  │     Sale      │   │    Supply     │   append-only logs           │
//! │  │  ───────────  │   │  ───────────  │                              │
//! │  │  product_id   │   │  product_id   │   never edited or deleted;   │
//! │  │  customer_id? │   │  supplier     │   reference products by id   │
//! │  │  unit_price   │   │  cost         │   (snapshot, no ownership)   │
//! │  │  total        │   │               │                              │
//! │  └───────────────┘   └───────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are positive integers assigned by the datastore on insert.
//! Sales capture the unit price at the time of sale; later product edits do
//! not rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::ProductCategory;
use crate::money::{DiscountRate, Money};

// =============================================================================
// Product Status
// =============================================================================

/// Stock status derived from quantity and the minimum-stock threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Quantity is zero.
    OutOfStock,
    /// Quantity is above zero but below the minimum-stock threshold.
    LowStock,
    /// Quantity is at or above the minimum-stock threshold.
    InStock,
}

impl ProductStatus {
    /// Localized display name shown to the user.
    pub const fn display_name(&self) -> &'static str {
        match self {
            ProductStatus::OutOfStock => "Нет в наличии",
            ProductStatus::LowStock => "Низкий запас",
            ProductStatus::InStock => "В наличии",
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier, assigned by the datastore.
    pub id: i64,

    /// Display name (non-empty).
    pub name: String,

    /// Category from the fixed enumeration.
    pub category: ProductCategory,

    /// Unit price, non-negative.
    pub price: Money,

    /// Quantity on hand, never below zero.
    pub quantity: i64,

    /// Minimum-stock threshold for the low-stock report.
    pub min_stock: i64,

    /// Optional barcode.
    pub barcode: Option<String>,

    /// Optional free-form description.
    pub description: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Stock status derived from quantity and min_stock.
    pub const fn status(&self) -> ProductStatus {
        if self.quantity == 0 {
            ProductStatus::OutOfStock
        } else if self.quantity < self.min_stock {
            ProductStatus::LowStock
        } else {
            ProductStatus::InStock
        }
    }

    /// Total value of this product's stock: price × quantity.
    pub const fn total_value(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Unique identifier, assigned by the datastore.
    pub id: i64,

    /// Customer name (non-empty).
    pub name: String,

    /// Contact phone (non-empty).
    pub phone: String,

    /// Optional contact email.
    pub email: Option<String>,

    /// Personal discount applied to this customer's sales.
    pub discount: DiscountRate,

    /// Running total of completed purchases. Only ever increases;
    /// incremented by the transaction engine when a sale completes.
    pub total_purchases: Money,

    /// When the customer was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale. Append-only: immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Unique identifier, monotonically assigned in creation order.
    pub id: i64,

    /// The product sold. Historical rows may reference a product that has
    /// since been deleted; reports substitute a placeholder label then.
    pub product_id: i64,

    /// The buying customer, if one was attached to the sale.
    pub customer_id: Option<i64>,

    /// Units sold, always positive.
    pub quantity: i64,

    /// Unit price at the time of sale (frozen).
    pub unit_price: Money,

    /// Amount charged: unit_price × quantity, reduced by the customer's
    /// discount when a customer is attached.
    pub total: Money,

    /// When the sale completed.
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Computes the charged total for a sale.
    ///
    /// This is the single authoritative implementation of the total rule:
    /// `unit_price × quantity`, reduced by the customer discount when one
    /// applies. The transaction engine calls this; nothing else computes
    /// sale totals.
    ///
    /// ## Example
    /// ```rust
    /// use lavka_core::money::{DiscountRate, Money};
    /// use lavka_core::types::Sale;
    ///
    /// let price = Money::from_minor(10000); // 100.00
    ///
    /// assert_eq!(Sale::compute_total(price, 3, None).minor(), 30000);
    ///
    /// let ten_pct = DiscountRate::from_percentage(10.0).unwrap();
    /// assert_eq!(Sale::compute_total(price, 2, Some(ten_pct)).minor(), 18000);
    /// ```
    pub fn compute_total(unit_price: Money, quantity: i64, discount: Option<DiscountRate>) -> Money {
        let gross = unit_price.multiply_quantity(quantity);
        match discount {
            Some(rate) => rate.apply(gross),
            None => gross,
        }
    }
}

// =============================================================================
// Supply
// =============================================================================

/// An inbound stock replenishment. Append-only: immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supply {
    /// Unique identifier, assigned by the datastore.
    pub id: i64,

    /// Name of the supplier (non-empty).
    pub supplier: String,

    /// The product replenished.
    pub product_id: i64,

    /// Units received, always positive.
    pub quantity: i64,

    /// Cost of the delivery, non-negative.
    pub cost: Money,

    /// When the supply was recorded.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Period
// =============================================================================

/// An inclusive timestamp range used by the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Start of the range (inclusive).
    pub start: DateTime<Utc>,
    /// End of the range (inclusive).
    pub end: DateTime<Utc>,
}

impl Period {
    /// Creates a period from two inclusive bounds.
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Period { start, end }
    }

    /// Checks whether a timestamp falls inside the period, both ends
    /// inclusive.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
