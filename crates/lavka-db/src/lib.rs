//! # lavka-db: Database Layer for Lavka
//!
//! This crate provides persistence for the Lavka store-management system.
//! It uses SQLite for local storage with sqlx for async operations, and
//! hosts the transaction engine and the query/aggregation layer on top of
//! the pool.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Lavka Data Flow                             │
//! │                                                                     │
//! │  Presentation (forms, tables)                                       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                    lavka-db (THIS CRATE)                    │    │
//! │  │                                                             │    │
//! │  │   ┌────────────┐  ┌──────────────┐  ┌──────────────────┐    │    │
//! │  │   │  Database  │  │ StoreEngine  │  │     Reports      │    │    │
//! │  │   │  (pool.rs) │  │ (engine.rs)  │  │   (reports.rs)   │    │    │
//! │  │   │            │◄─│  all writes, │  │  aggregations,   │    │    │
//! │  │   │ SqlitePool │  │  one tx each │  │  derived views   │    │    │
//! │  │   └────────────┘  └──────────────┘  └──────────────────┘    │    │
//! │  │         ▲                                                   │    │
//! │  │         │         ┌──────────────┐  ┌──────────────────┐    │    │
//! │  │         └─────────│ Repositories │  │    Migrations    │    │    │
//! │  │                   │ (read only)  │  │    (embedded)    │    │    │
//! │  │                   └──────────────┘  └──────────────────┘    │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite Database (lavka.db / :memory:)                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and engine error types
//! - [`repository`] - Read surface (product, customer, sale, supply)
//! - [`engine`] - Transaction engine, the only writer
//! - [`reports`] - Query/aggregation layer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lavka_core::Money;
//! use lavka_db::engine::NewProduct;
//! use lavka_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("lavka.db")).await?;
//! let engine = db.engine();
//!
//! let product = engine
//!     .create_product(NewProduct::new(
//!         "Ноутбук Lenovo",
//!         "Электроника",
//!         Money::from_minor(4_999_900),
//!         10,
//!         3,
//!     ))
//!     .await?;
//!
//! let sale = engine.record_sale(product.id, 2, None).await?;
//! let low = db.reports().low_stock_products().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod reports;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::{NewCustomer, NewProduct, ProductUpdate, StoreEngine};
pub use error::{DbError, DbResult, EngineError, EngineResult};
pub use pool::{Database, DbConfig};
pub use reports::Reports;

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::supply::SupplyRepository;
