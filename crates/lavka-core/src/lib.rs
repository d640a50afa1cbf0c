//! # lavka-core: Pure Domain Model for Lavka
//!
//! This crate is the **heart** of the Lavka store-management system. It
//! contains the entity model and the business rules as pure code with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Lavka Architecture                            │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │              Presentation (forms, tables)                   │    │
//! │  └─────────────────────────────┬───────────────────────────────┘    │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐    │
//! │  │        lavka-db: engine, repositories, reports              │    │
//! │  └─────────────────────────────┬───────────────────────────────┘    │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐    │
//! │  │               ★ lavka-core (THIS CRATE) ★                   │    │
//! │  │                                                             │    │
//! │  │   ┌──────────┐ ┌─────────┐ ┌──────────┐ ┌────────────┐      │    │
//! │  │   │  types   │ │  money  │ │ category │ │ validation │      │    │
//! │  │   │ Product  │ │  Money  │ │ key ↔    │ │   rules    │      │    │
//! │  │   │ Customer │ │ Discount│ │ display  │ │   checks   │      │    │
//! │  │   │ Sale     │ │  Rate   │ │ mapping  │ │            │      │    │
//! │  │   │ Supply   │ └─────────┘ └──────────┘ └────────────┘      │    │
//! │  │   └──────────┘                                              │    │
//! │  │                                                             │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity records (Product, Customer, Sale, Supply, Period)
//! - [`money`] - Money and DiscountRate with integer arithmetic
//! - [`category`] - Fixed category set with key/display mapping
//! - [`error`] - Domain error types
//! - [`validation`] - Domain validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: monetary values are minor units (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use lavka_core::money::{DiscountRate, Money};
//! use lavka_core::types::Sale;
//!
//! // Price is carried in minor units (never floats)
//! let price = Money::from_minor(10000); // 100.00
//!
//! // One authoritative total rule: price × quantity, minus discount
//! let discount = DiscountRate::from_percentage(10.0).unwrap();
//! let total = Sale::compute_total(price, 2, Some(discount));
//! assert_eq!(total.minor(), 18000); // 180.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod category;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use lavka_core::Money` instead of
// `use lavka_core::money::Money`

pub use category::ProductCategory;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{DiscountRate, Money};
pub use types::{Customer, Period, Product, ProductStatus, Sale, Supply};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name (matches the storage column).
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a customer name (matches the storage column).
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;

/// Maximum length of a product search query.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Default minimum-stock threshold for newly created products when the
/// caller does not supply one.
pub const DEFAULT_MIN_STOCK: i64 = 10;
