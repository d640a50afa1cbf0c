//! # Error Types
//!
//! Domain-specific error types for lavka-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  lavka-core errors (this file)                                      │
//! │  ├── CoreError        - Domain rule violations                      │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  lavka-db errors (separate crate)                                   │
//! │  ├── DbError          - Database operation failures                 │
//! │  └── EngineError      - What callers of the engine see              │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → EngineError → caller           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, limits, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
///
/// These are reported synchronously as the result of an operation and never
/// retried automatically. A failed operation leaves all entity state
/// unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The referenced product does not exist (or was deleted).
    ///
    /// A sale or supply must never be created against a missing product;
    /// the operation fails instead of creating a dangling reference.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// The referenced customer does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(i64),

    /// Requested sale quantity exceeds the available stock.
    ///
    /// The sale is rejected as a whole; the product's stock level is not
    /// decremented partially.
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet the domain rules. Input parsing
/// of raw text is the presentation layer's job; everything here operates on
/// already-typed values.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: &'static str },

    /// Category text matches neither a category key nor a display name.
    ///
    /// Unmapped input is rejected here rather than silently defaulted.
    #[error("Unknown category: '{value}'")]
    UnknownCategory { value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
