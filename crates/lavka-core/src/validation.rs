//! # Validation Module
//!
//! Domain-level validation rules.
//!
//! Raw-text parsing belongs to the presentation layer; everything here
//! receives already-typed values and checks them against the domain rules
//! before the transaction engine runs. The engine is the single caller of
//! these checks, so a failed validation never touches entity state.

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CUSTOMER_NAME_LEN, MAX_PRODUCT_NAME_LEN, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name, MAX_PRODUCT_NAME_LEN)
}

/// Validates a customer name.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name, MAX_CUSTOMER_NAME_LEN)
}

/// Validates a customer phone number.
///
/// Format is free; only presence is required.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if phone.trim().is_empty() {
        return Err(ValidationError::Required { field: "phone" });
    }
    Ok(())
}

/// Validates a supplier name on a supply record.
pub fn validate_supplier(supplier: &str) -> ValidationResult<()> {
    validate_name("supplier", supplier, MAX_PRODUCT_NAME_LEN)
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all products)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query",
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

fn validate_name(field: &'static str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale or supply quantity: strictly positive.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }
    Ok(())
}

/// Validates an initial or edited stock level: zero is allowed.
pub fn validate_stock_level(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative { field: "quantity" });
    }
    Ok(())
}

/// Validates a minimum-stock threshold: zero is allowed.
pub fn validate_min_stock(min_stock: i64) -> ValidationResult<()> {
    if min_stock < 0 {
        return Err(ValidationError::MustBeNonNegative { field: "min_stock" });
    }
    Ok(())
}

/// Validates a product price: zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative { field: "price" });
    }
    Ok(())
}

/// Validates a supply cost: zero is allowed (e.g. promotional stock).
pub fn validate_cost(cost: Money) -> ValidationResult<()> {
    if cost.is_negative() {
        return Err(ValidationError::MustBeNonNegative { field: "cost" });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
