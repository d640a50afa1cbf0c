//! # Money Module
//!
//! Provides the `Money` and `DiscountRate` types for handling monetary
//! values and customer discounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer minor units (kopecks)                        │
//! │    100.00 ₽ is stored as 10000                                      │
//! │    Totals, discounts and aggregates stay exact                      │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lavka_core::money::{DiscountRate, Money};
//!
//! let price = Money::from_minor(10000); // 100.00
//! let line = price * 2;                 // 200.00
//!
//! let discount = DiscountRate::from_percentage(10.0).unwrap();
//! assert_eq!(discount.apply(line), Money::from_minor(18000)); // 180.00
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (kopecks).
///
/// ## Design Decisions
/// - **i64 (signed)**: gross profit can legitimately be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent serde/sqlx**: stored and serialized as a plain integer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (kopecks).
    ///
    /// ## Example
    /// ```rust
    /// use lavka_core::money::Money;
    ///
    /// let price = Money::from_minor(10050); // 100.50
    /// assert_eq!(price.minor(), 10050);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units (rubles and kopecks).
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rubles) portion.
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use lavka_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(299);
    /// assert_eq!(unit_price.multiply_quantity(3).minor(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Saturating subtraction, clamped at zero.
    ///
    /// Used for margin-style calculations where a negative intermediate
    /// value has no meaning.
    #[inline]
    pub const fn saturating_sub_zero(&self, other: Self) -> Self {
        let diff = self.0 - other.0;
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A customer discount, stored in basis points (1 bp = 0.01%).
///
/// ## Why Basis Points?
/// The user-facing unit is a percentage in [0, 100], but carrying it as an
/// integer keeps discount application exact: 10% = 1000 bps.
///
/// Construction goes through [`DiscountRate::from_percentage`], which
/// rejects values outside [0, 100] instead of clamping them. A discount
/// above 100% would make the charged total negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(transparent)]
pub struct DiscountRate(u32);

/// Maximum representable discount: 100% in basis points.
const MAX_DISCOUNT_BPS: u32 = 10_000;

impl DiscountRate {
    /// Creates a discount from a percentage in [0, 100].
    ///
    /// ## Example
    /// ```rust
    /// use lavka_core::money::DiscountRate;
    ///
    /// let rate = DiscountRate::from_percentage(12.5).unwrap();
    /// assert_eq!(rate.bps(), 1250);
    ///
    /// assert!(DiscountRate::from_percentage(-1.0).is_err());
    /// assert!(DiscountRate::from_percentage(100.5).is_err());
    /// ```
    pub fn from_percentage(pct: f64) -> Result<Self, ValidationError> {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(ValidationError::OutOfRange {
                field: "discount",
                min: 0,
                max: 100,
            });
        }
        Ok(DiscountRate((pct * 100.0).round() as u32))
    }

    /// Creates a discount from basis points. Not validated; used when
    /// loading already-validated values from storage.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the discount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Applies the discount to an amount and returns the reduced amount.
    ///
    /// `amount × (1 − rate)`, with the discounted portion rounded
    /// half-up in integer arithmetic.
    ///
    /// ## Example
    /// ```rust
    /// use lavka_core::money::{DiscountRate, Money};
    ///
    /// let subtotal = Money::from_minor(20000); // 200.00
    /// let rate = DiscountRate::from_percentage(10.0).unwrap();
    /// assert_eq!(rate.apply(subtotal).minor(), 18000); // 180.00
    /// ```
    pub fn apply(&self, amount: Money) -> Money {
        // i128 intermediate prevents overflow on large amounts
        let discount = (amount.minor() as i128 * self.0 as i128 + 5000) / 10_000;
        Money::from_minor(amount.minor() - discount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for logs and debugging. Presentation-layer formatting handles
/// localization on its own.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02} ₽",
            sign,
            self.major_part().abs(),
            self.minor_part()
        )
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(10099);
        assert_eq!(money.minor(), 10099);
        assert_eq!(money.major_part(), 100);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).minor(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).minor(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_minor(1099)), "10.99 ₽");
        assert_eq!(format!("{}", Money::from_minor(500)), "5.00 ₽");
        assert_eq!(format!("{}", Money::from_minor(-550)), "-5.50 ₽");
        assert_eq!(format!("{}", Money::from_minor(0)), "0.00 ₽");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((a * 3).minor(), 3000);
        assert_eq!(a.multiply_quantity(4).minor(), 4000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 39].iter().map(|&m| Money::from_minor(m)).sum();
        assert_eq!(total.minor(), 389);
    }

    #[test]
    fn test_discount_from_percentage() {
        assert_eq!(DiscountRate::from_percentage(0.0).unwrap().bps(), 0);
        assert_eq!(DiscountRate::from_percentage(10.0).unwrap().bps(), 1000);
        assert_eq!(DiscountRate::from_percentage(12.5).unwrap().bps(), 1250);
        assert_eq!(DiscountRate::from_percentage(100.0).unwrap().bps(), 10000);
        assert_eq!(DiscountRate::from_percentage(100.0).unwrap().bps(), MAX_DISCOUNT_BPS);
    }

    #[test]
    fn test_discount_rejects_out_of_range() {
        assert!(DiscountRate::from_percentage(-0.1).is_err());
        assert!(DiscountRate::from_percentage(100.1).is_err());
        assert!(DiscountRate::from_percentage(f64::NAN).is_err());
        assert!(DiscountRate::from_percentage(f64::INFINITY).is_err());
    }

    #[test]
    fn test_discount_apply() {
        // 200.00 at 10% off = 180.00
        let amount = Money::from_minor(20000);
        let rate = DiscountRate::from_percentage(10.0).unwrap();
        assert_eq!(rate.apply(amount).minor(), 18000);

        // Zero discount is identity
        assert_eq!(DiscountRate::zero().apply(amount), amount);

        // 100% discount charges nothing
        let full = DiscountRate::from_percentage(100.0).unwrap();
        assert_eq!(full.apply(amount).minor(), 0);
    }

    #[test]
    fn test_discount_apply_rounds_half_up() {
        // 0.99 at 5% = 0.0495 discount → rounds to 0.05, charged 0.94
        let amount = Money::from_minor(99);
        let rate = DiscountRate::from_percentage(5.0).unwrap();
        assert_eq!(rate.apply(amount).minor(), 94);
    }

    #[test]
    fn test_saturating_sub_zero() {
        let a = Money::from_minor(100);
        let b = Money::from_minor(300);
        assert_eq!(a.saturating_sub_zero(b), Money::zero());
        assert_eq!(b.saturating_sub_zero(a).minor(), 200);
    }
}
