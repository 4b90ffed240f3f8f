//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Prices are rounded to whole cents ONCE, at creation, and every       │
//! │    cart total after that is exact integer arithmetic.                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Contract
//! `Money::from_dollars` rounds the cent value half-away-from-zero, which is
//! the price-rounding rule the storefront promises:
//!
//! ```rust
//! use weft_core::money::Money;
//!
//! assert_eq!(Money::from_dollars(14.999).to_dollars(), 15.0);
//! assert_eq!(Money::from_dollars(10.004).to_dollars(), 10.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: leaves room for refunds/adjustments even though
///   catalog prices are validated non-negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Full derive set**: `Ord`/`Hash` so `Money` can live inside map keys
///   such as [`crate::types::ProductVariant`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a dollar amount, rounding to whole cents.
    ///
    /// Rounding is half-away-from-zero on the cent value. This is the single
    /// place a float crosses into the money domain; everything downstream is
    /// exact integer math.
    ///
    /// ## Example
    /// ```rust
    /// use weft_core::money::Money;
    ///
    /// assert_eq!(Money::from_dollars(19.99).cents(), 1999);
    /// assert_eq!(Money::from_dollars(14.999).cents(), 1500);
    /// assert_eq!(Money::from_dollars(10.004).cents(), 1000);
    /// ```
    pub fn from_dollars(dollars: f64) -> Self {
        Money((dollars * 100.0).round() as i64)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a dollar amount.
    ///
    /// Exact for every representable price: a whole number of cents always
    /// converts to f64 without precision loss.
    #[inline]
    pub fn to_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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
    /// use weft_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1050); // $10.50
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 3150);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Formats the value as a plain fixed-point decimal string ("25.50").
    ///
    /// This is the wire shape payment SDKs expect for a transaction amount
    /// (no currency symbol, exactly two fraction digits).
    pub fn to_fixed_point(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
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

/// Multiplication by quantity (for line totals).
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Summation over line totals.
impl Sum for Money {
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
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_dollars_rounds_half_away_from_zero() {
        assert_eq!(Money::from_dollars(14.999).cents(), 1500);
        assert_eq!(Money::from_dollars(10.004).cents(), 1000);
        // 0.125 is exact in binary, so the half-cent genuinely lands on .5
        assert_eq!(Money::from_dollars(0.125).cents(), 13);
        assert_eq!(Money::from_dollars(-0.125).cents(), -13);
        assert_eq!(Money::from_dollars(0.0).cents(), 0);
    }

    #[test]
    fn test_price_rounding_is_idempotent() {
        for raw in [14.999, 10.004, 19.99, 0.005, 123.456] {
            let once = Money::from_dollars(raw);
            let twice = Money::from_dollars(once.to_dollars());
            assert_eq!(once, twice, "rounding {} must be idempotent", raw);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_fixed_point() {
        assert_eq!(Money::from_cents(2550).to_fixed_point(), "25.50");
        assert_eq!(Money::from_cents(5).to_fixed_point(), "0.05");
        assert_eq!(Money::from_cents(-1099).to_fixed_point(), "-10.99");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(550);

        assert_eq!((a + b).cents(), 1550);
        assert_eq!((a - b).cents(), 450);
        assert_eq!((a * 3).cents(), 3000);

        let mut acc = Money::zero();
        acc += a;
        acc += b;
        assert_eq!(acc.cents(), 1550);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_cents(1000), Money::from_cents(550)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 1550);
    }
}
