//! # Money Module
//!
//! Provides the `Money` type for unit prices and sale revenue.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    99.99 × 2 × 0.9 = 179.98199999999997  ❌                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    9999 × 2 = 19998 cents, minus 10% (2000 cents) = 17998 cents        │
//! │    Rounding happens exactly once, at the discount step                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::{revenue, Money};
//! use stockroom_core::types::Discount;
//!
//! let price = Money::from_cents(9999); // $99.99
//! let total = revenue(price, 2, Discount::from_percent(10)).unwrap();
//! assert_eq!(total.cents(), 17998); // $179.98
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::types::Discount;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: a discount above 100% produces negative revenue,
///   and that value must be representable
/// - **Single field tuple struct**: stored as a plain INTEGER column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
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

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.checked_multiply_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(unit_price.checked_multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Applies a percentage discount and returns the discounted amount, or
    /// `None` when the result does not fit in an `i64`.
    ///
    /// The discount amount is rounded half-up to whole cents, then
    /// subtracted. Out-of-range discounts are applied as given: above
    /// 100% the result goes negative, below 0% the amount grows.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    /// use stockroom_core::types::Discount;
    ///
    /// let gross = Money::from_cents(10000); // $100.00
    /// let net = gross.checked_apply_discount(Discount::from_percent(10)).unwrap();
    /// assert_eq!(net.cents(), 9000);
    /// ```
    pub fn checked_apply_discount(&self, discount: Discount) -> Option<Money> {
        // i128 keeps `amount * bps` from overflowing on large totals
        let scaled = self.0 as i128 * discount.bps() as i128;
        let discount_amount = (scaled + 5000).div_euclid(10000);
        let net = self.0 as i128 - discount_amount;
        i64::try_from(net).ok().map(Money::from_cents)
    }
}

/// Revenue of a sale: `price × quantity × (1 − discount / 100)`.
///
/// ## User Workflow
/// ```text
/// Product price (read from the live row): $99.99
/// Quantity: 2
///      │
///      ▼
/// gross = $199.98
///      │
///      ▼
/// checked_apply_discount(10%) → $179.98  ← persisted as sales.revenue_cents
/// ```
///
/// ## Errors
/// `ValidationError::Overflow` when the gross or net amount does not fit
/// in an `i64` of cents.
pub fn revenue(
    price: Money,
    quantity: i64,
    discount: Discount,
) -> Result<Money, ValidationError> {
    price
        .checked_multiply_quantity(quantity)
        .and_then(|gross| gross.checked_apply_discount(discount))
        .ok_or_else(|| ValidationError::overflow("revenue"))
}

// =============================================================================
// Trait Implementations
// =============================================================================

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

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
