//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductRow    │   │     SaleRow     │   │  LowStockItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (storage)   │   │  id (storage)   │   │  id             │       │
//! │  │  name (unique)  │   │  product_id FK  │   │  name           │       │
//! │  │  category       │   │  quantity       │   │  stock_level    │       │
//! │  │  price          │   │  sale_date      │   └─────────────────┘       │
//! │  │  stock_level    │   │  revenue        │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Discount     │   │    PriceRow     │   │   SupplierRow   │       │
//! │  │  bps (i64)      │   │  price          │   │  id, name,      │       │
//! │  │  1000 = 10%     │   └─────────────────┘   │  email          │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each row type matches exactly one query shape, so columns are read by
//! name and never by position.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Discount
// =============================================================================

/// Sale discount represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = 10%.
///
/// ## Bounds
/// No bounds are enforced. Values above 100% and below 0% are accepted and
/// flow straight into the revenue calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Discount(i64);

impl Discount {
    /// Creates a discount from basis points.
    #[inline]
    pub const fn from_bps(bps: i64) -> Self {
        Discount(bps)
    }

    /// Creates a discount from a whole percentage (10 → 10%).
    #[inline]
    pub const fn from_percent(pct: i64) -> Self {
        Discount(pct * 100)
    }

    #[inline]
    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// Returns the discount as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Discount(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whether the discount lies within the conventional 0-100% range.
    #[inline]
    pub const fn is_within_bounds(&self) -> bool {
        self.0 >= 0 && self.0 <= 10_000
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::zero()
    }
}

// =============================================================================
// Product Rows
// =============================================================================

/// A persisted product, as read back from `products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductRow {
    /// Identifier assigned by storage on insert.
    pub id: i64,

    /// Unique business key used for lookups and stock updates.
    pub name: String,

    pub category: String,

    /// Unit price.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_cents"))]
    pub price: Money,

    /// Current stock level. May be negative (backorder is not guarded).
    pub stock_level: i64,
}

/// Unit price of a single product, used when pricing a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PriceRow {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_cents"))]
    pub price: Money,
}

/// A product found below the low-stock threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LowStockItem {
    pub id: i64,
    pub name: String,
    pub stock_level: i64,
}

// =============================================================================
// Sale Rows
// =============================================================================

/// A persisted sale, as read back from `sales`.
///
/// Sales are immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleRow {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub sale_date: DateTime<Utc>,

    /// Revenue net of discount, computed when the sale was recorded.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "revenue_cents"))]
    pub revenue: Money,
}

/// A single sale quantity, used by the moving-average forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct QuantityRow {
    pub quantity: i64,
}

// =============================================================================
// Supplier Rows
// =============================================================================

/// A persisted supplier contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SupplierRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_from_percent() {
        let discount = Discount::from_percent(10);
        assert_eq!(discount.bps(), 1000);
        assert_eq!(discount.percentage(), 10.0);
    }

    #[test]
    fn test_discount_bounds() {
        assert!(Discount::zero().is_within_bounds());
        assert!(Discount::from_percent(100).is_within_bounds());
        assert!(!Discount::from_percent(101).is_within_bounds());
        assert!(!Discount::from_bps(-1).is_within_bounds());
    }

    #[test]
    fn test_low_stock_item_serializes_by_name() {
        let item = LowStockItem {
            id: 1,
            name: "Widget".to_string(),
            stock_level: 2,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["name"], "Widget");
        assert_eq!(json["stock_level"], 2);
    }
}
