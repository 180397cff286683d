//! # Sale Record
//!
//! A single transaction against a product, priced from the live product
//! row at the moment it is recorded.
//!
//! ## Recording Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale::record                                      │
//! │                                                                         │
//! │  1. PRICE LOOKUP                                                       │
//! │     └── SELECT price_cents FROM products WHERE id = ?                  │
//! │         └── no row → DbError::NotFound (nothing written)               │
//! │                                                                         │
//! │  2. REVENUE                                                            │
//! │     └── price × quantity × (1 − discount/100), rounded to cents        │
//! │                                                                         │
//! │  3. INSERT + COMMIT                                                    │
//! │     └── (product_id, quantity, sale_date, revenue_cents)               │
//! │                                                                         │
//! │  products.stock_level is NOT touched.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Later price changes never rewrite the revenue of sales already recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::Store;
use stockroom_core::{revenue, Discount, Money, PriceRow, SaleRow};

/// A sale waiting to be recorded (or already recorded).
///
/// Quantity and discount are not validated: a zero or negative quantity,
/// or a discount outside 0-100%, is priced and stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub product_id: i64,
    pub quantity: i64,
    pub discount: Discount,

    /// Captured when the record is created, not when it is written.
    pub sale_date: DateTime<Utc>,

    /// Set by [`Sale::record`].
    pub revenue: Option<Money>,
}

impl Sale {
    pub fn new(product_id: i64, quantity: i64) -> Self {
        Sale {
            product_id,
            quantity,
            discount: Discount::zero(),
            sale_date: Utc::now(),
            revenue: None,
        }
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = discount;
        self
    }

    /// Overrides the captured timestamp (e.g. when backfilling history).
    pub fn with_sale_date(mut self, sale_date: DateTime<Utc>) -> Self {
        self.sale_date = sale_date;
        self
    }

    /// Prices the sale from the product's current price, inserts it and
    /// commits.
    ///
    /// ## Returns
    /// * `Ok(Money)` - The revenue written
    /// * `Err(DbError::NotFound)` - `product_id` does not exist
    /// * `Err(DbError::Validation)` - Revenue does not fit in an `i64` of cents
    pub async fn record(&mut self, store: &mut Store) -> DbResult<Money> {
        let price = store
            .query_one(
                sqlx::query_as::<_, PriceRow>("SELECT price_cents FROM products WHERE id = ?")
                    .bind(self.product_id),
            )
            .await?
            .ok_or_else(|| DbError::not_found("Product", self.product_id))?
            .price;

        let total = revenue(price, self.quantity, self.discount)?;

        debug!(
            product_id = self.product_id,
            quantity = self.quantity,
            discount_bps = self.discount.bps(),
            revenue = %total,
            "Recording sale"
        );

        store
            .execute(
                sqlx::query(
                    r#"
                    INSERT INTO sales (product_id, quantity, sale_date, revenue_cents)
                    VALUES (?, ?, ?, ?)
                    "#,
                )
                .bind(self.product_id)
                .bind(self.quantity)
                .bind(self.sale_date)
                .bind(total),
            )
            .await?;
        store.commit().await?;

        self.revenue = Some(total);
        Ok(total)
    }

    /// Gets every sale of a product, newest first.
    pub async fn history(store: &mut Store, product_id: i64) -> DbResult<Vec<SaleRow>> {
        store
            .query_many(
                sqlx::query_as::<_, SaleRow>(
                    r#"
                    SELECT id, product_id, quantity, sale_date, revenue_cents
                    FROM sales
                    WHERE product_id = ?
                    ORDER BY sale_date DESC, id DESC
                    "#,
                )
                .bind(product_id),
            )
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::error::ErrorKind;
    use crate::repository::product::Product;
    use chrono::Duration;

    async fn store_with_product(price_cents: i64) -> (Store, i64) {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();
        Product::new("Sale Product", "Sale Category", Money::from_cents(price_cents), 100)
            .add(&mut store)
            .await
            .unwrap();
        let id = Product::find_by_name(&mut store, "Sale Product")
            .await
            .unwrap()
            .unwrap()
            .id;
        (store, id)
    }

    #[tokio::test]
    async fn test_record_sale_persists_quantity_and_revenue() {
        let (mut store, id) = store_with_product(2999).await;

        let mut sale = Sale::new(id, 2);
        let total = sale.record(&mut store).await.unwrap();

        assert_eq!(total, Money::from_cents(5998));
        assert_eq!(sale.revenue, Some(total));

        let history = Sale::history(&mut store, id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].quantity, 2);
        assert_eq!(history[0].revenue, Money::from_cents(5998));
        assert_eq!(history[0].product_id, id);
    }

    #[tokio::test]
    async fn test_record_sale_applies_discount() {
        let (mut store, id) = store_with_product(9999).await;

        let total = Sale::new(id, 2)
            .with_discount(Discount::from_percent(10))
            .record(&mut store)
            .await
            .unwrap();

        assert_eq!(total, Money::from_cents(17998));
    }

    #[tokio::test]
    async fn test_oversized_discount_passes_through() {
        let (mut store, id) = store_with_product(1000).await;

        let total = Sale::new(id, 1)
            .with_discount(Discount::from_percent(150))
            .record(&mut store)
            .await
            .unwrap();

        assert_eq!(total, Money::from_cents(-500));
    }

    #[tokio::test]
    async fn test_missing_product_is_lookup_error() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();

        let mut sale = Sale::new(404, 1);
        let err = sale.record(&mut store).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Lookup);
        assert_eq!(sale.revenue, None);
        assert!(!store.has_pending_writes());
    }

    #[tokio::test]
    async fn test_revenue_overflow_is_rejected_before_insert() {
        let (mut store, id) = store_with_product(9999).await;

        let mut sale = Sale::new(id, 1_000_000_000_000_000);
        let err = sale.record(&mut store).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(sale.revenue, None);
        assert!(!store.has_pending_writes());
        assert!(Sale::history(&mut store, id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recording_does_not_touch_stock() {
        let (mut store, id) = store_with_product(500).await;

        Sale::new(id, 30).record(&mut store).await.unwrap();

        let row = Product::find_by_id(&mut store, id).await.unwrap().unwrap();
        assert_eq!(row.stock_level, 100);
    }

    #[tokio::test]
    async fn test_price_change_does_not_rewrite_past_revenue() {
        let (mut store, id) = store_with_product(1000).await;
        Sale::new(id, 1).record(&mut store).await.unwrap();

        store
            .execute(
                sqlx::query("UPDATE products SET price_cents = ? WHERE id = ?")
                    .bind(2000_i64)
                    .bind(id),
            )
            .await
            .unwrap();
        store.commit().await.unwrap();
        Sale::new(id, 1).record(&mut store).await.unwrap();

        let mut revenues: Vec<i64> = Sale::history(&mut store, id)
            .await
            .unwrap()
            .iter()
            .map(|s| s.revenue.cents())
            .collect();
        revenues.sort();
        assert_eq!(revenues, vec![1000, 2000]);
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let (mut store, id) = store_with_product(100).await;
        let start = Utc::now();

        for (offset, qty) in [(0, 1), (2, 3), (1, 2)] {
            Sale::new(id, qty)
                .with_sale_date(start + Duration::minutes(offset))
                .record(&mut store)
                .await
                .unwrap();
        }

        let quantities: Vec<i64> = Sale::history(&mut store, id)
            .await
            .unwrap()
            .iter()
            .map(|s| s.quantity)
            .collect();
        assert_eq!(quantities, vec![3, 2, 1]);
    }
}
