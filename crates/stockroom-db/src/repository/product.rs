//! # Product Record
//!
//! A sellable item and the two writes it supports: insertion and stock
//! adjustment.
//!
//! ## Stock Adjustment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                                │
//! │                                                                         │
//! │  In memory: stock_level = 10, delta = -3                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UPDATE products SET stock_level = 7 WHERE name = 'Widget'             │
//! │       │                 (absolute value, keyed by name)                │
//! │       ▼                                                                 │
//! │  COMMIT, then in memory: stock_level = 7                               │
//! │                                                                         │
//! │  Two records for the same product that adjust concurrently lose an    │
//! │  update: the last absolute write wins.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Recording a sale does not change stock; callers adjust it explicitly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::Store;
use stockroom_core::validation::{validate_category, validate_price, validate_product_name};
use stockroom_core::{Money, ProductRow, ValidationError};

/// A product as held by the caller.
///
/// The storage-assigned id is not read back on insert; use
/// [`Product::find_by_name`] to fetch the persisted row.
///
/// ## Usage
/// ```rust,ignore
/// let mut product = Product::new("Sample Product", "Electronics", Money::from_cents(9999), 10);
/// product.add(&mut store).await?;
/// product.update_stock(&mut store, -2).await?;
/// assert_eq!(product.stock_level, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub stock_level: i64,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        stock_level: i64,
    ) -> Self {
        Product {
            name: name.into(),
            category: category.into(),
            price,
            stock_level,
        }
    }

    /// Inserts the product and commits.
    ///
    /// ## Returns
    /// * `Ok(())` - Row inserted and committed
    /// * `Err(DbError::Validation)` - Empty name/category or negative price
    /// * `Err(DbError::UniqueViolation)` - Name already exists
    pub async fn add(&self, store: &mut Store) -> DbResult<()> {
        validate_product_name(&self.name)?;
        validate_category(&self.category)?;
        validate_price(self.price)?;

        debug!(name = %self.name, price = %self.price, stock = self.stock_level, "Adding product");

        store
            .execute(
                sqlx::query(
                    r#"
                    INSERT INTO products (name, category, price_cents, stock_level)
                    VALUES (?, ?, ?, ?)
                    "#,
                )
                .bind(&self.name)
                .bind(&self.category)
                .bind(self.price)
                .bind(self.stock_level),
            )
            .await
            .map_err(|e| match e {
                DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &self.name),
                other => other,
            })?;

        store.commit().await
    }

    /// Applies `delta` to the stock level and writes the new absolute value.
    ///
    /// The in-memory level changes only after the commit succeeds.
    ///
    /// ## Arguments
    /// * `delta` - Change in stock (negative for sales, positive for restocking)
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No product with this name
    /// * `Err(DbError::Validation)` - The new level does not fit in an `i64`
    pub async fn update_stock(&mut self, store: &mut Store, delta: i64) -> DbResult<()> {
        let new_level = self
            .stock_level
            .checked_add(delta)
            .ok_or_else(|| ValidationError::overflow("stock_level"))?;

        debug!(name = %self.name, delta, new_level, "Updating stock");

        let had_pending = store.has_pending_writes();
        let rows = store
            .execute(
                sqlx::query("UPDATE products SET stock_level = ? WHERE name = ?")
                    .bind(new_level)
                    .bind(&self.name),
            )
            .await?;

        if rows == 0 {
            if !had_pending {
                store.rollback().await?;
            }
            return Err(DbError::not_found("Product", &self.name));
        }

        store.commit().await?;
        self.stock_level = new_level;
        Ok(())
    }

    /// Gets a product by its unique name.
    pub async fn find_by_name(store: &mut Store, name: &str) -> DbResult<Option<ProductRow>> {
        store
            .query_one(
                sqlx::query_as::<_, ProductRow>(
                    r#"
                    SELECT id, name, category, price_cents, stock_level
                    FROM products
                    WHERE name = ?
                    "#,
                )
                .bind(name),
            )
            .await
    }

    /// Gets a product by its storage id.
    pub async fn find_by_id(store: &mut Store, id: i64) -> DbResult<Option<ProductRow>> {
        store
            .query_one(
                sqlx::query_as::<_, ProductRow>(
                    r#"
                    SELECT id, name, category, price_cents, stock_level
                    FROM products
                    WHERE id = ?
                    "#,
                )
                .bind(id),
            )
            .await
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            name: row.name,
            category: row.category,
            price: row.price,
            stock_level: row.stock_level,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
