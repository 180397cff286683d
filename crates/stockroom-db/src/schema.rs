//! # Schema Bootstrap
//!
//! Creates the inventory tables when they are missing.
//!
//! ## How Bootstrap Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bootstrap Process                                  │
//! │                                                                         │
//! │  Store::connect(config)                                                │
//! │       │                                                                 │
//! │       ├── bootstrap_schema = false? → skip, tables must already exist  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CREATE TABLE IF NOT EXISTS products                                   │
//! │  CREATE TABLE IF NOT EXISTS sales      (FK → products.id)              │
//! │  CREATE TABLE IF NOT EXISTS suppliers                                  │
//! │  CREATE INDEX IF NOT EXISTS idx_sales_product_date                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no version table and no upgrade path: every statement is
//! idempotent and existing tables are left exactly as they are.

use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::error::DbResult;

/// Tables the store reads and writes.
pub const TABLES: [&str; 3] = ["products", "sales", "suppliers"];

const STATEMENTS: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT    NOT NULL UNIQUE,
        category    TEXT    NOT NULL,
        price_cents INTEGER NOT NULL,
        stock_level INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        product_id    INTEGER NOT NULL REFERENCES products(id),
        quantity      INTEGER NOT NULL,
        sale_date     TEXT    NOT NULL,
        revenue_cents INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS suppliers (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        name  TEXT NOT NULL,
        email TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_sales_product_date
        ON sales (product_id, sale_date DESC)
    "#,
];

/// Creates any missing tables and indexes.
///
/// Idempotent: safe to run on every connect.
pub async fn bootstrap(conn: &mut SqliteConnection) -> DbResult<()> {
    info!("Bootstrapping inventory schema");

    for statement in STATEMENTS {
        sqlx::query(statement).execute(&mut *conn).await?;
    }

    debug!(tables = ?TABLES, "Schema ready");
    Ok(())
}

/// Returns the expected tables that do not exist yet.
///
/// ## Usage
/// For diagnostics, and to check a store opened with bootstrap disabled.
pub async fn missing_tables(conn: &mut SqliteConnection) -> DbResult<Vec<&'static str>> {
    let mut missing = Vec::new();

    for table in TABLES {
        let found: Option<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(table)
                .fetch_optional(&mut *conn)
                .await?;

        if found.is_none() {
            missing.push(table);
        }
    }

    Ok(missing)
}
