//! # stockroom-db: Database Layer for Stockroom
//!
//! Records products, sales and stock levels in SQLite and derives two
//! reports from them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  Caller (demo binary, application)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockroom-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │   Records     │    │   Reports    │  │   │
//! │  │   │  (store.rs)   │    │ (repository/) │    │  (report/)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ 1 connection  │◄───│ Product       │    │ forecast     │  │   │
//! │  │   │ execute/query │    │ Sale          │    │ low stock ──►│──┼─► RestockNotifier
//! │  │   │ commit/close  │◄───│ Supplier      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │          products • sales • suppliers                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The storage handle
//! - [`schema`] - Table bootstrap
//! - [`config`] - Store and report configuration
//! - [`error`] - Database error types
//! - [`repository`] - Product, sale and supplier records
//! - [`report`] - Demand forecast and low-stock scan
//! - [`notify`] - Where low-stock announcements go
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_db::{check_low_stock_and_order, LogNotifier, Product, Sale, Store, StoreConfig};
//!
//! let mut store = Store::connect(StoreConfig::from_env()?).await?;
//!
//! Product::new("Widget", "Hardware", Money::from_cents(1999), 10).add(&mut store).await?;
//! Sale::new(1, 2).record(&mut store).await?;
//!
//! check_low_stock_and_order(&mut store, 5, &mut LogNotifier).await?;
//! store.close().await?;
//! ```

pub mod config;
pub mod error;
pub mod notify;
pub mod report;
pub mod repository;
pub mod schema;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, OutputFormat, ReportConfig, StoreConfig};
pub use error::{DbError, DbResult, ErrorKind};
pub use notify::{ConsoleNotifier, LogNotifier, NoopNotifier, RestockNotifier};
pub use report::{check_low_stock_and_order, forecast_stock_demand};
pub use store::Store;

// Record re-exports for convenience
pub use repository::product::Product;
pub use repository::sale::Sale;
pub use repository::supplier::Supplier;
