//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate holds the arithmetic and types behind the inventory tracker,
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    demo binary / library caller                 │   │
//! │  │    add product ──► record sale ──► forecast ──► low-stock scan  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               stockroom-db (Store, records, reports)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ forecast  │  │ validation│  │   │
//! │  │   │ row types │  │  Money    │  │ moving    │  │   rules   │  │   │
//! │  │   │ Discount  │  │  revenue  │  │ average   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Row types and `Discount`
//! - [`money`] - Money type with integer arithmetic and sale revenue
//! - [`forecast`] - Moving-average demand forecast
//! - [`error`] - Domain error types
//! - [`validation`] - Record validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{revenue, Discount, Money};
//!
//! let price = Money::from_cents(9999); // $99.99
//! let total = revenue(price, 2, Discount::from_percent(10)).unwrap();
//! assert_eq!(total.cents(), 17998);
//! ```

pub mod error;
pub mod forecast;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use forecast::{Forecast, DEFAULT_FORECAST_PERIOD};
pub use money::{revenue, Money};
pub use types::*;

/// Products with stock strictly below this level are reported as low.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;
