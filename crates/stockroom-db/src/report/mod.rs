//! # Reports
//!
//! Read-only derived views over the store.
//!
//! - [`forecast_stock_demand`] - moving average of recent sale quantities
//! - [`check_low_stock_and_order`] - list and announce products below a threshold

pub mod forecast;
pub mod low_stock;

pub use forecast::forecast_stock_demand;
pub use low_stock::check_low_stock_and_order;
