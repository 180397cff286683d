//! # Demand Forecast
//!
//! Trailing moving average over the most recent sale quantities.
//!
//! ```text
//! sales for product 1, newest first:   6   4   2   9   1 ...
//!                                      └───┬───┘
//!                                     period = 3
//!                                          │
//!                                          ▼
//!                           (6 + 4 + 2) / 3 = 4.0
//! ```
//!
//! Not weighted, not seasonal. When fewer than `period` sales exist the
//! result is [`Forecast::InsufficientData`], never a magic number.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Number of recent sales averaged when the caller does not specify one.
pub const DEFAULT_FORECAST_PERIOD: u32 = 3;

/// Outcome of a demand forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Forecast {
    /// Mean quantity of the last `period` sales.
    MovingAverage { period: u32, average: f64 },

    /// The product has fewer sales than the requested period.
    InsufficientData { required: u32, available: u32 },
}

impl Forecast {
    /// Builds a forecast from quantities already limited to `period` rows.
    ///
    /// ## Errors
    /// `period == 0` has no meaningful average and is rejected.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::forecast::Forecast;
    ///
    /// let forecast = Forecast::from_quantities(&[2, 4, 6], 3).unwrap();
    /// assert_eq!(forecast.average(), Some(4.0));
    ///
    /// let short = Forecast::from_quantities(&[2, 4], 3).unwrap();
    /// assert!(short.is_insufficient());
    /// ```
    pub fn from_quantities(quantities: &[i64], period: u32) -> Result<Self, ValidationError> {
        validate_period(period)?;

        let available = quantities.len();
        if available < period as usize {
            return Ok(Forecast::InsufficientData {
                required: period,
                available: available as u32,
            });
        }

        // i128 holds the sum of any u32-sized window of i64 quantities
        let total: i128 = quantities
            .iter()
            .take(period as usize)
            .map(|&q| q as i128)
            .sum();
        Ok(Forecast::MovingAverage {
            period,
            average: total as f64 / period as f64,
        })
    }

    /// The forecast value, if there was enough data.
    pub fn average(&self) -> Option<f64> {
        match self {
            Forecast::MovingAverage { average, .. } => Some(*average),
            Forecast::InsufficientData { .. } => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Forecast::InsufficientData { .. })
    }
}

impl fmt::Display for Forecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Forecast::MovingAverage { average, .. } => write!(f, "{average}"),
            Forecast::InsufficientData { .. } => write!(f, "Not enough data to forecast."),
        }
    }
}

/// Rejects a zero-length forecast window.
pub fn validate_period(period: u32) -> Result<(), ValidationError> {
    if period == 0 {
        return Err(ValidationError::MustBePositive {
            field: "period".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
