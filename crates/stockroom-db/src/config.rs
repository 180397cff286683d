//! # Store Configuration
//!
//! Connection settings for the [`Store`](crate::Store), built in code or
//! loaded from environment variables.
//!
//! ## Environment Variables
//! | Variable                        | Required | Default |
//! |---------------------------------|----------|---------|
//! | `STOCKROOM_DB_PATH`             | yes      |         |
//! | `STOCKROOM_CREATE_IF_MISSING`   | no       | `true`  |
//! | `STOCKROOM_BOOTSTRAP_SCHEMA`    | no       | `true`  |
//! | `STOCKROOM_FORECAST_PERIOD`     | no       | `3`     |
//! | `STOCKROOM_LOW_STOCK_THRESHOLD` | no       | `5`     |
//! | `STOCKROOM_OUTPUT`              | no       | `text`  |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use stockroom_core::{DEFAULT_FORECAST_PERIOD, DEFAULT_LOW_STOCK_THRESHOLD};

pub const DB_PATH_VAR: &str = "STOCKROOM_DB_PATH";
pub const CREATE_IF_MISSING_VAR: &str = "STOCKROOM_CREATE_IF_MISSING";
pub const BOOTSTRAP_SCHEMA_VAR: &str = "STOCKROOM_BOOTSTRAP_SCHEMA";
pub const FORECAST_PERIOD_VAR: &str = "STOCKROOM_FORECAST_PERIOD";
pub const LOW_STOCK_THRESHOLD_VAR: &str = "STOCKROOM_LOW_STOCK_THRESHOLD";
pub const OUTPUT_VAR: &str = "STOCKROOM_OUTPUT";

/// Path that selects a private in-memory SQLite database.
pub const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Store Configuration
// =============================================================================

/// Store connection configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./inventory.db")
///     .create_if_missing(false)
///     .bootstrap_schema(true);
/// let store = Store::connect(config).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// Create the database file when it does not exist.
    /// Default: true
    pub create_if_missing: bool,

    /// Enforce `sales.product_id → products.id`.
    /// Default: true
    pub foreign_keys: bool,

    /// Create the tables on connect when they are missing.
    /// Default: true
    pub bootstrap_schema: bool,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            create_if_missing: true,
            foreign_keys: true,
            bootstrap_schema: true,
        }
    }

    /// Creates an in-memory configuration (for testing).
    ///
    /// Each connection to `:memory:` gets its own empty database, so data
    /// lives exactly as long as the [`Store`](crate::Store).
    pub fn in_memory() -> Self {
        StoreConfig::new(IN_MEMORY)
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    pub fn bootstrap_schema(mut self, run: bool) -> Self {
        self.bootstrap_schema = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }

    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of touching the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(DB_PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingRequired(DB_PATH_VAR.to_string()))?;

        Ok(StoreConfig::new(path)
            .create_if_missing(parse_or(&lookup, CREATE_IF_MISSING_VAR, true)?)
            .bootstrap_schema(parse_or(&lookup, BOOTSTRAP_SCHEMA_VAR, true)?))
    }
}

// =============================================================================
// Report Configuration
// =============================================================================

/// How report results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain sentences
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

/// Parameters for the two reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    pub forecast_period: u32,
    pub low_stock_threshold: i64,
    pub output: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            forecast_period: DEFAULT_FORECAST_PERIOD,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            output: OutputFormat::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let forecast_period = parse_or(&lookup, FORECAST_PERIOD_VAR, DEFAULT_FORECAST_PERIOD)?;
        if forecast_period == 0 {
            return Err(ConfigError::InvalidValue(FORECAST_PERIOD_VAR.to_string()));
        }

        Ok(ReportConfig {
            forecast_period,
            low_stock_threshold: parse_or(
                &lookup,
                LOW_STOCK_THRESHOLD_VAR,
                DEFAULT_LOW_STOCK_THRESHOLD,
            )?,
            output: parse_or(&lookup, OUTPUT_VAR, OutputFormat::default())?,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
