//! # Inventory Demo
//!
//! Walks through the library once against a real database file.
//!
//! ## Usage
//! ```bash
//! STOCKROOM_DB_PATH=./inventory.db cargo run -p stockroom-db --bin demo
//!
//! # JSON forecast output, more logging
//! RUST_LOG=debug STOCKROOM_OUTPUT=json STOCKROOM_DB_PATH=./inventory.db cargo run -p stockroom-db --bin demo
//! ```
//!
//! ## Steps
//! 1. Add "Sample Product" (Electronics, $99.99, stock 10) unless it exists
//! 2. Record a sale of 2 at 10% off
//! 3. Print the demand forecast
//! 4. Announce low-stock products on stdout
//! 5. Close the store

use tracing::info;
use tracing_subscriber::EnvFilter;

use stockroom_core::{Discount, Money};
use stockroom_db::{
    check_low_stock_and_order, forecast_stock_demand, ConsoleNotifier, OutputFormat, Product,
    ReportConfig, Sale, Store, StoreConfig,
};

const SAMPLE_NAME: &str = "Sample Product";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let store_config = StoreConfig::from_env()?;
    let report_config = ReportConfig::from_env()?;

    let mut store = Store::connect(store_config).await?;
    info!(path = %store.database_path().display(), "Connected");

    // Add a product
    let product = match Product::find_by_name(&mut store, SAMPLE_NAME).await? {
        Some(row) => {
            println!("⚠ {} already exists (id {})", row.name, row.id);
            row
        }
        None => {
            Product::new(SAMPLE_NAME, "Electronics", Money::from_cents(9999), 10)
                .add(&mut store)
                .await?;
            Product::find_by_name(&mut store, SAMPLE_NAME)
                .await?
                .ok_or("product vanished after insert")?
        }
    };
    println!("✓ Product: {} at {} (stock {})", product.name, product.price, product.stock_level);

    // Record a sale with a discount
    let revenue = Sale::new(product.id, 2)
        .with_discount(Discount::from_percent(10))
        .record(&mut store)
        .await?;
    println!("✓ Sale recorded: revenue {}", revenue);

    // Forecast stock demand
    let forecast =
        forecast_stock_demand(&mut store, product.id, report_config.forecast_period).await?;
    match report_config.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&forecast)?),
        OutputFormat::Text => println!("Forecasted demand: {}", forecast),
    }

    // Check for low stock
    let mut notifier = ConsoleNotifier::stdout();
    check_low_stock_and_order(&mut store, report_config.low_stock_threshold, &mut notifier)
        .await?;

    store.close().await?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every statement
/// - Default: `info,stockroom=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockroom=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
