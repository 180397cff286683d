//! # Restock Notifications
//!
//! Where the low-stock scan sends each product it finds.
//!
//! ```text
//! check_low_stock_and_order
//!      │  for each row with stock_level < threshold
//!      ▼
//! dyn RestockNotifier
//!      ├── LogNotifier        → tracing warn!
//!      ├── ConsoleNotifier    → "Ordering more of Widget. Current stock: 2."
//!      ├── NoopNotifier       → nothing
//!      └── Vec<LowStockItem>  → collected for the caller
//! ```
//!
//! Notifying is announcement only: no implementation places or persists a
//! supplier order. A failed announcement stops the scan and reaches the
//! caller as `DbError::NotifyFailed`.

use std::io::{self, Stdout, Write};

use stockroom_core::LowStockItem;
use tracing::warn;

/// Receives one call per low-stock product.
pub trait RestockNotifier {
    fn notify(&mut self, item: &LowStockItem) -> io::Result<()>;
}

/// The line printed for a low-stock product.
pub fn restock_message(item: &LowStockItem) -> String {
    format!(
        "Ordering more of {}. Current stock: {}.",
        item.name, item.stock_level
    )
}

/// Emits a `warn!` event per product.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl RestockNotifier for LogNotifier {
    fn notify(&mut self, item: &LowStockItem) -> io::Result<()> {
        warn!(
            product_id = item.id,
            product = %item.name,
            stock_level = item.stock_level,
            "Low stock"
        );
        Ok(())
    }
}

/// Writes one line per product, stdout by default.
#[derive(Debug)]
pub struct ConsoleNotifier<W = Stdout> {
    out: W,
}

impl ConsoleNotifier<Stdout> {
    pub fn stdout() -> Self {
        ConsoleNotifier { out: io::stdout() }
    }
}

impl Default for ConsoleNotifier<Stdout> {
    fn default() -> Self {
        ConsoleNotifier::stdout()
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        ConsoleNotifier { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RestockNotifier for ConsoleNotifier<W> {
    fn notify(&mut self, item: &LowStockItem) -> io::Result<()> {
        writeln!(self.out, "{}", restock_message(item))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl RestockNotifier for NoopNotifier {
    fn notify(&mut self, _item: &LowStockItem) -> io::Result<()> {
        Ok(())
    }
}

impl RestockNotifier for Vec<LowStockItem> {
    fn notify(&mut self, item: &LowStockItem) -> io::Result<()> {
        self.push(item.clone());
        Ok(())
    }
}
