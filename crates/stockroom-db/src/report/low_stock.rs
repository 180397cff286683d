//! Low-stock scan.

use tracing::{debug, info};

use crate::error::DbResult;
use crate::notify::RestockNotifier;
use crate::store::Store;
use stockroom_core::LowStockItem;

/// Lists products whose stock is strictly below `threshold` and hands each
/// one to `notifier`, in id order.
///
/// Despite the name, no supplier order is created or persisted; the scan
/// only reads and announces.
///
/// ## Returns
/// The products that were announced.
///
/// ## Errors
/// `DbError::NotifyFailed` when the notifier cannot deliver; products after
/// the failing one are not announced.
pub async fn check_low_stock_and_order(
    store: &mut Store,
    threshold: i64,
    notifier: &mut dyn RestockNotifier,
) -> DbResult<Vec<LowStockItem>> {
    let items = store
        .query_many(
            sqlx::query_as::<_, LowStockItem>(
                r#"
                SELECT id, name, stock_level
                FROM products
                WHERE stock_level < ?
                ORDER BY id
                "#,
            )
            .bind(threshold),
        )
        .await?;

    for item in &items {
        debug!(product_id = item.id, stock_level = item.stock_level, "Below threshold");
        notifier.notify(item)?;
    }

    info!(threshold, count = items.len(), "Low-stock scan complete");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::error::ErrorKind;
    use crate::notify::{ConsoleNotifier, NoopNotifier};
    use crate::repository::product::Product;
    use stockroom_core::{Money, DEFAULT_LOW_STOCK_THRESHOLD};

    async fn store_with_stock(levels: &[(&str, i64)]) -> Store {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();
        for (name, stock) in levels {
            Product::new(*name, "Misc", Money::from_cents(100), *stock)
                .add(&mut store)
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_reports_only_products_below_threshold() {
        let mut store = store_with_stock(&[("Low", 2), ("Plenty", 10)]).await;
        let mut seen: Vec<LowStockItem> = Vec::new();

        let items = check_low_stock_and_order(&mut store, 5, &mut seen)
            .await
            .unwrap();

        assert_eq!(
            items,
            vec![LowStockItem {
                id: 1,
                name: "Low".to_string(),
                stock_level: 2
            }]
        );
        assert_eq!(seen, items);
    }

    #[tokio::test]
    async fn test_threshold_is_strict() {
        let mut store = store_with_stock(&[("AtThreshold", 5), ("Below", 4), ("Negative", -1)]).await;

        let items = check_low_stock_and_order(&mut store, DEFAULT_LOW_STOCK_THRESHOLD, &mut NoopNotifier)
            .await
            .unwrap();

        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Below", "Negative"]);
    }

    #[tokio::test]
    async fn test_console_output() {
        let mut store = store_with_stock(&[("Sample Product", 3), ("Other", 1)]).await;
        let mut console = ConsoleNotifier::new(Vec::new());

        check_low_stock_and_order(&mut store, 5, &mut console)
            .await
            .unwrap();

        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(
            out,
            "Ordering more of Sample Product. Current stock: 3.\n\
             Ordering more of Other. Current stock: 1.\n"
        );
    }

    #[tokio::test]
    async fn test_notifier_failure_reaches_caller() {
        struct Unreachable;

        impl RestockNotifier for Unreachable {
            fn notify(&mut self, _item: &LowStockItem) -> std::io::Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
        }

        let mut store = store_with_stock(&[("Low", 1)]).await;

        let err = check_low_stock_and_order(&mut store, 5, &mut Unreachable)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Notify);
    }

    #[tokio::test]
    async fn test_scan_writes_nothing() {
        let mut store = store_with_stock(&[("Low", 0)]).await;

        check_low_stock_and_order(&mut store, 5, &mut NoopNotifier)
            .await
            .unwrap();

        assert!(!store.has_pending_writes());
        let row = Product::find_by_name(&mut store, "Low").await.unwrap().unwrap();
        assert_eq!(row.stock_level, 0);
    }
}
