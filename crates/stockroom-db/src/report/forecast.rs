//! Demand forecast over a product's most recent sales.

use tracing::debug;

use crate::error::DbResult;
use crate::store::Store;
use stockroom_core::forecast::{validate_period, Forecast};
use stockroom_core::QuantityRow;

/// Forecasts demand as the mean quantity of the last `period` sales.
///
/// Sales are ordered by `sale_date` descending, ties broken by newest id.
/// Fewer than `period` sales yields [`Forecast::InsufficientData`].
///
/// ## Errors
/// `DbError::Validation` when `period` is zero.
///
/// ## Example
/// ```rust,ignore
/// match forecast_stock_demand(&mut store, product_id, DEFAULT_FORECAST_PERIOD).await? {
///     Forecast::MovingAverage { average, .. } => println!("expect {average} per sale"),
///     Forecast::InsufficientData { .. } => println!("not enough history"),
/// }
/// ```
pub async fn forecast_stock_demand(
    store: &mut Store,
    product_id: i64,
    period: u32,
) -> DbResult<Forecast> {
    validate_period(period)?;

    let rows = store
        .query_many(
            sqlx::query_as::<_, QuantityRow>(
                r#"
                SELECT quantity FROM sales
                WHERE product_id = ?
                ORDER BY sale_date DESC, id DESC
                LIMIT ?
                "#,
            )
            .bind(product_id)
            .bind(period as i64),
        )
        .await?;

    let quantities: Vec<i64> = rows.into_iter().map(|r| r.quantity).collect();
    let forecast = Forecast::from_quantities(&quantities, period)?;

    debug!(product_id, period, ?forecast, "Forecast computed");
    Ok(forecast)
}
