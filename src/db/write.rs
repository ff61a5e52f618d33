use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use sqlx::sqlite::SqlitePool;

use crate::models::TradeRecord;

pub async fn insert_trade(trade: &TradeRecord, connection: &SqlitePool) -> Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO trades
        (symbol, action, price, quantity, total, executed_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(trade.symbol())
    .bind(trade.action().to_string())
    .bind(trade.price().to_f64())
    .bind(trade.quantity().to_f64())
    .bind(trade.total().to_f64())
    .bind(trade.timestamp().to_rfc3339())
    .execute(connection)
    .await?
    .last_insert_rowid();

    Ok(id)
}
