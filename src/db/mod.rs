pub mod init;
pub mod write;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::models::TradeRecord;

/// Best-effort trade log backed by SQLite.
///
/// The session commits to in-memory state first and enqueues `save_trade` as
/// a background task; a failed save is logged and never rolled back.
#[derive(Clone, Debug)]
pub struct TradeStore {
    connection: SqlitePool,
}

impl TradeStore {
    pub async fn open(path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let connection = SqlitePool::connect_with(options).await?;

        init::create_trades(&connection).await?;

        Ok(Self { connection })
    }

    pub async fn in_memory() -> Result<Self> {
        // A pooled connection gets its own :memory: database, so cap at one.
        let connection = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        init::create_trades(&connection).await?;

        Ok(Self { connection })
    }

    pub async fn save_trade(&self, trade: &TradeRecord) -> Result<i64> {
        write::insert_trade(trade, &self.connection).await
    }

    pub async fn trade_count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trades")
            .fetch_one(&self.connection)
            .await?;

        Ok(row.0)
    }
}
