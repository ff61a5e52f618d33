use log::warn;
use rust_decimal::Decimal;

use crate::{
    app::ledger::{Ledger, LedgerError},
    db::TradeStore,
    models::{TradeAction, TradeRecord},
    services::{DataMode, DataService},
};

/// Per-session context: data provider, ledger and optional trade store,
/// owned by the top-level caller and threaded explicitly instead of living
/// in a process-wide singleton.
pub struct TradingSession {
    data: DataService,
    ledger: Ledger,
    store: Option<TradeStore>,
}

impl TradingSession {
    pub fn new(data: DataService, ledger: Ledger, store: Option<TradeStore>) -> Self {
        Self {
            data,
            ledger,
            store,
        }
    }

    pub fn data(&self) -> &DataService {
        &self.data
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn mode(&self) -> DataMode {
        self.data.mode()
    }

    /// Flip mock/real. Real mode requires a configured market-data key;
    /// without one the session stays in mock mode.
    pub fn toggle_mode(&mut self) -> DataMode {
        let next = match self.data.mode() {
            DataMode::Mock if self.data.can_go_real() => DataMode::Real,
            _ => DataMode::Mock,
        };
        self.data.set_mode(next);
        next
    }

    /// Settle a trade at an already-captured quote price.
    ///
    /// The ledger commits synchronously; persistence is enqueued as a
    /// best-effort background task with no rollback on failure.
    pub fn execute_trade(
        &mut self,
        symbol: &str,
        action: TradeAction,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<TradeRecord, LedgerError> {
        let record = self.ledger.apply_trade(symbol, action, quantity, price)?;

        if let Some(store) = &self.store {
            let store = store.clone();
            let trade = record.clone();
            tokio::spawn(async move {
                if let Err(err) = store.save_trade(&trade).await {
                    warn!("Failed to persist trade for {}: {:#}", trade.symbol(), err);
                }
            });
        }

        Ok(record)
    }
}
