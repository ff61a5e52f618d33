use chrono::{DateTime, Local};
use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An immutable record of one executed simulated trade.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub struct TradeRecord {
    symbol: String,
    action: TradeAction,
    price: Decimal,
    quantity: Decimal,
    timestamp: DateTime<Local>,
    total: Decimal,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize, strum_macros::Display)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeRecord {
    pub fn new(symbol: String, action: TradeAction, price: Decimal, quantity: Decimal) -> Self {
        Self {
            symbol,
            action,
            price,
            quantity,
            timestamp: Local::now(),
            total: price * quantity,
        }
    }

    pub fn with_timestamp(
        symbol: String,
        action: TradeAction,
        price: Decimal,
        quantity: Decimal,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            symbol,
            action,
            price,
            quantity,
            timestamp,
            total: price * quantity,
        }
    }
}
