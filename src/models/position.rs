use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One held instrument or the cash balance. At most one position per symbol.
#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize)]
pub struct Position {
    symbol: String,
    name: String,
    quantity: Decimal,
    average_cost: Decimal,
    kind: AssetKind,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize, strum_macros::Display)]
pub enum AssetKind {
    Stock,
    Cash,
    Crypto,
    Other,
}

impl Position {
    pub fn new(
        symbol: String,
        name: String,
        quantity: Decimal,
        average_cost: Decimal,
        kind: AssetKind,
    ) -> Self {
        Self {
            symbol,
            name,
            quantity,
            average_cost,
            kind,
        }
    }

    /// Merge a bought lot into this position with weighted-average cost.
    /// `total` is the execution amount (price * quantity).
    pub fn add_lot(&mut self, quantity: Decimal, total: Decimal) {
        let new_quantity = self.quantity + quantity;
        self.average_cost = (self.quantity * self.average_cost + total) / new_quantity;
        self.quantity = new_quantity;
    }

    /// Reduce the held quantity. Cost basis is unchanged by selling.
    pub fn reduce(&mut self, quantity: Decimal) {
        self.quantity -= quantity;
    }

    /// Adjust the balance of a cash position by a signed delta.
    pub fn adjust(&mut self, delta: Decimal) {
        self.quantity += delta;
    }

    pub fn market_value(&self, price: Decimal) -> Decimal {
        self.quantity * price
    }
}
