use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::models::{AssetKind, Position, TradeAction, TradeRecord};

/// Rejections surfaced by [`Ledger::apply_trade`]. All are recoverable and
/// leave the ledger untouched.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("quantity must be > 0, got {0}")]
    InvalidQuantity(Decimal),
    #[error("price must be > 0, got {0}")]
    InvalidPrice(Decimal),
    #[error("symbol must not be empty")]
    EmptySymbol,
    #[error("the cash symbol {0} cannot be traded")]
    CashSymbolNotTradable(String),
    #[error("insufficient holdings for {symbol}: held {held}, requested {requested}")]
    InsufficientHoldings {
        symbol: String,
        held: Decimal,
        requested: Decimal,
    },
    #[error("insufficient cash: available {available}, required {required}")]
    InsufficientCash {
        available: Decimal,
        required: Decimal,
    },
}

/// Whether a Buy may drive the cash position negative.
///
/// `Margin` debits cash unconditionally, treating it as unconstrained
/// margin. `Strict` rejects a Buy the cash balance cannot cover.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CashPolicy {
    #[default]
    Margin,
    Strict,
}

/// The authoritative in-memory store of positions and trade history.
///
/// Sole mutator of both; `apply_trade` is a pure, synchronous,
/// all-or-nothing state transition with no I/O. Quote capture happens
/// before the call, at the caller.
#[derive(Clone, Debug)]
pub struct Ledger {
    positions: Vec<Position>,
    trades: Vec<TradeRecord>,
    cash_symbol: String,
    cash_policy: CashPolicy,
}

impl Ledger {
    pub fn new(cash_symbol: String, cash_policy: CashPolicy) -> Self {
        Self {
            positions: Vec::new(),
            trades: Vec::new(),
            cash_symbol,
            cash_policy,
        }
    }

    pub fn with_state(
        cash_symbol: String,
        cash_policy: CashPolicy,
        positions: Vec<Position>,
        trades: Vec<TradeRecord>,
    ) -> Self {
        Self {
            positions,
            trades,
            cash_symbol,
            cash_policy,
        }
    }

    pub fn positions(&self) -> &Vec<Position> {
        &self.positions
    }

    /// Trade log, most recent first.
    pub fn trades(&self) -> &Vec<TradeRecord> {
        &self.trades
    }

    pub fn cash_symbol(&self) -> &str {
        &self.cash_symbol
    }

    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.symbol().as_str() == symbol)
    }

    pub fn cash_balance(&self) -> Decimal {
        self.positions
            .iter()
            .find(|p| *p.symbol() == self.cash_symbol)
            .map(|p| *p.quantity())
            .unwrap_or(Decimal::ZERO)
    }

    /// Total portfolio value at cost basis, cash included.
    pub fn total_value(&self) -> Decimal {
        self.positions
            .iter()
            .map(|p| *p.quantity() * *p.average_cost())
            .sum()
    }

    /// Settle one trade against the ledger.
    ///
    /// Validates inputs, applies weighted-average cost accounting on Buy,
    /// reduces or removes the position on Sell, adjusts the cash position by
    /// `price * quantity`, and appends a `TradeRecord` to the front of the
    /// log. On any rejection no state changes.
    pub fn apply_trade(
        &mut self,
        symbol: &str,
        action: TradeAction,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<TradeRecord, LedgerError> {
        if symbol.is_empty() {
            return Err(LedgerError::EmptySymbol);
        }
        // Trading the settlement currency against itself would corrupt the
        // cash position's by-convention average cost of 1.
        if symbol == self.cash_symbol {
            return Err(LedgerError::CashSymbolNotTradable(symbol.to_string()));
        }
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::InvalidQuantity(quantity));
        }
        if price <= Decimal::ZERO {
            return Err(LedgerError::InvalidPrice(price));
        }

        let total = price * quantity;

        match action {
            TradeAction::Buy => {
                if self.cash_policy == CashPolicy::Strict {
                    let available = self.cash_balance();
                    if available < total {
                        return Err(LedgerError::InsufficientCash {
                            available,
                            required: total,
                        });
                    }
                }

                match self
                    .positions
                    .iter()
                    .position(|p| p.symbol().as_str() == symbol)
                {
                    Some(idx) => self.positions[idx].add_lot(quantity, total),
                    None => self.positions.push(Position::new(
                        symbol.to_string(),
                        symbol.to_string(),
                        quantity,
                        price,
                        AssetKind::Stock,
                    )),
                }
                self.adjust_cash(-total);
            }
            TradeAction::Sell => {
                let held = self
                    .position(symbol)
                    .map(|p| *p.quantity())
                    .unwrap_or(Decimal::ZERO);
                if held < quantity {
                    return Err(LedgerError::InsufficientHoldings {
                        symbol: symbol.to_string(),
                        held,
                        requested: quantity,
                    });
                }

                let idx = self
                    .positions
                    .iter()
                    .position(|p| p.symbol().as_str() == symbol)
                    .ok_or_else(|| LedgerError::InsufficientHoldings {
                        symbol: symbol.to_string(),
                        held: Decimal::ZERO,
                        requested: quantity,
                    })?;
                self.positions[idx].reduce(quantity);

                if self.positions[idx].quantity().is_zero() {
                    self.positions.remove(idx);
                }
                self.adjust_cash(total);
            }
        }

        let record = TradeRecord::new(symbol.to_string(), action, price, quantity);
        self.trades.insert(0, record.clone());

        Ok(record)
    }

    fn adjust_cash(&mut self, delta: Decimal) {
        match self
            .positions
            .iter()
            .position(|p| *p.symbol() == self.cash_symbol)
        {
            Some(idx) => self.positions[idx].adjust(delta),
            None => self.positions.push(Position::new(
                self.cash_symbol.clone(),
                self.cash_symbol.clone(),
                delta,
                dec!(1),
                AssetKind::Cash,
            )),
        }
    }
}
