use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// One OHLCV bar. `time` is milliseconds since the Unix epoch.
#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct Candle {
    time: i64,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: i64,
}

#[derive(Clone, Copy, Debug, EnumIter, Eq, PartialEq)]
pub enum TimeRange {
    Day,
    Month,
    Year,
}

impl TimeRange {
    pub fn label(&self) -> &str {
        match self {
            TimeRange::Day => "1D",
            TimeRange::Month => "1M",
            TimeRange::Year => "1Y",
        }
    }

    /// Number of synthetic candles served for this range in mock mode.
    pub fn candle_count(&self) -> usize {
        match self {
            TimeRange::Day => 24,
            TimeRange::Month => 30,
            TimeRange::Year => 250,
        }
    }
}
