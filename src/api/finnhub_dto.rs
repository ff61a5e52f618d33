use anyhow::{Error, Result};
use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{Candle, Quote};

#[derive(Debug, Deserialize, Getters)]
pub struct FinnhubQuoteDto {
    c: Decimal,
    d: Option<Decimal>,
    dp: Option<Decimal>,
    h: Decimal,
    l: Decimal,
    o: Decimal,
    pc: Decimal,
}

impl FinnhubQuoteDto {
    pub fn to_quote(&self, symbol: &str) -> Quote {
        Quote::new(
            symbol.to_string(),
            self.c,
            self.d.unwrap_or(Decimal::ZERO),
            self.dp.unwrap_or(Decimal::ZERO),
            self.h,
            self.l,
            self.o,
            self.pc,
        )
    }
}

/// Column-oriented candle payload; `s` is "ok" or "no_data".
#[derive(Debug, Deserialize, Getters)]
pub struct FinnhubCandleDto {
    s: String,
    #[serde(default)]
    t: Vec<i64>,
    #[serde(default)]
    o: Vec<Decimal>,
    #[serde(default)]
    h: Vec<Decimal>,
    #[serde(default)]
    l: Vec<Decimal>,
    #[serde(default)]
    c: Vec<Decimal>,
    #[serde(default)]
    v: Vec<i64>,
}

impl FinnhubCandleDto {
    pub fn to_candles(&self) -> Result<Vec<Candle>> {
        if self.s != "ok" {
            return Err(Error::msg(format!("No candle data (status: {})", self.s)));
        }

        let candles = self
            .t
            .iter()
            .enumerate()
            .filter_map(|(i, t)| {
                Some(Candle::new(
                    t * 1000,
                    *self.o.get(i)?,
                    *self.h.get(i)?,
                    *self.l.get(i)?,
                    *self.c.get(i)?,
                    *self.v.get(i)?,
                ))
            })
            .collect::<Vec<Candle>>();

        if candles.is_empty() {
            return Err(Error::msg("Empty candle response"));
        }

        Ok(candles)
    }
}
