use chrono::{Duration, Local, Utc};
use rand::Rng;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rust_decimal_macros::dec;

use crate::models::{AssetKind, Candle, Position, Quote, TradeAction, TradeRecord};

const ONE_DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn to_price(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(2)
}

/// Random-walk candle series ending now, one candle per day.
pub fn generate_candles(count: usize, start_price: f64) -> Vec<Candle> {
    let mut rng = rand::thread_rng();
    let mut candles = Vec::with_capacity(count);
    let now = Utc::now().timestamp_millis();
    let mut current_price = start_price;

    for i in (1..=count).rev() {
        let time = now - i as i64 * ONE_DAY_MS;
        let volatility = current_price * 0.02;
        let open = current_price + (rng.r#gen::<f64>() - 0.5) * volatility;
        let close = open + (rng.r#gen::<f64>() - 0.5) * volatility;
        let high = open.max(close) + rng.r#gen::<f64>() * volatility * 0.5;
        let low = open.min(close) - rng.r#gen::<f64>() * volatility * 0.5;
        let volume = rng.gen_range(50_000i64..1_050_000);

        candles.push(Candle::new(
            time,
            to_price(open),
            to_price(high),
            to_price(low),
            to_price(close),
            volume,
        ));
        current_price = close;
    }

    candles
}

pub fn generate_quote(symbol: &str) -> Quote {
    let mut rng = rand::thread_rng();
    let base_price = rng.gen_range(100.0..200.0);

    Quote::new(
        symbol.to_string(),
        to_price(base_price),
        to_price(rng.gen_range(-5.0..5.0)),
        to_price(rng.gen_range(-2.5..2.5)),
        to_price(base_price + 5.0),
        to_price(base_price - 5.0),
        to_price(base_price),
        to_price(base_price - 2.0),
    )
}

pub fn canned_analysis(symbol: &str) -> String {
    format!(
        "[Simulated analysis] Based on the current market data for {}:\n\
         1. Technicals: the stock is in an uptrend and RSI shows strong momentum, \
         approaching overbought territory.\n\
         2. Fundamentals: the latest earnings beat expectations and cash flow is solid.\n\
         3. Suggestion: holders may stay invested and consider adding on a pullback to \
         support. The long-term target looks constructive, but watch broad-market swings.",
        symbol
    )
}

pub const ANALYSIS_UNAVAILABLE: &str =
    "The AI service is temporarily unavailable. Please try again later or switch to mock mode.";

/// Starting portfolio for a fresh session.
pub fn seed_positions() -> Vec<Position> {
    vec![
        Position::new(
            String::from("USD"),
            String::from("Cash"),
            dec!(50000),
            dec!(1),
            AssetKind::Cash,
        ),
        Position::new(
            String::from("AAPL"),
            String::from("Apple Inc."),
            dec!(150),
            dec!(145.20),
            AssetKind::Stock,
        ),
        Position::new(
            String::from("TSLA"),
            String::from("Tesla, Inc."),
            dec!(50),
            dec!(210.50),
            AssetKind::Stock,
        ),
        Position::new(
            String::from("NVDA"),
            String::from("NVIDIA Corp."),
            dec!(20),
            dec!(450.00),
            AssetKind::Stock,
        ),
    ]
}

/// Seed trade log, most recent first.
pub fn seed_trades() -> Vec<TradeRecord> {
    let now = Local::now();
    vec![
        TradeRecord::with_timestamp(
            String::from("AAPL"),
            TradeAction::Buy,
            dec!(155.60),
            dec!(50),
            now - Duration::days(2),
        ),
        TradeRecord::with_timestamp(
            String::from("TSLA"),
            TradeAction::Buy,
            dec!(210.50),
            dec!(50),
            now - Duration::days(15),
        ),
        TradeRecord::with_timestamp(
            String::from("AAPL"),
            TradeAction::Buy,
            dec!(140.00),
            dec!(100),
            now - Duration::days(30),
        ),
    ]
}
