use anyhow::Result;
use chrono::Utc;
use reqwest::Client;

use crate::models::{Candle, Quote, TimeRange};

use super::{
    finnhub_dto::{FinnhubCandleDto, FinnhubQuoteDto},
    utils::get_json,
};

const BASE_URL: &str = "https://finnhub.io/api/v1";

pub async fn get_quote(symbol: &str, client: &Client, api_key: &str) -> Result<Quote> {
    let url = format!("{}/quote?symbol={}&token={}", BASE_URL, symbol, api_key);
    let dto = get_json::<FinnhubQuoteDto>(client, &url).await?;

    Ok(dto.to_quote(symbol))
}

pub async fn get_candles(
    symbol: &str,
    range: TimeRange,
    client: &Client,
    api_key: &str,
) -> Result<Vec<Candle>> {
    let to = Utc::now().timestamp();
    let (resolution, from) = match range {
        TimeRange::Day => ("60", to - 86_400),
        TimeRange::Month => ("D", to - 86_400 * 30),
        TimeRange::Year => ("W", to - 86_400 * 365),
    };

    let url = format!(
        "{}/stock/candle?symbol={}&resolution={}&from={}&to={}&token={}",
        BASE_URL, symbol, resolution, from, to, api_key
    );
    let dto = get_json::<FinnhubCandleDto>(client, &url).await?;

    dto.to_candles()
}
