use log::warn;
use reqwest::Client;

use crate::{
    api::{finnhub, gemini, mock},
    models::{Candle, Quote, TimeRange},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DataMode {
    Mock,
    Real,
}

/// Quote, candle and analysis provider.
///
/// Callers can treat every method as always-succeeding: mock mode (or a
/// missing API key) serves synthetic data directly, and real mode falls back
/// to synthetic data on any upstream failure.
#[derive(Clone, Debug)]
pub struct DataService {
    client: Client,
    mode: DataMode,
    finnhub_key: Option<String>,
    gemini_key: Option<String>,
}

const MOCK_START_PRICE: f64 = 150.0;

impl DataService {
    pub fn new(mode: DataMode, finnhub_key: Option<String>, gemini_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            mode,
            finnhub_key,
            gemini_key,
        }
    }

    pub fn mode(&self) -> DataMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DataMode) {
        self.mode = mode;
    }

    pub fn can_go_real(&self) -> bool {
        self.finnhub_key.is_some()
    }

    pub async fn get_quote(&self, symbol: &str) -> Quote {
        if let (DataMode::Real, Some(api_key)) = (self.mode, &self.finnhub_key) {
            match finnhub::get_quote(symbol, &self.client, api_key).await {
                Ok(quote) => return quote,
                Err(err) => warn!("Finnhub quote for {} failed, serving mock data: {:#}", symbol, err),
            }
        }

        mock::generate_quote(symbol)
    }

    pub async fn get_candles(&self, symbol: &str, range: TimeRange) -> Vec<Candle> {
        if let (DataMode::Real, Some(api_key)) = (self.mode, &self.finnhub_key) {
            match finnhub::get_candles(symbol, range, &self.client, api_key).await {
                Ok(candles) => return candles,
                Err(err) => warn!(
                    "Finnhub candles for {} failed, serving mock data: {:#}",
                    symbol, err
                ),
            }
        }

        mock::generate_candles(range.candle_count(), MOCK_START_PRICE)
    }

    pub async fn get_analysis(&self, symbol: &str, quote: &Quote) -> String {
        if let (DataMode::Real, Some(api_key)) = (self.mode, &self.gemini_key) {
            return match gemini::generate_analysis(symbol, quote, &self.client, api_key).await {
                Ok(text) => text,
                Err(err) => {
                    warn!("Gemini analysis for {} failed: {:#}", symbol, err);
                    mock::ANALYSIS_UNAVAILABLE.to_string()
                }
            };
        }

        mock::canned_analysis(symbol)
    }
}
