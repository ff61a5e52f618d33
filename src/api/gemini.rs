use anyhow::{Error, Result};
use reqwest::Client;

use crate::models::Quote;

use super::gemini_dto::{GeminiRequestDto, GeminiResponseDto};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-2.5-flash";

pub async fn generate_analysis(
    symbol: &str,
    quote: &Quote,
    client: &Client,
    api_key: &str,
) -> Result<String> {
    let url = format!("{}/models/{}:generateContent?key={}", BASE_URL, MODEL, api_key);

    let prompt = format!(
        "Please analyze the stock {}. Current price: {}, change: {}%. \
         Provide a concise summary of the stock's recent performance and investment advice. \
         Answer in plain text without Markdown formatting, use plain numbered lists if needed, \
         keep it professional but accessible, and limit the answer to 150 words.",
        symbol,
        quote.price(),
        quote.change_percent()
    );

    let res = client
        .post(&url)
        .json(&GeminiRequestDto::from_prompt(&prompt))
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(Error::msg(format!("Request failed: {}", res.status())));
    }

    let dto = res.json::<GeminiResponseDto>().await?;

    dto.text()
        .ok_or_else(|| Error::msg("Empty analysis response"))
}
