use crate::core::{PriceFeed, PriceRecord};
use crate::providers::util::{USER_AGENT, with_retry};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
struct PriceResponse {
    currency: String,
    date: DateTime<Utc>,
    price: f64,
}

/// Token prices from the Switcheo `prices.json` feed.
pub struct SwitcheoPriceProvider {
    base_url: String,
    retries: usize,
}

impl SwitcheoPriceProvider {
    pub fn new(base_url: &str, retries: usize) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            retries,
        }
    }
}

#[async_trait]
impl PriceFeed for SwitcheoPriceProvider {
    async fn fetch_prices(&self) -> Result<Vec<PriceRecord>> {
        let url = format!("{}/prices.json", self.base_url);
        debug!("Requesting token prices from {}", url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = with_retry(
            || async { client.get(&url).send().await?.error_for_status() },
            self.retries,
            500,
        )
        .await
        .context("Price request failed")?;

        let response_text = response
            .text()
            .await
            .context("Failed to get price response text")?;

        if response_text.trim().is_empty() {
            return Err(anyhow!("Received empty price response from {}", url));
        }

        let prices: Vec<PriceResponse> = match serde_json::from_str(&response_text) {
            Ok(data) => data,
            Err(e) => {
                error!(
                    error = ?e,
                    response = %response_text,
                    "Failed to parse price response"
                );
                return Err(e).context("Failed to parse price response");
            }
        };

        debug!("Fetched {} price records", prices.len());
        Ok(prices
            .into_iter()
            .map(|p| PriceRecord {
                currency: p.currency,
                price: p.price,
                date: p.date,
                symbol_ref: None,
            })
            .collect())
    }
}
