//! Token price records and the feeds that produce them

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Latest known price of a single token in the reference currency (USD).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceRecord {
    pub currency: String,
    pub price: f64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub symbol_ref: Option<String>,
}

/// A downloadable icon for a token. The file stem of `name` is the currency code.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenIcon {
    pub name: String,
    pub download_url: String,
}

impl TokenIcon {
    pub fn currency(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(stem, _)| stem)
    }
}

#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch_prices(&self) -> Result<Vec<PriceRecord>>;
}

#[async_trait]
pub trait IconFeed: Send + Sync {
    async fn fetch_icons(&self) -> Result<Vec<TokenIcon>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_currency_from_file_name() {
        let icon = TokenIcon {
            name: "ETH.svg".to_string(),
            download_url: "https://example.com/ETH.svg".to_string(),
        };
        assert_eq!(icon.currency(), "ETH");

        let icon = TokenIcon {
            name: "stATOM".to_string(),
            download_url: "https://example.com/stATOM".to_string(),
        };
        assert_eq!(icon.currency(), "stATOM");
    }

    #[test]
    fn test_price_record_deserialization() {
        let json = r#"{"currency":"BLUR","date":"2023-08-29T07:10:40.000Z","price":0.20811525423728813}"#;
        let record: PriceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.currency, "BLUR");
        assert_eq!(record.price, 0.20811525423728813);
        assert_eq!(record.date.timestamp(), 1693293040);
        assert!(record.symbol_ref.is_none());
    }
}
