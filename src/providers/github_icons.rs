use crate::core::{IconFeed, TokenIcon};
use crate::providers::util::{USER_AGENT, with_retry};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

const ICONS_PATH: &str = "/repos/Switcheo/token-icons/contents/tokens";

// Subset of a GitHub contents API entry
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    download_url: Option<String>,
}

/// Token icons listed from the Switcheo token-icons repository on GitHub.
pub struct GithubIconProvider {
    base_url: String,
    retries: usize,
}

impl GithubIconProvider {
    pub fn new(base_url: &str, retries: usize) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            retries,
        }
    }
}

#[async_trait]
impl IconFeed for GithubIconProvider {
    async fn fetch_icons(&self) -> Result<Vec<TokenIcon>> {
        let url = format!("{}{}", self.base_url, ICONS_PATH);
        debug!("Requesting token icons from {}", url);

        // GitHub rejects requests without a user agent
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = with_retry(
            || async {
                client
                    .get(&url)
                    .header("Accept", "application/vnd.github+json")
                    .send()
                    .await?
                    .error_for_status()
            },
            self.retries,
            500,
        )
        .await
        .context("Icon request failed")?;

        let response_text = response
            .text()
            .await
            .context("Failed to get icon response text")?;

        let entries: Vec<ContentEntry> = match serde_json::from_str(&response_text) {
            Ok(data) => data,
            Err(e) => {
                error!(
                    error = ?e,
                    response = %response_text,
                    "Failed to parse icon response"
                );
                return Err(e).context("Failed to parse icon response");
            }
        };

        let icons: Vec<TokenIcon> = entries
            .into_iter()
            .filter(|entry| entry.kind == "file")
            .filter_map(|entry| {
                entry.download_url.map(|download_url| TokenIcon {
                    name: entry.name,
                    download_url,
                })
            })
            .collect();
        debug!("Fetched {} token icons", icons.len());
        Ok(icons)
    }
}
