use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_PRICES_URL: &str = "https://interview.switcheo.com";
pub const DEFAULT_ICONS_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PricesProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IconsProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub prices: Option<PricesProviderConfig>,
    pub icons: Option<IconsProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            prices: Some(PricesProviderConfig {
                base_url: DEFAULT_PRICES_URL.to_string(),
            }),
            icons: Some(IconsProviderConfig {
                base_url: DEFAULT_ICONS_URL.to_string(),
            }),
        }
    }
}

fn default_icons() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Extra attempts for a failed HTTP request. Failed fetches are not retried by default.
    #[serde(default)]
    pub retries: usize,
    /// Join token icons onto the price list
    #[serde(default = "default_icons")]
    pub icons: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            providers: ProvidersConfig::default(),
            retries: 0,
            icons: true,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or defaults if there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "tokenswap", "tokenswap")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn prices_base_url(&self) -> &str {
        self.providers
            .prices
            .as_ref()
            .map_or(DEFAULT_PRICES_URL, |p| &p.base_url)
    }

    pub fn icons_base_url(&self) -> &str {
        self.providers
            .icons
            .as_ref()
            .map_or(DEFAULT_ICONS_URL, |p| &p.base_url)
    }
}
