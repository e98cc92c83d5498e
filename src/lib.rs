pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{IconFeed, PriceLoader, PriceStore, SwapRequest};
use crate::providers::github_icons::GithubIconProvider;
use crate::providers::switcheo::SwitcheoPriceProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Prices,
    Swap(SwapRequest),
}

/// Wires the price store and providers from config and runs a command.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Token swap starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let loader = build_loader(&config, Arc::new(PriceStore::new()));

    match command {
        AppCommand::Prices => cli::prices::run(&loader).await,
        AppCommand::Swap(request) => cli::swap::run(&loader, &request).await,
    }
}

pub fn build_loader(config: &AppConfig, store: Arc<PriceStore>) -> PriceLoader {
    let price_feed = SwitcheoPriceProvider::new(config.prices_base_url(), config.retries);
    let icon_feed = config.icons.then(|| {
        Box::new(GithubIconProvider::new(
            config.icons_base_url(),
            config.retries,
        )) as Box<dyn IconFeed>
    });

    PriceLoader::new(store, Box::new(price_feed), icon_feed)
}
