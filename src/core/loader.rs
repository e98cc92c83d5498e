//! Fetch-and-rebuild of the price store

use crate::core::price_store::PriceStore;
use crate::core::token::{IconFeed, PriceFeed, PriceRecord, TokenIcon};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PriceLoader {
    store: Arc<PriceStore>,
    price_feed: Box<dyn PriceFeed>,
    icon_feed: Option<Box<dyn IconFeed>>,
}

impl PriceLoader {
    pub fn new(
        store: Arc<PriceStore>,
        price_feed: Box<dyn PriceFeed>,
        icon_feed: Option<Box<dyn IconFeed>>,
    ) -> Self {
        Self {
            store,
            price_feed,
            icon_feed,
        }
    }

    pub fn store(&self) -> &Arc<PriceStore> {
        &self.store
    }

    /// Fetches prices (and icons, if configured) and rebuilds the store.
    ///
    /// On a failed price fetch the store keeps its previous snapshot. Icon failures are
    /// logged and the prices are stored without icons.
    pub async fn refresh(&self) -> Result<usize> {
        let (prices, icons) = match &self.icon_feed {
            Some(icon_feed) => {
                let (prices, icons) =
                    futures::join!(self.price_feed.fetch_prices(), icon_feed.fetch_icons());
                (prices, Some(icons))
            }
            None => (self.price_feed.fetch_prices().await, None),
        };

        let mut prices = prices.context("Failed to fetch token prices")?;

        match icons {
            Some(Ok(icons)) => attach_icons(&mut prices, &icons),
            Some(Err(e)) => warn!(error = %e, "Failed to fetch token icons, continuing without"),
            None => debug!("Icon feed disabled"),
        }

        let count = self.store.rebuild(prices).await;
        info!(count, "Loaded token prices");
        Ok(count)
    }
}

/// Sets `symbol_ref` on each record whose currency matches an icon's file stem, ignoring case.
pub fn attach_icons(records: &mut [PriceRecord], icons: &[TokenIcon]) {
    let by_currency: HashMap<String, &TokenIcon> = icons
        .iter()
        .map(|icon| (icon.currency().to_uppercase(), icon))
        .collect();

    for record in records.iter_mut() {
        record.symbol_ref = by_currency
            .get(&record.currency.to_uppercase())
            .map(|icon| icon.download_url.clone());
        if record.symbol_ref.is_none() {
            debug!(currency = %record.currency, "No icon found");
        }
    }
}
