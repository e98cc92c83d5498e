//! Swap conversion from a price snapshot

use crate::core::error::SwapError;
use crate::core::price_store::{PriceSnapshot, PriceStore};
use crate::core::validation::Field;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapResult {
    pub exchange_rate: f64,
    pub received_amount: f64,
}

/// Converts `amount` of `from` into `to` using the store's current snapshot.
pub async fn convert(
    store: &PriceStore,
    from: &str,
    to: &str,
    amount: f64,
) -> Result<SwapResult, SwapError> {
    let snapshot = store.snapshot().await.ok_or(SwapError::StoreNotReady)?;
    convert_snapshot(&snapshot, from, to, amount)
}

/// Unrounded conversion. A zero price yields an infinite or NaN rate, which is returned as is.
pub fn convert_snapshot(
    snapshot: &PriceSnapshot,
    from: &str,
    to: &str,
    amount: f64,
) -> Result<SwapResult, SwapError> {
    let to_price = price_of(snapshot, to, Field::ToCurrency)?;
    let from_price = price_of(snapshot, from, Field::FromCurrency)?;

    let exchange_rate = to_price / from_price;
    let received_amount = exchange_rate * amount;
    debug!(from, to, amount, exchange_rate, received_amount, "Computed swap");

    Ok(SwapResult {
        exchange_rate,
        received_amount,
    })
}

fn price_of(snapshot: &PriceSnapshot, currency: &str, field: Field) -> Result<f64, SwapError> {
    snapshot
        .get(currency)
        .map(|record| record.price)
        .ok_or_else(|| SwapError::MissingPrice {
            field,
            currency: currency.to_string(),
        })
}
