use crate::core::token::PriceRecord;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// An immutable set of prices keyed by currency code.
#[derive(Debug, Clone)]
pub struct PriceSnapshot {
    records: HashMap<String, PriceRecord>,
    loaded_at: DateTime<Utc>,
}

impl PriceSnapshot {
    /// Builds a snapshot from feed records. Later records replace earlier ones with the same
    /// currency; records without a finite positive price are dropped.
    pub fn from_records(records: impl IntoIterator<Item = PriceRecord>) -> Self {
        let mut map = HashMap::new();
        for record in records {
            if !record.price.is_finite() || record.price <= 0.0 {
                warn!(
                    currency = %record.currency,
                    price = record.price,
                    "Dropping price record without a positive price"
                );
                continue;
            }
            if let Some(previous) = map.insert(record.currency.clone(), record) {
                debug!(
                    currency = %previous.currency,
                    previous_date = %previous.date,
                    "Replaced duplicate price record"
                );
            }
        }

        Self {
            records: map,
            loaded_at: Utc::now(),
        }
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(records: Vec<PriceRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|r| (r.currency.clone(), r))
                .collect(),
            loaded_at: Utc::now(),
        }
    }

    pub fn get(&self, currency: &str) -> Option<&PriceRecord> {
        self.records.get(currency)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Records sorted by currency code.
    pub fn sorted_records(&self) -> Vec<&PriceRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by(|a, b| a.currency.cmp(&b.currency));
        records
    }
}

/// Holds the current price snapshot. Empty until the first rebuild.
#[derive(Default)]
pub struct PriceStore {
    current: RwLock<Option<Arc<PriceSnapshot>>>,
}

impl PriceStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Replaces the current snapshot wholesale and returns the number of currencies in it.
    pub async fn rebuild(&self, records: Vec<PriceRecord>) -> usize {
        // Build outside the lock so readers only ever see a complete snapshot
        let snapshot = Arc::new(PriceSnapshot::from_records(records));
        let count = snapshot.len();

        let mut current = self.current.write().await;
        *current = Some(snapshot);
        debug!(count, "Price store rebuilt");
        count
    }

    pub async fn lookup(&self, currency: &str) -> Option<PriceRecord> {
        let snapshot = self.snapshot().await?;
        snapshot.get(currency).cloned()
    }

    pub async fn snapshot(&self) -> Option<Arc<PriceSnapshot>> {
        self.current.read().await.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.current.read().await.is_some()
    }
}
