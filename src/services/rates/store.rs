use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::info;

use crate::database::models::exchange_rate::ExchangeRate;
use crate::services::errors::ExchangeError;

/// Durable sink for the latest rate table. Implementations keep exactly one
/// snapshot, not a history.
#[async_trait]
pub trait RateSnapshotStore: Send + Sync {
    async fn save_snapshot(&self, rates: &[ExchangeRate]) -> Result<(), ExchangeError>;
}

#[derive(Clone)]
struct ActiveTable {
    rates: Arc<HashMap<String, Decimal>>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// In-memory rate table behind a single swapped reference. Reads never touch
/// storage and never observe a half-replaced table.
pub struct RateStore {
    active: RwLock<ActiveTable>,
    snapshots: Arc<dyn RateSnapshotStore>,
}

impl RateStore {
    pub fn new(snapshots: Arc<dyn RateSnapshotStore>) -> RateStore {
        RateStore {
            active: RwLock::new(ActiveTable {
                rates: Arc::new(HashMap::new()),
                refreshed_at: None,
            }),
            snapshots,
        }
    }

    pub fn get(&self, currency: &str) -> Result<Decimal, ExchangeError> {
        self.snapshot()
            .get(currency)
            .copied()
            .ok_or_else(|| ExchangeError::RateNotFound(currency.to_string()))
    }

    /// The whole active table as one consistent view.
    pub fn snapshot(&self) -> Arc<HashMap<String, Decimal>> {
        self.active.read().rates.clone()
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.active.read().refreshed_at
    }

    /// Persists the new table first, then swaps it in. When persisting fails
    /// the previous table stays authoritative.
    pub async fn replace_all(&self, rates: HashMap<String, Decimal>) -> Result<(), ExchangeError> {
        let snapshot: Vec<ExchangeRate> = rates
            .iter()
            .map(|(currency, rate)| ExchangeRate {
                currency: currency.clone(),
                rate: *rate,
            })
            .collect();
        self.snapshots.save_snapshot(&snapshot).await?;

        let mut active = self.active.write();
        active.rates = Arc::new(rates);
        active.refreshed_at = Some(Utc::now());
        info!("rate table replaced, {} currencies active", active.rates.len());
        Ok(())
    }
}
