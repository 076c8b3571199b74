pub mod conversion;
pub mod errors;
pub mod fees;
pub mod rates;
pub mod shared;

use std::sync::Arc;

use anyhow::Context;
use rust_decimal::Decimal;

use crate::database::queries::conversion_fee::PgFeeStore;
use crate::database::queries::exchange_rate::PgRateSnapshotStore;
use conversion::ConversionEngine;
use fees::FeeService;
use rates::feed::RateFeedClient;
use rates::store::RateStore;
use rates::RateService;
use shared::env::get_env_variable;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConversionEngine>,
    pub rates: Arc<RateService>,
    pub fees: Arc<FeeService>,
}

impl AppState {
    /// Wires the production collaborators from environment configuration.
    pub fn from_env() -> anyhow::Result<AppState> {
        let feed_url = get_env_variable("RATE_FEED_URL").context("RATE_FEED_URL must be set")?;
        let default_fee = get_env_variable("DEFAULT_FEE")
            .context("DEFAULT_FEE must be set")?
            .parse::<Decimal>()
            .context("DEFAULT_FEE must be a decimal fraction, e.g. 0.01")?;

        let rate_store = Arc::new(RateStore::new(Arc::new(PgRateSnapshotStore)));
        let fees = Arc::new(FeeService::new(Arc::new(PgFeeStore)));
        let engine = Arc::new(ConversionEngine::new(
            fees.clone(),
            rate_store.clone(),
            default_fee,
        ));
        let rates = Arc::new(RateService::new(RateFeedClient::new(feed_url), rate_store));

        Ok(AppState {
            engine,
            rates,
            fees,
        })
    }
}
