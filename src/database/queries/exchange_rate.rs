use async_trait::async_trait;
use chrono::Utc;

use crate::database::db_client;
use crate::database::models::exchange_rate::ExchangeRate;
use crate::services::errors::ExchangeError;
use crate::services::rates::store::RateSnapshotStore;

/// Rate snapshot storage on Postgres. The table holds exactly the latest
/// feed snapshot, replaced in one transaction so a failure leaves the
/// previous snapshot intact.
pub struct PgRateSnapshotStore;

#[async_trait]
impl RateSnapshotStore for PgRateSnapshotStore {
    async fn save_snapshot(&self, rates: &[ExchangeRate]) -> Result<(), ExchangeError> {
        let mut client = db_client().await.map_err(persist_failed)?;
        let transaction = client.transaction().await.map_err(persist_failed)?;

        transaction
            .execute("DELETE FROM exchange_rates", &[])
            .await
            .map_err(persist_failed)?;

        let fetched_at = Utc::now();
        let stmt = transaction
            .prepare("INSERT INTO exchange_rates (currency, rate, fetched_at) VALUES ($1, $2, $3)")
            .await
            .map_err(persist_failed)?;
        for rate in rates {
            transaction
                .execute(&stmt, &[&rate.currency, &rate.rate, &fetched_at])
                .await
                .map_err(persist_failed)?;
        }

        transaction.commit().await.map_err(persist_failed)?;
        Ok(())
    }
}

fn persist_failed<E: std::fmt::Display>(err: E) -> ExchangeError {
    ExchangeError::PersistFailed(err.to_string())
}
