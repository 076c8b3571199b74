use async_trait::async_trait;

use crate::database::db_client;
use crate::database::models::conversion_fee::ConversionFee;
use crate::services::errors::ExchangeError;
use crate::services::fees::FeeStore;

/// Fee storage on Postgres. Every call opens a short-lived client, like the
/// rest of the query layer.
pub struct PgFeeStore;

#[async_trait]
impl FeeStore for PgFeeStore {
    async fn find_fee(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Option<ConversionFee>, ExchangeError> {
        let client = db_client().await.map_err(fee_store_failure)?;

        // duplicate pairs are possible, the oldest row wins
        let row = client
            .query_opt(
                "SELECT id, from_currency, to_currency, fee FROM conversion_fees WHERE from_currency = $1 AND to_currency = $2 ORDER BY id LIMIT 1",
                &[&from_currency, &to_currency],
            )
            .await
            .map_err(fee_store_failure)?;

        Ok(row.map(|row| ConversionFee::from_row(&row)))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ConversionFee>, ExchangeError> {
        let client = db_client().await.map_err(fee_store_failure)?;

        let row = client
            .query_opt(
                "SELECT id, from_currency, to_currency, fee FROM conversion_fees WHERE id = $1",
                &[&id],
            )
            .await
            .map_err(fee_store_failure)?;

        Ok(row.map(|row| ConversionFee::from_row(&row)))
    }

    async fn list_all(&self) -> Result<Vec<ConversionFee>, ExchangeError> {
        let client = db_client().await.map_err(fee_store_failure)?;

        let rows = client
            .query(
                "SELECT id, from_currency, to_currency, fee FROM conversion_fees ORDER BY id",
                &[],
            )
            .await
            .map_err(fee_store_failure)?;

        Ok(rows.iter().map(ConversionFee::from_row).collect())
    }

    async fn save(&self, fee: ConversionFee) -> Result<ConversionFee, ExchangeError> {
        let client = db_client().await.map_err(fee_store_failure)?;

        let row = match fee.id {
            Some(id) => client
                .query_one(
                    "UPDATE conversion_fees SET from_currency = $2, to_currency = $3, fee = $4 WHERE id = $1 RETURNING id, from_currency, to_currency, fee",
                    &[&id, &fee.from_currency, &fee.to_currency, &fee.fee],
                )
                .await
                .map_err(fee_store_failure)?,
            None => client
                .query_one(
                    "INSERT INTO conversion_fees (from_currency, to_currency, fee) VALUES ($1, $2, $3) RETURNING id, from_currency, to_currency, fee",
                    &[&fee.from_currency, &fee.to_currency, &fee.fee],
                )
                .await
                .map_err(fee_store_failure)?,
        };

        Ok(ConversionFee::from_row(&row))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ExchangeError> {
        let client = db_client().await.map_err(fee_store_failure)?;

        client
            .execute("DELETE FROM conversion_fees WHERE id = $1", &[&id])
            .await
            .map_err(fee_store_failure)?;

        Ok(())
    }
}

fn fee_store_failure<E: std::fmt::Display>(err: E) -> ExchangeError {
    ExchangeError::FeeStoreFailure(err.to_string())
}
