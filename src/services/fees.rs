use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

use crate::database::models::conversion_fee::ConversionFee;
use crate::services::errors::ExchangeError;

/// Contract for the durable fee collaborator. Lookups are by exact ordered
/// pair; when several rows exist for one pair the oldest row wins.
#[async_trait]
pub trait FeeStore: Send + Sync {
    async fn find_fee(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Option<ConversionFee>, ExchangeError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<ConversionFee>, ExchangeError>;
    async fn list_all(&self) -> Result<Vec<ConversionFee>, ExchangeError>;
    async fn save(&self, fee: ConversionFee) -> Result<ConversionFee, ExchangeError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), ExchangeError>;
}

pub struct FeeService {
    store: Arc<dyn FeeStore>,
}

impl FeeService {
    pub fn new(store: Arc<dyn FeeStore>) -> FeeService {
        FeeService { store }
    }

    /// Fee for the ordered pair, or the given default when none is
    /// configured. The default is the only silent fallback; store failures
    /// propagate.
    pub async fn resolve_fee(
        &self,
        from_currency: &str,
        to_currency: &str,
        default_fee: Decimal,
    ) -> Result<Decimal, ExchangeError> {
        let configured = self.store.find_fee(from_currency, to_currency).await?;
        Ok(configured.map(|fee| fee.fee).unwrap_or(default_fee))
    }

    pub async fn list_fees(&self) -> Result<Vec<ConversionFee>, ExchangeError> {
        self.store.list_all().await
    }

    pub async fn add_fee(
        &self,
        from_currency: &str,
        to_currency: &str,
        fee: Decimal,
    ) -> Result<ConversionFee, ExchangeError> {
        let created = self
            .store
            .save(ConversionFee {
                id: None,
                from_currency: from_currency.to_string(),
                to_currency: to_currency.to_string(),
                fee,
            })
            .await?;
        info!(
            "added conversion fee {:?} for {}->{}",
            created.id, created.from_currency, created.to_currency
        );
        Ok(created)
    }

    pub async fn edit_fee(
        &self,
        id: i64,
        from_currency: &str,
        to_currency: &str,
        fee: Decimal,
    ) -> Result<ConversionFee, ExchangeError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ExchangeError::FeeNotFound(id))?;

        let updated = self
            .store
            .save(ConversionFee {
                id: Some(id),
                from_currency: from_currency.to_string(),
                to_currency: to_currency.to_string(),
                fee,
            })
            .await?;
        info!("updated conversion fee {}", id);
        Ok(updated)
    }

    /// Removing an id that does not exist is not an error.
    pub async fn remove_fee(&self, id: i64) -> Result<(), ExchangeError> {
        self.store.delete_by_id(id).await?;
        info!("removed conversion fee {}", id);
        Ok(())
    }
}
