use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

use crate::services::errors::ExchangeError;
use crate::services::fees::FeeService;
use crate::services::rates::store::RateStore;

pub struct ConversionEngine {
    fees: Arc<FeeService>,
    rates: Arc<RateStore>,
    default_fee: Decimal,
}

impl ConversionEngine {
    pub fn new(
        fees: Arc<FeeService>,
        rates: Arc<RateStore>,
        default_fee: Decimal,
    ) -> ConversionEngine {
        ConversionEngine {
            fees,
            rates,
            default_fee,
        }
    }

    /// Deducts the pair's fee, then multiplies by the target currency's rate
    /// and rounds half up to two decimal places. The feed quotes every
    /// currency against one implicit base, so only the target rate enters
    /// the calculation; the source currency's own quote never does.
    pub async fn convert(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Decimal, ExchangeError> {
        let fee = self
            .fees
            .resolve_fee(from_currency, to_currency, self.default_fee)
            .await?;
        let rate = self.rates.get(to_currency)?;

        let mut converted = amount
            .checked_mul(fee)
            .and_then(|fee_amount| amount.checked_sub(fee_amount))
            .and_then(|net| net.checked_mul(rate))
            .ok_or_else(|| {
                ExchangeError::Overflow(format!("{} {} to {}", amount, from_currency, to_currency))
            })?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        converted.rescale(2);

        info!(
            "converted {} {} to {} {} (fee {}, rate {})",
            amount, from_currency, converted, to_currency, fee, rate
        );
        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::services::testing::{FailingFeeStore, FlakySnapshots, InMemoryFeeStore};

    async fn engine_with(
        fees: Arc<FeeService>,
        rates: &[(&str, Decimal)],
        default_fee: Decimal,
    ) -> ConversionEngine {
        let store = Arc::new(RateStore::new(Arc::new(FlakySnapshots::new())));
        let table: HashMap<String, Decimal> = rates
            .iter()
            .map(|(currency, rate)| (currency.to_string(), *rate))
            .collect();
        store.replace_all(table).await.unwrap();
        ConversionEngine::new(fees, store, default_fee)
    }

    #[tokio::test]
    async fn converts_with_the_configured_pair_fee() {
        let fees = Arc::new(FeeService::new(Arc::new(InMemoryFeeStore::with_fee(
            "GBP",
            "EUR",
            dec!(0.02),
        ))));
        let engine = engine_with(fees, &[("EUR", dec!(1.12))], dec!(0.05)).await;

        let converted = engine.convert(dec!(100.00), "GBP", "EUR").await.unwrap();

        assert_eq!(converted, dec!(109.76));
    }

    #[tokio::test]
    async fn converts_with_the_default_fee_when_the_pair_has_none() {
        let fees = Arc::new(FeeService::new(Arc::new(InMemoryFeeStore::new())));
        let engine = engine_with(fees, &[("EUR", dec!(1.12))], dec!(0.05)).await;

        let converted = engine.convert(dec!(99.00), "GBP", "EUR").await.unwrap();

        assert_eq!(converted, dec!(105.34));
    }

    #[tokio::test]
    async fn a_zero_amount_converts_to_zero_at_two_decimals() {
        let fees = Arc::new(FeeService::new(Arc::new(InMemoryFeeStore::with_fee(
            "GBP",
            "EUR",
            dec!(0.02),
        ))));
        let engine = engine_with(fees, &[("EUR", dec!(1.12))], dec!(0.05)).await;

        let converted = engine.convert(dec!(0), "GBP", "EUR").await.unwrap();

        assert_eq!(converted.to_string(), "0.00");
    }

    #[tokio::test]
    async fn rounds_half_up_to_two_decimal_places() {
        let fees = Arc::new(FeeService::new(Arc::new(InMemoryFeeStore::with_fee(
            "GBP",
            "EUR",
            dec!(0.02),
        ))));
        let engine = engine_with(fees, &[("EUR", dec!(1.12))], dec!(0.05)).await;

        let converted = engine.convert(dec!(123.45623), "GBP", "EUR").await.unwrap();

        assert_eq!(converted, dec!(135.51));
    }

    #[tokio::test]
    async fn a_midpoint_rounds_away_from_zero() {
        let fees = Arc::new(FeeService::new(Arc::new(InMemoryFeeStore::with_fee(
            "AAA",
            "BBB",
            dec!(0),
        ))));
        let engine = engine_with(fees, &[("BBB", dec!(1))], dec!(0.05)).await;

        // 2.005 * 1 would land on 2.00 under banker's rounding
        let converted = engine.convert(dec!(2.005), "AAA", "BBB").await.unwrap();

        assert_eq!(converted, dec!(2.01));
    }

    #[tokio::test]
    async fn an_unknown_target_currency_fails() {
        let fees = Arc::new(FeeService::new(Arc::new(InMemoryFeeStore::new())));
        let engine =
            engine_with(fees, &[("USD", dec!(1.12)), ("GBP", dec!(0.85))], dec!(0.05)).await;

        let result = engine.convert(dec!(100), "USD", "JPY").await;

        assert!(matches!(result, Err(ExchangeError::RateNotFound(code)) if code == "JPY"));
    }

    #[tokio::test]
    async fn only_the_target_rate_enters_the_calculation() {
        let fees = Arc::new(FeeService::new(Arc::new(InMemoryFeeStore::new())));
        // the source currency has no quote at all, conversion still works
        let engine = engine_with(fees, &[("EUR", dec!(1.12))], dec!(0)).await;

        let converted = engine.convert(dec!(100.00), "XXX", "EUR").await.unwrap();

        assert_eq!(converted, dec!(112.00));
    }

    #[tokio::test]
    async fn a_same_currency_pair_still_needs_the_target_quote() {
        let fees = Arc::new(FeeService::new(Arc::new(InMemoryFeeStore::new())));
        let engine = engine_with(fees, &[("USD", dec!(1.12))], dec!(0)).await;

        // the feed's base currency has no leaf of its own
        let result = engine.convert(dec!(100), "EUR", "EUR").await;
        assert!(matches!(result, Err(ExchangeError::RateNotFound(_))));

        // a quoted currency against itself applies its quote like any other
        let converted = engine.convert(dec!(100), "USD", "USD").await.unwrap();
        assert_eq!(converted, dec!(112.00));
    }

    #[tokio::test]
    async fn a_fee_store_failure_propagates() {
        let fees = Arc::new(FeeService::new(Arc::new(FailingFeeStore)));
        let engine = engine_with(fees, &[("EUR", dec!(1.12))], dec!(0.05)).await;

        let result = engine.convert(dec!(100), "GBP", "EUR").await;

        assert!(matches!(result, Err(ExchangeError::FeeStoreFailure(_))));
    }

    #[tokio::test]
    async fn an_overflowing_conversion_reports_an_error() {
        let fees = Arc::new(FeeService::new(Arc::new(InMemoryFeeStore::new())));
        let engine = engine_with(fees, &[("EUR", dec!(1.12))], dec!(0)).await;

        let result = engine.convert(Decimal::MAX, "USD", "EUR").await;

        assert!(matches!(result, Err(ExchangeError::Overflow(_))));
    }
}
