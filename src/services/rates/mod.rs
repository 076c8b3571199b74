pub mod feed;
pub mod store;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::services::errors::ExchangeError;
use feed::RateFeedClient;
use store::RateStore;

pub struct RateService {
    feed: RateFeedClient,
    store: Arc<RateStore>,
}

impl RateService {
    pub fn new(feed: RateFeedClient, store: Arc<RateStore>) -> RateService {
        RateService { feed, store }
    }

    /// Fetches the feed once and replaces the active table. Any failure
    /// leaves the previous table serving.
    pub async fn refresh(&self) -> Result<HashMap<String, Decimal>, ExchangeError> {
        let rates = self.feed.fetch_rates().await?;
        self.store.replace_all(rates.clone()).await?;
        info!("refreshed {} exchange rates", rates.len());
        Ok(rates)
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.store.refreshed_at()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::services::testing::FlakySnapshots;

    const FEED_BODY: &str = r#"<Envelope>
        <Cube><Cube time="2025-08-22">
            <Cube currency="USD" rate="1.12"/>
            <Cube currency="JPY" rate="161.24"/>
        </Cube></Cube>
    </Envelope>"#;

    #[tokio::test]
    async fn refresh_fetches_persists_and_activates_the_new_table() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED_BODY))
            .mount(&server)
            .await;
        let snapshots = Arc::new(FlakySnapshots::new());
        let store = Arc::new(RateStore::new(snapshots.clone()));
        let service = RateService::new(RateFeedClient::new(server.uri()), store.clone());

        let rates = service.refresh().await.unwrap();

        assert_eq!(rates.len(), 2);
        assert_eq!(store.get("USD").unwrap(), dec!(1.12));
        assert_eq!(store.get("JPY").unwrap(), dec!(161.24));
        assert_eq!(snapshots.saved.lock().unwrap().len(), 1);
        assert!(service.refreshed_at().is_some());
    }

    #[tokio::test]
    async fn a_failed_fetch_does_not_touch_the_active_table() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let store = Arc::new(RateStore::new(Arc::new(FlakySnapshots::new())));
        store
            .replace_all(std::iter::once(("USD".to_string(), dec!(1.10))).collect())
            .await
            .unwrap();
        let service = RateService::new(RateFeedClient::new(server.uri()), store.clone());

        let result = service.refresh().await;

        assert!(matches!(result, Err(ExchangeError::FeedUnavailable(_))));
        assert_eq!(store.get("USD").unwrap(), dec!(1.10));
    }
}
