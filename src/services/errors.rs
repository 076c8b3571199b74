use thiserror::Error;

/// Failures the conversion core surfaces to its callers. Everything here
/// propagates unchanged; there are no internal retries and no silent
/// fallbacks apart from the default fee applied when a pair has none.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("rate feed unreachable: {0}")]
    FeedUnavailable(String),

    #[error("rate feed returned a malformed document: {0}")]
    FeedMalformed(String),

    #[error("failed to persist rate snapshot: {0}")]
    PersistFailed(String),

    #[error("no exchange rate found for {0}")]
    RateNotFound(String),

    #[error("fee store failure: {0}")]
    FeeStoreFailure(String),

    #[error("no conversion fee with id {0}")]
    FeeNotFound(i64),

    #[error("conversion overflowed the decimal range: {0}")]
    Overflow(String),
}
