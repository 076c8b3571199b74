use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::errors::ExchangeError;

#[derive(Serialize)]
pub struct ErrorResponse {
    status: u16,     // HTTP status code
    error: String,   // Short error identifier
    message: String, // Human-readable error message
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: &str, message: &str) -> Self {
        ErrorResponse {
            status: status.as_u16(),
            error: error.to_string(),
            message: message.to_string(),
        }
    }

    pub fn validation(message: &str) -> Self {
        ErrorResponse::new(StatusCode::BAD_REQUEST, "validation_failed", message)
    }
}

impl From<ExchangeError> for ErrorResponse {
    fn from(err: ExchangeError) -> Self {
        let (status, error) = match &err {
            ExchangeError::RateNotFound(_) => (StatusCode::NOT_FOUND, "rate_not_found"),
            ExchangeError::FeeNotFound(_) => (StatusCode::NOT_FOUND, "fee_not_found"),
            ExchangeError::Overflow(_) => (StatusCode::BAD_REQUEST, "conversion_overflow"),
            ExchangeError::FeedUnavailable(_) => (StatusCode::BAD_GATEWAY, "feed_unavailable"),
            ExchangeError::FeedMalformed(_) => (StatusCode::BAD_GATEWAY, "feed_malformed"),
            ExchangeError::PersistFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "persist_failed")
            }
            ExchangeError::FeeStoreFailure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "fee_store_failure")
            }
        };
        ErrorResponse::new(status, error, &err.to_string())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
