use std::collections::HashMap;

use axum::{
    extract::{Json, Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::shared::env::get_env_variable;
use crate::services::shared::is_currency_code;
use crate::services::AppState;

use super::errors::ErrorResponse;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: Decimal,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRequest {
    pub from_currency: String,
    pub to_currency: String,
    pub fee: Decimal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub refreshed_at: Option<DateTime<Utc>>,
    pub rates: HashMap<String, Decimal>,
}

pub async fn check_auth(request: Request, next: Next) -> Result<Response, StatusCode> {
    let token = match get_env_variable("API_TOKEN") {
        Some(token) => token,
        // without a configured token the admin surface stays open; the
        // startup check warns about this
        None => return Ok(next.run(request).await),
    };

    if bearer_matches(request.headers(), &token) {
        Ok(next.run(request).await)
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

fn bearer_matches(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        == Some(token)
}

pub async fn convert(
    State(state): State<AppState>,
    Json(conversion): Json<ConversionRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    info!(
        "received request to convert {} {} to {}",
        conversion.amount, conversion.from_currency, conversion.to_currency
    );
    validate_currency_pair(&conversion.from_currency, &conversion.to_currency)?;
    if conversion.amount < Decimal::ZERO {
        return Err(ErrorResponse::validation("amount must not be negative"));
    }

    let converted = state
        .engine
        .convert(
            conversion.amount,
            &conversion.from_currency,
            &conversion.to_currency,
        )
        .await?;

    Ok(Json(converted))
}

pub async fn refresh_rates(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ErrorResponse> {
    info!("received request to refresh exchange rates");
    let rates = state.rates.refresh().await?;

    Ok(Json(RefreshResponse {
        refreshed_at: state.rates.refreshed_at(),
        rates,
    }))
}

pub async fn list_fees(State(state): State<AppState>) -> Result<impl IntoResponse, ErrorResponse> {
    let fees = state.fees.list_fees().await?;
    Ok(Json(fees))
}

pub async fn add_fee(
    State(state): State<AppState>,
    Json(fee_request): Json<FeeRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    validate_fee_request(&fee_request)?;

    let created = state
        .fees
        .add_fee(
            &fee_request.from_currency,
            &fee_request.to_currency,
            fee_request.fee,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn edit_fee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(fee_request): Json<FeeRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    validate_fee_request(&fee_request)?;

    let updated = state
        .fees
        .edit_fee(
            id,
            &fee_request.from_currency,
            &fee_request.to_currency,
            fee_request.fee,
        )
        .await?;

    Ok(Json(updated))
}

pub async fn remove_fee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ErrorResponse> {
    state.fees.remove_fee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn validate_currency_pair(from_currency: &str, to_currency: &str) -> Result<(), ErrorResponse> {
    if !is_currency_code(from_currency) {
        return Err(ErrorResponse::validation(
            "fromCurrency must be exactly 3 uppercase letters",
        ));
    }
    if !is_currency_code(to_currency) {
        return Err(ErrorResponse::validation(
            "toCurrency must be exactly 3 uppercase letters",
        ));
    }
    Ok(())
}

fn validate_fee_request(fee_request: &FeeRequest) -> Result<(), ErrorResponse> {
    validate_currency_pair(&fee_request.from_currency, &fee_request.to_currency)?;
    if fee_request.fee < Decimal::ZERO || fee_request.fee >= Decimal::ONE {
        return Err(ErrorResponse::validation(
            "fee must be a fraction between 0 and 1, upper bound excluded",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn fee_request(from_currency: &str, to_currency: &str, fee: Decimal) -> FeeRequest {
        FeeRequest {
            from_currency: from_currency.to_string(),
            to_currency: to_currency.to_string(),
            fee,
        }
    }

    #[test]
    fn accepts_a_valid_fee_request() {
        assert!(validate_fee_request(&fee_request("EUR", "USD", dec!(0.02))).is_ok());
        assert!(validate_fee_request(&fee_request("EUR", "USD", dec!(0))).is_ok());
    }

    #[test]
    fn rejects_malformed_currency_codes() {
        assert!(validate_currency_pair("eur", "USD").is_err());
        assert!(validate_currency_pair("EUR", "USDT").is_err());
        assert!(validate_currency_pair("EU", "USD").is_err());
    }

    #[test]
    fn rejects_fees_outside_the_unit_interval() {
        assert!(validate_fee_request(&fee_request("EUR", "USD", dec!(-0.01))).is_err());
        assert!(validate_fee_request(&fee_request("EUR", "USD", dec!(1))).is_err());
        assert!(validate_fee_request(&fee_request("EUR", "USD", dec!(1.5))).is_err());
    }

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", value.parse().unwrap());
        headers
    }

    #[test]
    fn accepts_a_matching_bearer_token() {
        assert!(bearer_matches(&headers_with_auth("Bearer sesame"), "sesame"));
    }

    #[test]
    fn rejects_wrong_or_malformed_bearer_tokens() {
        assert!(!bearer_matches(&headers_with_auth("Bearer wrong"), "sesame"));
        assert!(!bearer_matches(&headers_with_auth("sesame"), "sesame"));
        assert!(!bearer_matches(&headers_with_auth("bearer sesame"), "sesame"));
        assert!(!bearer_matches(&HeaderMap::new(), "sesame"));
    }
}
