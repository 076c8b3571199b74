use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::services::AppState;

use super::handlers::{
    add_fee, check_auth, convert, edit_fee, list_fees, refresh_rates, remove_fee,
};

pub fn create_router(state: AppState) -> Router {
    let conversion_routes = Router::new()
        .route("/convert", post(convert))
        .route("/refresh-rates", post(refresh_rates));

    let fee_routes = Router::new()
        .route("/fees", get(list_fees).post(add_fee))
        .route("/fees/{id}", put(edit_fee).delete(remove_fee))
        .layer(axum::middleware::from_fn(check_auth));

    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ]);

    Router::new()
        .nest("/public/conversion", conversion_routes)
        .nest("/admin", fee_routes)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
