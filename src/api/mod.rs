use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{error, info};

pub mod errors;
pub mod handlers;
pub mod routes;

use crate::services::shared::env::get_env_variable;
use crate::services::AppState;
use routes::create_router;

pub async fn api() -> anyhow::Result<()> {
    let state = AppState::from_env()?;

    // warm the rate table once at boot; if the feed is down the server still
    // comes up and conversions answer RateNotFound until a refresh succeeds
    if let Err(e) = state.rates.refresh().await {
        error!("initial rate refresh failed: {}", e);
    }

    let port = get_env_variable("PORT")
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(8080);

    let router = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {}", addr);
    Ok(axum::serve(listener, router.into_make_service()).await?)
}
