//! event-gateway server entry point.
//!
//! Starts the Axum HTTP server. The store connection is opened lazily by
//! the first request that needs it.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use event_gateway::api;
use event_gateway::app_state::AppState;
use event_gateway::config::GatewayConfig;
use event_gateway::connection::HandleCache;
use event_gateway::store::StoreConnector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting event-gateway");
    if config.database_url.is_none() {
        tracing::warn!("DATABASE_URL is not set; store requests will fail until it is configured");
    }

    // Connection cache; nothing is dialled until the first request
    let connector = Arc::new(StoreConnector::new(config.pool.clone()));
    let cache = HandleCache::new(config.database_url.clone(), connector);

    let app = api::build_app(AppState::new(cache));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
