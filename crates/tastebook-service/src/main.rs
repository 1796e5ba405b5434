//! Tastebook Service - HTTP API for restaurants and reviews
//!
//! This is the main entry point for the tastebook service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tastebook_service::{create_router, AppState, ServiceConfig};
use tastebook_store::StoreClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tastebook=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tastebook Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env()?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        store_backend = ?config.store_backend,
        key_namespace = %config.key_namespace,
        max_page_size = config.max_page_size,
        "Service configuration loaded"
    );

    // Connect up front so an unreachable store stops startup instead of the first request
    let store = StoreClient::new(config.store_config());
    store.handle().await?;

    // Build app state
    let state = AppState::new(store, config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
