//! Deposit address API server binary entrypoint.

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use depot_common::config::AppConfig;

use depot_api::routes::create_router;
use depot_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("depot_api=debug,depot_quidax=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting deposit address API server...");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(base_url = %config.quidax_base_url, "Configuration loaded");

    // Build application state
    let state = AppState::from_config(&config)?;

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("API server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    tracing::info!("Deposit address API server stopped.");
    Ok(())
}
