//! Cardfolio API server entry point.
//!
//! Startup order matters: configuration is validated first (a misconfigured
//! storage backend must kill the process before it accepts traffic), then
//! the database pool is built and migrated, then the storage backend and
//! router are assembled from the validated pieces.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cardfolio_api::config::ApiConfig;
use cardfolio_api::routes;
use cardfolio_api::state::AppState;
use cardfolio_api::storage::ImageStorage;
use cardfolio_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Cardfolio API server...");

    // Load configuration (fatal on invalid values or missing remote
    // storage credentials)
    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        database = %config.database_path.display(),
        "Configuration loaded"
    );

    // Connect to the database and run migrations
    let db = Database::new(DbConfig::new(config.database_path.clone())).await?;
    info!("Database ready");

    // Build the storage backend from validated configuration
    let storage = ImageStorage::from_config(config.storage.clone());
    info!(backend = storage.backend_name(), "Image storage configured");

    // Create shared state
    let state = Arc::new(AppState {
        db,
        storage,
        config: config.clone(),
    });

    // Build the router and serve
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
