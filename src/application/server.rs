use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::application::routes::app_router;
use crate::application::state::{AppState, AppStateConfig};
use crate::infrastructure::database::Database;
use crate::infrastructure::tmdb::TmdbClient;

pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub tmdb_url: String,
    pub tmdb_api_key: String,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let database = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    if config.tmdb_api_key.is_empty() {
        warn!("MOVIELOG_TMDB_API_KEY is not set; movie search and import will fail");
    }
    let tmdb = TmdbClient::new(&config.tmdb_url, config.tmdb_api_key)
        .context("failed to configure TMDB client")?;

    let state = AppState::from_database(
        &database,
        AppStateConfig {
            metadata_provider: Arc::new(tmdb),
        },
    );

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    let app = app_router(state);

    info!(
        address = %config.bind_address,
        database = %config.database_url,
        tmdb = %config.tmdb_url,
        "starting HTTP server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");

    Ok(())
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if signal handlers fail
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
