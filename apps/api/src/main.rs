//! # Pantry API Server
//!
//! ## Startup
//! ```text
//! init tracing ─► load config ─► open database (create, migrate, seed users)
//!      ─► build router ─► bind ─► serve until Ctrl+C / SIGTERM ─► close pool
//! ```
//!
//! Any failure before the listener binds is fatal.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pantry_api::config::ApiConfig;
use pantry_api::{build_router, AppState};
use pantry_db::Database;

const DEFAULT_LOG_FILTER: &str = "info,pantry=debug,sqlx=warn,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_target(true)
        .init();

    info!("Starting Pantry API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        addr = %config.socket_addr(),
        db_path = %config.database_path.display(),
        "Configuration loaded"
    );

    // Open database: creates the file, applies the schema, seeds demo users
    let db = Database::new(config.db_config())
        .await
        .context("failed to initialize database")?;

    let (total, applied) = db.migration_status().await?;
    info!(total, applied, "Database ready");

    let state = AppState {
        db: db.clone(),
        config: config.clone(),
    };
    let app = build_router(state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
