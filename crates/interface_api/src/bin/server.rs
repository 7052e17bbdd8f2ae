//! Fund Ledger - API Server Binary
//!
//! This binary starts the HTTP API server for the fund ledger dashboard.
//!
//! # Usage
//!
//! ```bash
//! API_DISPLAY_TIMEZONE=Asia/Ho_Chi_Minh cargo run --bin fund-ledger-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DISPLAY_TIMEZONE` - IANA zone for every displayed timestamp (required)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_REGION_CACHE_TTL_SECS` - Region lookup cache lifetime (default: 3600)
//! * `API_REGION_CACHE_CAPACITY` - Region lookup cache size (default: 10000)
//! * `API_REGIONS_FILE` - JSON province/ward reference table

use std::net::SocketAddr;
use std::sync::Arc;

use domain_investor::{InMemoryRegionDirectory, RegionDirectory};
use interface_api::{config::ApiConfig, create_router, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded or names no valid display zone
/// - The region reference file cannot be read or parsed
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;

    init_tracing(&config.log_level);

    let regions = load_regions(config.regions_file.as_deref())?;

    let state = AppState::in_memory(config.clone(), regions).map_err(|e| {
        tracing::error!(error = %e, "refusing to start");
        e
    })?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        timezone = %state.zone,
        "Starting Fund Ledger API Server"
    );

    let app = create_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Loads the province/ward reference table.
///
/// Without a file the directory is empty and every address is rejected.
fn load_regions(path: Option<&str>) -> Result<Arc<dyn RegionDirectory>, Box<dyn std::error::Error>> {
    let directory = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let directory = InMemoryRegionDirectory::from_json(&json)?;
            tracing::info!(
                path,
                provinces = directory.province_count(),
                wards = directory.ward_count(),
                "region table loaded"
            );
            directory
        }
        None => {
            tracing::warn!("API_REGIONS_FILE not set, addresses cannot be validated");
            InMemoryRegionDirectory::default()
        }
    };

    Ok(Arc::new(directory))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
