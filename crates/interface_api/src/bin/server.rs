//! SmartClaim - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration (manual entry only, no API key)
//! cargo run --bin smartclaim-api
//!
//! # Enable receipt extraction
//! SMARTCLAIM_GEMINI_API_KEY=... SMARTCLAIM_PORT=8080 cargo run --bin smartclaim-api
//! ```
//!
//! # Environment Variables
//!
//! * `SMARTCLAIM_HOST` - Server host (default: 0.0.0.0)
//! * `SMARTCLAIM_PORT` - Server port (default: 8080)
//! * `SMARTCLAIM_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `SMARTCLAIM_GEMINI_API_KEY` - Gemini API key
//! * `SMARTCLAIM_GEMINI_MODEL` - Gemini model (default: gemini-2.5-flash-image)
//! * `SMARTCLAIM_TIMEZONE` - IANA zone deciding "today" (default: Asia/Kuala_Lumpur)
//! * `SMARTCLAIM_ORGANIZATION_NAME` - Name printed on the report
//! * `SMARTCLAIM_ZERO_AMOUNT_DISPLAY` - `blank` or `numeric`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::SystemClock;
use infra_extraction::GeminiReceiptExtractor;
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid SMARTCLAIM_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting SmartClaim API server"
    );

    let timezone = config.timezone()?;
    let clock = Arc::new(SystemClock::new(timezone));

    let gemini = config.gemini();
    if !gemini.has_api_key() {
        tracing::warn!("No Gemini API key configured; receipts will open an empty draft");
    }
    let extractor = Arc::new(GeminiReceiptExtractor::new(gemini)?);

    let addr: SocketAddr = config.server_addr().parse()?;
    let state = AppState::new(config, extractor, clock);
    let app = create_router(state);

    tracing::info!(%addr, %timezone, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
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
