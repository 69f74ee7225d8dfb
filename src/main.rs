// =============================================================================
// CoinDeck — Main Entry Point
// =============================================================================
//
// Startup order matters: the CSV snapshots are loaded and the summary table
// derived BEFORE the API binds. A missing, empty or malformed data set aborts
// the process — the server never comes up without a well-formed price table.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod config;
mod engine;
mod error;
mod indicators;
mod market_data;
mod types;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::DashboardConfig;

const CONFIG_PATH: &str = "dashboard_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("CoinDeck dashboard server starting up");

    let mut config = DashboardConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        DashboardConfig::default()
    });

    // Env overrides for the two deployment-specific settings.
    if let Ok(dir) = std::env::var("COINDECK_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(addr) = std::env::var("COINDECK_BIND_ADDR") {
        config.bind_addr = addr;
    }

    info!(
        data_dir = %config.data_dir.display(),
        file_pattern = %config.file_pattern,
        ma_window = config.ma_window,
        rsi_window = config.rsi_window,
        "configuration resolved"
    );

    // ── 2. Load snapshots & build shared state (startup-fatal) ───────────
    let table = market_data::load(&config).context("failed to load price snapshots")?;
    let state = Arc::new(AppState::new(config, table));

    info!(
        records = state.table.len(),
        names = state.names.len(),
        summary_rows = state.summary.len(),
        "price table and summary built"
    );

    // ── 3. Serve the API ─────────────────────────────────────────────────
    let bind_addr = state.config.bind_addr.clone();
    let app = api::rest::router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            warn!("Shutdown signal received — stopping gracefully");
        })
        .await
        .context("API server failed")?;

    info!("CoinDeck shut down complete.");
    Ok(())
}
