//! Turfbook — Entry Point
//!
//! Initializes configuration, logging, the ledger and catalog adapters,
//! and the HTTP data-entry surface. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Open the JSONL ledger in the configured data dir
//! 4. Load the race-card catalog file
//! 5. Build the wager desk bound to the configured partition
//! 6. Serve the axum router (data entry + /live + /ready)
//! 7. Wait for SIGINT → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::Mutex;
use tracing::info;

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::api::{router, ApiState};
use adapters::catalog::RaceCardFile;
use adapters::persistence::JsonlLedger;
use usecases::desk::WagerDesk;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.app.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        partition = %config.desk.partition,
        "Starting turfbook"
    );

    // ── 3. Open the JSONL ledger ────────────────────────────
    let ledger = Arc::new(
        JsonlLedger::new(&config.ledger.data_dir)
            .await
            .context("Failed to open ledger storage")?,
    );

    // ── 4. Load the race-card catalog ───────────────────────
    let catalog = Arc::new(
        RaceCardFile::load(&config.catalog.race_card)
            .await
            .context("Failed to load race card")?,
    );

    // ── 5. Build the wager desk ─────────────────────────────
    let desk = WagerDesk::new(ledger, catalog, config.desk.partition);
    let state = ApiState {
        desk: Arc::new(Mutex::new(desk)),
        default_tax_rate: config.desk.default_tax_rate,
        default_recent_limit: config.desk.recent_limit,
    };

    // ── 6. Serve the HTTP surface ───────────────────────────
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address))?;
    info!(address = %config.server.bind_address, "HTTP surface listening");

    // ── 7. Run until SIGINT, then drain in-flight requests ──
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("SIGINT received, initiating graceful shutdown");
        })
        .await
        .context("HTTP server failed")?;

    info!("Shutdown complete");
    Ok(())
}
