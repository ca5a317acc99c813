use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

mod config;
mod dispatch;
mod handlers;
mod logging;
mod metrics;
mod middleware;
mod server;
mod telemetry;

use telemetry::DatasetState;

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Loaded once at startup, never mutated afterwards.
    pub dataset: DatasetState,
}

#[tokio::main]
async fn main() {
    let cfg = config::Config::parse();

    if let Err(e) = logging::init(cfg.log_format) {
        eprintln!("logging already initialised: {e}");
    }

    info!(
        data_path = %cfg.data_path.display(),
        bind = %cfg.bind,
        "starting latency checker"
    );

    // ── 1. Load the dataset (failure leaves it Unavailable) ─────
    let dataset = DatasetState::load(&cfg.data_path);
    if !dataset.is_ready() {
        warn!("serving health checks only until the data file is fixed and the service restarted");
    }

    // ── 2. Build shared state + router ──────────────────────────
    let state = Arc::new(AppState { dataset });
    let app = server::create_router(state);

    // ── 3. Bind & serve ─────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(cfg.bind)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(bind = %cfg.bind, error = %e, "failed to bind");
            std::process::exit(1);
        });

    info!(addr = %cfg.bind, "server listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
