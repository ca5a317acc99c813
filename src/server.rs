use axum::{middleware as axum_mw, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::middleware::timing;
use crate::AppState;

/// Builds the full Axum `Router` with both routes and global middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ── Health probe + metrics query share the root path ───
        .route(
            "/",
            get(handlers::health::health).post(handlers::region_metrics::region_metrics),
        )
        .with_state(state)
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn(timing::timing_middleware))
        .layer(cors())
}

/// Any origin, method and header; credentials stay disallowed.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
