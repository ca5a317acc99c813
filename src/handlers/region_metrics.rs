use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::dispatch::{self, MetricsRequest, MetricsResponse};
use crate::AppState;

use super::AppError;

// ─── POST / ──────────────────────────────────────────────────────

/// Per-region latency / uptime summary for the requested regions.
///
/// The body is validated before the dataset is consulted, so a malformed
/// request is reported as such even while the dataset is unavailable.
pub async fn region_metrics(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MetricsRequest>, JsonRejection>,
) -> Result<Json<MetricsResponse>, AppError> {
    let Json(request) = payload?;

    let dataset = state.dataset.dataset().map_err(|e| {
        warn!(reason = %e.reason, "rejecting metrics request");
        e
    })?;

    let response = dispatch::handle(&request, dataset);
    let not_found = response
        .iter()
        .filter(|(_, result)| result.metrics().is_none())
        .count();
    info!(
        regions = request.regions.len(),
        threshold_ms = request.threshold_ms,
        entries = response.len(),
        not_found,
        "region metrics computed"
    );

    Ok(Json(response))
}
