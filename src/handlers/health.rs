use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
}

// ─── GET / ───────────────────────────────────────────────────────
/// Liveness probe. Answers the same whether or not the dataset loaded.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        message: "Latency checker service is running.",
    })
}
