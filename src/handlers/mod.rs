pub mod health;
pub mod region_metrics;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::telemetry::DatasetUnavailable;

/// Fixed message for every request made while the dataset is unavailable.
pub const DATA_UNAVAILABLE_DETAIL: &str = "Data loading failed. Check telemetry.json path.";

// ─── Unified error type ──────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", DATA_UNAVAILABLE_DETAIL)]
    DataUnavailable(#[from] DatasetUnavailable),

    /// Body rejected by the JSON extractor (syntax, content type, shape).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::DataUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
        };

        let body = serde_json::json!({
            "detail": self.to_string(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
