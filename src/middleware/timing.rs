use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, Instrument};
use uuid::Uuid;

pub const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
pub const RESPONSE_TIME_US: HeaderName = HeaderName::from_static("x-response-time-us");
pub const SERVER_TIMING: HeaderName = HeaderName::from_static("server-timing");

/// Tower-compatible middleware that tags every request with an id and adds:
///
///   X-Request-Id: echoed from the client, or a fresh UUID v4
///   X-Response-Time-Us: total handler wall time in microseconds
///   Server-Timing: same value in the standard Server-Timing format
///
/// Emits one `info!` line per request inside a span carrying the id.
pub async fn timing_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let request_id = req
        .headers()
        .get(&REQUEST_ID)
        .cloned()
        .unwrap_or_else(|| {
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
        });

    let span = tracing::info_span!(
        "request",
        id = request_id.to_str().unwrap_or("invalid"),
        %method,
        %path,
    );

    let start = Instant::now();
    let mut response = next.run(req).instrument(span.clone()).await;
    let elapsed = start.elapsed();
    let us = elapsed.as_micros();

    // ── Inject response headers ─────────────────────────────────
    let headers = response.headers_mut();
    if let Ok(val) = HeaderValue::from_str(&us.to_string()) {
        headers.insert(RESPONSE_TIME_US, val);
    }
    let server_timing = format!("total;dur={:.3}", elapsed.as_secs_f64() * 1000.0);
    if let Ok(val) = HeaderValue::from_str(&server_timing) {
        headers.insert(SERVER_TIMING, val);
    }
    headers.insert(REQUEST_ID, request_id);

    span.in_scope(|| {
        info!(status = response.status().as_u16(), elapsed_us = %us, "request finished");
    });

    response
}
