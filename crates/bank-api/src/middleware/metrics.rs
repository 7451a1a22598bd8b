//! # Request Metrics
//!
//! HTTP-level metrics recorded through the `metrics` facade. The binary
//! installs a Prometheus recorder and `/metrics` renders it; without a
//! recorder the calls are no-ops.
//!
//! - `bank_http_requests_total{method, path, status}`
//! - `bank_http_errors_total{method, path, status}` (4xx and 5xx)
//! - `bank_http_request_duration_seconds{method, path}`

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Replace numeric path segments with `{id}` to bound label cardinality.
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Middleware that records HTTP request metrics.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status();
    let status_label = status.as_u16().to_string();

    metrics::counter!(
        "bank_http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status_label.clone()
    )
    .increment(1);
    if status.is_client_error() || status.is_server_error() {
        metrics::counter!(
            "bank_http_errors_total",
            "method" => method.clone(),
            "path" => path.clone(),
            "status" => status_label
        )
        .increment(1);
    }
    metrics::histogram!(
        "bank_http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(duration);

    response
}
