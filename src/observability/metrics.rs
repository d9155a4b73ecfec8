//! Metrics collection and exposition.
//!
//! # Metrics
//! - `routes_actuator_requests_total` (counter): requests by method, route template, status
//! - `routes_actuator_request_duration_seconds` (histogram): latency by method, route template
//! - `routes_actuator_operations_total` (counter): adapter operations by name and outcome
//!
//! # Design Decisions
//! - Labels use the matched route template (`/camel/routes/{id}/stop`), never
//!   the raw path, to keep cardinality bounded

use ::metrics::{counter, histogram};
use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    counter!(
        "routes_actuator_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "routes_actuator_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of one adapter operation (`ok`, `not_found`, `error`).
pub fn record_operation(operation: &'static str, outcome: &'static str) {
    counter!(
        "routes_actuator_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Middleware recording request count and latency.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;

    record_request(&method, &path, response.status().as_u16(), start);
    response
}
