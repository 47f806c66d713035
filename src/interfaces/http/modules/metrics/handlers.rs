//! Prometheus metrics handler
//!
//! Exposes `GET /metrics` in Prometheus text format, rendered from the
//! global `metrics-exporter-prometheus` recorder. Besides the HTTP series,
//! the booking engine publishes `bookings_created_total` and
//! `booking_conflicts_total`.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// Shared state for the metrics endpoint
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// `GET /metrics`, Prometheus scrape endpoint
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}
