//! Operational HTTP endpoints.
//!
//! - `/`        : plain-text endpoint index
//! - `/health`  : liveness, always `OK`
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use ebx_core::metrics::CONTENT_TYPE;

use crate::app_state::AppState;

const INDEX_BODY: &str = "eBanking Metrics Exporter\n\n\
                          Endpoints:\n\
                          - /metrics (Prometheus metrics)\n\
                          - /health (Health check)";

pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, INDEX_BODY)
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}
