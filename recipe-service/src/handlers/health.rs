use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::services::metrics::get_metrics;
use crate::startup::AppState;

/// Fixed liveness payload served on `/`.
pub const ROOT_STATUS: &str = "SavorAI Backend Running";

/// `GET /`: static status, independent of upstream health.
pub async fn root() -> impl IntoResponse {
    Json(json!({ "status": ROOT_STATUS }))
}

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "recipe-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness check: the completion provider must be usable.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.generator.client().health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::warn!(error = %e, "Completion provider not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "error": e.to_string() })),
            )
        }
    }
}

/// Prometheus metrics endpoint.
pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
