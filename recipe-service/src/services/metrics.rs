//! Prometheus metrics for recipe-service.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Safe to call more than once.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Render all recorded metrics in the Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record the outcome of one recipe generation.
pub fn record_generation(outcome: &'static str) {
    counter!("recipe_generations_total", "outcome" => outcome).increment(1);
}

/// Record how long the completion provider took to answer.
pub fn record_provider_latency(elapsed: Duration) {
    histogram!("completion_provider_latency_seconds").record(elapsed.as_secs_f64());
}
