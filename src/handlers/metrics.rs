use axum::http::StatusCode;
use prometheus::{Encoder, TextEncoder};
use tracing::error;

pub async fn metrics_handler() -> Result<String, StatusCode> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).map_err(|e| {
        error!(error = %e, "Failed to encode metrics");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    String::from_utf8(buffer).map_err(|e| {
        error!(error = %e, "Metrics output was not UTF-8");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
