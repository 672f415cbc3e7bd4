use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;
use crate::state::AppState;

pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let limiter = state.limiter();
    let current_count = limiter.current_count();

    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "rate_limit": {
            "limit": limiter.limit(),
            "window_secs": limiter.window_duration().as_secs(),
            "current_count": current_count
        }
    }))
}
