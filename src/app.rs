use axum::{Router, routing::get};
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;
use crate::throttle::throttled;

pub fn build_router(state: Arc<AppState>) -> Router {
    let values: Router<Arc<AppState>> = Router::new()
        .route(
            "/api/Values",
            get(handlers::list_values).post(handlers::create_value),
        )
        .route(
            "/api/Values/{id}",
            get(handlers::get_value)
                .put(handlers::update_value)
                .delete(handlers::delete_value),
        );

    Router::new()
        .merge(throttled(values, state.throttle.clone()))
        .route("/api/NonThrottledGood/{id}", get(handlers::immediate_echo))
        .route("/api/NonThrottledFaulting/{id}", get(handlers::slow_echo))
        .route("/api/VaryingResponseTime/{id}", get(handlers::jittered_echo))
        .route("/api/VaryingResponseStatus/{id}", get(handlers::randomized_outcome))
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}
