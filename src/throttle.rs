use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::metrics::{ADMITTED_TOTAL, REJECTED_TOTAL};
use crate::rate_limit::FixedWindowLimiter;
use crate::rejection::Rejection;

// Limiter plus what to answer when it says no
#[derive(Clone)]
pub struct Throttle {
    pub limiter: Arc<FixedWindowLimiter>,
    pub rejection: Rejection,
}

impl Throttle {
    pub fn new(limiter: Arc<FixedWindowLimiter>, rejection: Rejection) -> Self {
        Self { limiter, rejection }
    }
}

// Middleware: admission check first, the wrapped handler only runs when admitted.
pub async fn enforce(State(throttle): State<Throttle>, req: Request, next: Next) -> Response {
    let decision = throttle.limiter.admit();

    if !decision.admitted {
        REJECTED_TOTAL.inc();
        debug!(
            path = %req.uri().path(),
            retry_after = ?decision.retry_after,
            "Rate limit exceeded, request refused"
        );
        return throttle.rejection.respond(decision.retry_after);
    }

    ADMITTED_TOTAL.inc();
    next.run(req).await
}

// Gates every route already registered on `routes` behind `throttle`.
pub fn throttled<S>(routes: Router<S>, throttle: Throttle) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes.route_layer(middleware::from_fn_with_state(throttle, enforce))
}
