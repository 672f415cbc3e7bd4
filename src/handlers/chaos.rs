use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::chaos::{self, ChaosOutcome};
use crate::error::Cancelled;
use crate::metrics::{CHAOS_DELAY, CHAOS_FAILURES_TOTAL, CHAOS_REQUESTS_TOTAL};
use crate::state::{AppState, InFlight};

#[derive(Debug, Deserialize)]
pub struct OutcomeQuery {
    #[serde(rename = "useJitter")]
    pub use_jitter: Option<bool>,
}

pub async fn immediate_echo(Path(id): Path<i32>) -> Response {
    record("immediate_echo", chaos::immediate_echo(id))
}

pub async fn slow_echo(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> Response {
    let in_flight = state.in_flight("slow_echo");
    let result = chaos::slow_echo(id, in_flight.token()).await;
    respond(in_flight, result)
}

pub async fn jittered_echo(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let in_flight = state.in_flight("jittered_echo");
    let result = chaos::jittered_echo(&id, state.random.as_ref(), in_flight.token()).await;
    respond(in_flight, result)
}

pub async fn randomized_outcome(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<OutcomeQuery>,
) -> Response {
    let in_flight = state.in_flight("randomized_outcome");
    let use_jitter = query.use_jitter.unwrap_or(false);
    let result =
        chaos::randomized_outcome(&id, use_jitter, state.random.as_ref(), in_flight.token()).await;
    respond(in_flight, result)
}

// Cancelled on shutdown: bare 503, no body. The guard's drop does the counting.
fn respond(in_flight: InFlight, result: Result<ChaosOutcome, Cancelled>) -> Response {
    let endpoint = in_flight.endpoint();
    match result {
        Ok(outcome) => {
            in_flight.finish();
            record(endpoint, outcome)
        }
        Err(Cancelled) => {
            drop(in_flight);
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

fn record(endpoint: &'static str, outcome: ChaosOutcome) -> Response {
    CHAOS_REQUESTS_TOTAL.inc();
    CHAOS_DELAY.observe(outcome.delay.as_secs_f64());
    if !outcome.is_success() {
        CHAOS_FAILURES_TOTAL.inc();
    }
    debug!(
        endpoint,
        delay_ms = outcome.delay.as_millis() as u64,
        status = outcome.status.as_u16(),
        "Chaos response"
    );
    outcome.into_response()
}
