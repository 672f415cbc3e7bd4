use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::Cancelled;
use crate::random::RandomSource;

pub const SLOW_ECHO_DELAY: Duration = Duration::from_secs(5);
pub const JITTERED_ECHO_BASE: Duration = Duration::from_secs(1);
pub const JITTERED_ECHO_SPREAD_MS: i64 = 800;
pub const RANDOM_OUTCOME_BASE: Duration = Duration::from_millis(500);
pub const RANDOM_OUTCOME_SPREAD_MS: i64 = 200;

// RFC 7807 problem document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl Problem {
    pub fn new(status: StatusCode, detail: String) -> Self {
        Self {
            kind: "about:blank".to_string(),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            detail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChaosBody {
    Text(String),
    // serialized as a JSON string
    Json(String),
    Problem(Problem),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaosOutcome {
    pub delay: Duration,
    pub status: StatusCode,
    pub body: ChaosBody,
}

impl ChaosOutcome {
    fn text(delay: Duration, body: String) -> Self {
        Self {
            delay,
            status: StatusCode::OK,
            body: ChaosBody::Text(body),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl IntoResponse for ChaosOutcome {
    fn into_response(self) -> Response {
        match self.body {
            ChaosBody::Text(text) => (self.status, text).into_response(),
            ChaosBody::Json(value) => (self.status, Json(value)).into_response(),
            ChaosBody::Problem(problem) => (
                self.status,
                [(header::CONTENT_TYPE, "application/problem+json")],
                Json(problem),
            )
                .into_response(),
        }
    }
}

// Sleeps for `delay` unless `cancel` fires first.
pub async fn cancellable_delay(delay: Duration, cancel: &CancellationToken) -> Result<(), Cancelled> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Cancelled),
        _ = tokio::time::sleep(delay) => Ok(()),
    }
}

// `base` shifted by a uniform draw from `[-spread_ms, spread_ms)`, floored at zero.
pub fn jittered(base: Duration, spread_ms: i64, random: &dyn RandomSource) -> Duration {
    let jitter = random.next_in_range(-spread_ms, spread_ms);
    let millis = base.as_millis() as i64 + jitter;
    Duration::from_millis(millis.max(0) as u64)
}

pub fn immediate_echo(id: i32) -> ChaosOutcome {
    ChaosOutcome::text(
        Duration::ZERO,
        format!("Fast response from server to request #{}", id),
    )
}

// stalled backend
pub async fn slow_echo(id: i32, cancel: &CancellationToken) -> Result<ChaosOutcome, Cancelled> {
    cancellable_delay(SLOW_ECHO_DELAY, cancel).await?;
    Ok(ChaosOutcome::text(
        SLOW_ECHO_DELAY,
        format!("Slow response from server to request #{}", id),
    ))
}

pub async fn jittered_echo(
    id: &str,
    random: &dyn RandomSource,
    cancel: &CancellationToken,
) -> Result<ChaosOutcome, Cancelled> {
    let delay = jittered(JITTERED_ECHO_BASE, JITTERED_ECHO_SPREAD_MS, random);
    cancellable_delay(delay, cancel).await?;
    Ok(ChaosOutcome::text(
        delay,
        format!(
            "Deferred response with ~{}ms from server to request #{}",
            delay.as_millis(),
            id
        ),
    ))
}

// Coin flip after a fixed delay: 200 or 418. Jitter is drawn every call but
// only applied with use_jitter; the outcome is a separate later draw.
pub async fn randomized_outcome(
    id: &str,
    use_jitter: bool,
    random: &dyn RandomSource,
    cancel: &CancellationToken,
) -> Result<ChaosOutcome, Cancelled> {
    let with_jitter = jittered(RANDOM_OUTCOME_BASE, RANDOM_OUTCOME_SPREAD_MS, random);
    let delay = if use_jitter { with_jitter } else { RANDOM_OUTCOME_BASE };
    cancellable_delay(delay, cancel).await?;

    if random.next_unit() > 0.5 {
        return Ok(ChaosOutcome {
            delay,
            status: StatusCode::OK,
            body: ChaosBody::Json(format!("Success response with from server to request #{}", id)),
        });
    }

    let status = StatusCode::IM_A_TEAPOT;
    Ok(ChaosOutcome {
        delay,
        status,
        body: ChaosBody::Problem(Problem::new(
            status,
            format!("Failed response with from server to request #{}", id),
        )),
    })
}
