use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::clock::Clock;
use crate::config::LimiterConfig;
use crate::metrics::CANCELLED_TOTAL;
use crate::random::RandomSource;
use crate::rate_limit::FixedWindowLimiter;
use crate::rejection::Rejection;
use crate::throttle::Throttle;

// app's shared state

pub struct AppState {
    pub throttle: Throttle,
    pub random: Arc<dyn RandomSource>,
    pub shutdown: CancellationToken, // cancelled once on shutdown
}

impl AppState {
    pub fn new(config: &LimiterConfig, clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        let limiter = Arc::new(FixedWindowLimiter::from_config(config, clock));
        Self {
            throttle: Throttle::new(limiter, Rejection::new(config.rejection_status)),
            random,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn limiter(&self) -> &FixedWindowLimiter {
        &self.throttle.limiter
    }

    pub fn in_flight(&self, endpoint: &'static str) -> InFlight {
        InFlight {
            token: self.shutdown.child_token(),
            endpoint,
            finished: false,
        }
    }
}

// One delayed request. Dropped without finish() means the caller went away
// or the server shut down mid-delay, either way it counts as cancelled.
pub struct InFlight {
    token: CancellationToken,
    endpoint: &'static str,
    finished: bool,
}

impl InFlight {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    pub fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.finished {
            CANCELLED_TOTAL.inc();
            info!(endpoint = self.endpoint, "Request cancelled during artificial delay");
        }
        self.token.cancel();
    }
}
