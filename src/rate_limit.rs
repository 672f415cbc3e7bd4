use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::clock::Clock;
use crate::config::LimiterConfig;

// Live window - replaced as a whole when it expires, never carried over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    pub window_start: Instant,
    pub count: u32,
}

// Outcome of a single admit() call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionDecision {
    pub admitted: bool,
    // time left in the current window, only set on rejection
    pub retry_after: Option<Duration>,
}

impl AdmissionDecision {
    fn admitted() -> Self {
        Self {
            admitted: true,
            retry_after: None,
        }
    }

    fn rejected(retry_after: Duration) -> Self {
        Self {
            admitted: false,
            retry_after: Some(retry_after),
        }
    }
}

// Fixed window: at most `limit` admissions per `window_duration`.
// Expiry check, rollover and increment share one lock so `count <= limit` holds.
pub struct FixedWindowLimiter {
    window: Mutex<Option<WindowState>>,
    limit: u32,
    window_duration: Duration,
    clock: Arc<dyn Clock>,
}

impl FixedWindowLimiter {
    pub fn new(limit: u32, window_duration: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            window: Mutex::new(None),
            limit,
            window_duration,
            clock,
        }
    }

    pub fn from_config(config: &LimiterConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(config.limit, config.window, clock)
    }

    // None when the end is past what Instant can hold: that window never expires
    fn window_end(&self, state: &WindowState) -> Option<Instant> {
        state.window_start.checked_add(self.window_duration)
    }

    fn is_live(&self, state: &WindowState, now: Instant) -> bool {
        self.window_end(state).is_none_or(|end| now < end)
    }

    pub fn admit(&self) -> AdmissionDecision {
        let mut slot = self.window.lock().unwrap_or_else(|e| e.into_inner());
        // read under the lock so window starts never go backwards
        let now = self.clock.now();

        let state = match *slot {
            Some(state) if self.is_live(&state, now) => state,
            previous => {
                if let Some(previous) = previous {
                    debug!(admitted = previous.count, "Rate limit window expired, starting a new one");
                }
                WindowState {
                    window_start: now,
                    count: 0,
                }
            }
        };

        if state.count < self.limit {
            *slot = Some(WindowState {
                count: state.count + 1,
                ..state
            });
            return AdmissionDecision::admitted();
        }

        *slot = Some(state);
        let retry_after = match self.window_end(&state) {
            Some(end) => end.saturating_duration_since(now),
            None => self.window_duration,
        };
        AdmissionDecision::rejected(retry_after)
    }

    // Stored window, None before the first request. May already be expired.
    pub fn snapshot(&self) -> Option<WindowState> {
        *self.window.lock().unwrap_or_else(|e| e.into_inner())
    }

    // Admissions counted in the window that is live right now
    pub fn current_count(&self) -> u32 {
        let slot = self.window.lock().unwrap_or_else(|e| e.into_inner());
        let now = self.clock.now();
        match *slot {
            Some(state) if self.is_live(&state, now) => state.count,
            _ => 0,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window_duration(&self) -> Duration {
        self.window_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::sync::Barrier;
    use std::thread;

    fn limiter(limit: u32, clock: &Arc<ManualClock>) -> FixedWindowLimiter {
        FixedWindowLimiter::new(limit, Duration::from_secs(5), clock.clone())
    }

    #[test]
    fn admits_up_to_limit_within_window() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(3, &clock);

        for _ in 0..3 {
            assert!(limiter.admit().admitted);
        }
        assert_eq!(limiter.snapshot().unwrap().count, 3);
    }

    #[test]
    fn rejects_everything_past_limit() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(3, &clock);

        let admitted = (0..10).filter(|_| limiter.admit().admitted).count();
        assert_eq!(admitted, 3);
        assert_eq!(limiter.snapshot().unwrap().count, 3);
    }

    #[test]
    fn exhausted_window_resets_after_duration() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(3, &clock);

        for _ in 0..4 {
            limiter.admit();
        }
        assert!(!limiter.admit().admitted);

        clock.advance(Duration::from_secs(6));
        let decision = limiter.admit();
        assert!(decision.admitted);
        assert_eq!(decision.retry_after, None);
        assert_eq!(limiter.snapshot().unwrap().count, 1);
    }

    #[test]
    fn window_end_is_exclusive() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(1, &clock);

        assert!(limiter.admit().admitted);
        clock.advance(Duration::from_millis(4_999));
        assert!(!limiter.admit().admitted);

        clock.advance(Duration::from_millis(1));
        assert!(limiter.admit().admitted);
    }

    #[test]
    fn rejection_reports_time_left_in_window() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(1, &clock);

        limiter.admit();
        clock.advance(Duration::from_secs(2));
        let decision = limiter.admit();
        assert!(!decision.admitted);
        assert_eq!(decision.retry_after, Some(Duration::from_secs(3)));
    }

    #[test]
    fn zero_limit_rejects_all() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(0, &clock);
        assert!(!limiter.admit().admitted);
        assert!(!limiter.admit().admitted);
    }

    #[test]
    fn huge_window_never_expires_instead_of_overflowing() {
        let clock = Arc::new(ManualClock::new());
        let limiter = FixedWindowLimiter::new(3, Duration::from_secs(u64::MAX), clock.clone());

        for _ in 0..3 {
            assert!(limiter.admit().admitted);
        }
        clock.advance(Duration::from_secs(3_600));
        let decision = limiter.admit();
        assert!(!decision.admitted);
        assert_eq!(decision.retry_after, Some(Duration::from_secs(u64::MAX)));
        assert_eq!(limiter.current_count(), 3);
    }

    #[test]
    fn current_count_drops_to_zero_once_window_expires() {
        let clock = Arc::new(ManualClock::new());
        let limiter = limiter(3, &clock);
        assert_eq!(limiter.current_count(), 0);

        for _ in 0..4 {
            limiter.admit();
        }
        assert_eq!(limiter.current_count(), 3);

        clock.advance(Duration::from_secs(5));
        assert_eq!(limiter.current_count(), 0);
        // stored state is untouched until the next admit
        assert_eq!(limiter.snapshot().unwrap().count, 3);
    }

    #[test]
    fn concurrent_burst_admits_exactly_limit() {
        for k in [0usize, 1, 5, 37] {
            let clock = Arc::new(ManualClock::new());
            let limiter = Arc::new(limiter(3, &clock));
            let threads = 3 + k;
            let barrier = Arc::new(Barrier::new(threads));

            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    let limiter = limiter.clone();
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        limiter.admit().admitted
                    })
                })
                .collect();

            let admitted = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|a| *a)
                .count();
            assert_eq!(admitted, 3, "k = {}", k);
        }
    }
}
