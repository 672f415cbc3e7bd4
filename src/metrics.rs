use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};


lazy_static! {
    pub static ref ADMITTED_TOTAL: Counter =
        register_counter!("testbed_admitted_total", "Requests admitted on throttled routes").unwrap();
    pub static ref REJECTED_TOTAL: Counter =
        register_counter!("testbed_rejected_total", "Requests refused by the rate limiter").unwrap();
    pub static ref CHAOS_REQUESTS_TOTAL: Counter =
        register_counter!("testbed_chaos_requests_total", "Chaos endpoint calls that completed").unwrap();
    pub static ref CHAOS_FAILURES_TOTAL: Counter =
        register_counter!("testbed_chaos_failures_total", "Simulated failures returned").unwrap();
    pub static ref CANCELLED_TOTAL: Counter =
        register_counter!("testbed_cancelled_total", "Requests abandoned during an artificial delay").unwrap();
    pub static ref CHAOS_DELAY: Histogram = register_histogram!(
        "testbed_chaos_delay_seconds",
        "Artificial delay applied by chaos endpoints",
        vec![0.1, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 5.0, 10.0]
    )
    .unwrap();
}
