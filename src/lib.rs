pub mod app;
pub mod chaos;
pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod random;
pub mod rate_limit;
pub mod rejection;
pub mod state;
pub mod telemetry;
pub mod throttle;
