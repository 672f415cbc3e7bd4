use axum::http::StatusCode;
use clap::Parser;
use std::time::Duration;

use crate::error::ServerError;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "resilience-testbed")]
#[command(about = "Throttled and chaos endpoints for exercising client resilience strategies")]
pub struct Args {
    // Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    // Port to run the server on
    #[arg(short, long, default_value_t = 45179)]
    pub port: u16,

    // Max admitted requests per window on throttled routes
    #[arg(long, default_value_t = 3)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub rate_window: u64,

    // Status code returned when a request is refused
    #[arg(long, default_value_t = 429, value_parser = clap::value_parser!(u16).range(400..600))]
    pub rejection_status: u16,

    // Seed for chaos randomness, makes a whole run reproducible
    #[arg(long)]
    pub seed: Option<u64>,

    // Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn limiter_config(&self) -> Result<LimiterConfig, ServerError> {
        let rejection_status = StatusCode::from_u16(self.rejection_status)
            .map_err(|e| ServerError::Config(format!("rejection status: {}", e)))?;

        Ok(LimiterConfig {
            limit: self.rate_limit,
            window: Duration::from_secs(self.rate_window),
            rejection_status,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimiterConfig {
    pub limit: u32,
    pub window: Duration,
    pub rejection_status: StatusCode,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            limit: 3,
            window: Duration::from_secs(5),
            rejection_status: StatusCode::TOO_MANY_REQUESTS,
        }
    }
}
