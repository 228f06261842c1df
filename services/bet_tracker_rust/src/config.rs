//! Runtime configuration for the bet tracker service.

use std::env;
use std::time::Duration;

/// Default HTTP timeout for scoreboard requests, in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Refresh touches pending bets only unless forced
pub const DEFAULT_FORCE_REFRESH: bool = false;

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub http_timeout: Duration,
    pub force_refresh: bool,
}

impl TrackerConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let http_timeout = Duration::from_secs(
            env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        );

        let force_refresh = env::var("FORCE_REFRESH")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_FORCE_REFRESH);

        Self {
            http_timeout,
            force_refresh,
        }
    }
}
