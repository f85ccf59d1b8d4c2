use crate::ConfigErrorResult;
use crate::validation::check_range;

use serde::Deserialize;

pub const MAX_REQUESTS_RANGE: (u32, u32) = (1, 10_000);
pub const DEFAULT_RATE_LIMIT_REQUESTS: u32 = 100;

pub const WINDOW_RANGE: (u64, u64) = (1, 3600);
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Inbound message budget, applied per connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum messages per window
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_REQUESTS,
            window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range("rate_limit", "max_requests", self.max_requests, MAX_REQUESTS_RANGE)?;
        check_range("rate_limit", "window_secs", self.window_secs, WINDOW_RANGE)
    }
}
