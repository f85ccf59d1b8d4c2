use std::num::NonZeroU32;
use std::time::Duration;

use governor::Quota;

/// Per-connection message budget: `max_requests` every `window_secs`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum messages per window
    pub max_requests: u32,
    /// Window duration in seconds
    pub window_secs: u64,
}

impl RateLimitConfig {
    /// Full window budget available up front, replenished evenly across the window.
    pub fn quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.max_requests).unwrap_or(NonZeroU32::MIN);
        let period = Duration::from_secs(self.window_secs.max(1)) / burst.get();

        Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_secs: 60,
        }
    }
}
