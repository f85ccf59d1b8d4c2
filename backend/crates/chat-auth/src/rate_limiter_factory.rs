use crate::{ConnectionRateLimiter, RateLimitConfig};

use governor::Quota;

/// Hands every admitted connection its own message budget.
///
/// Budgets are never shared, so one noisy client cannot starve another
/// in the same session.
#[derive(Debug, Clone)]
pub struct RateLimiterFactory {
    quota: Quota,
    config: RateLimitConfig,
}

impl RateLimiterFactory {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            quota: config.quota(),
            config,
        }
    }

    pub fn create(&self) -> ConnectionRateLimiter {
        ConnectionRateLimiter::with_quota(self.quota, self.config)
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}

impl Default for RateLimiterFactory {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
