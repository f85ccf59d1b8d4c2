use crate::{AuthError, RateLimitConfig, Result as AuthErrorResult};

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Inbound budget for one socket. Running out rejects the message, not the
/// connection.
pub struct ConnectionRateLimiter {
    limiter: DirectLimiter,
    config: RateLimitConfig,
}

impl ConnectionRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_quota(config.quota(), config)
    }

    /// Reuses a quota already computed by [`crate::RateLimiterFactory`].
    pub(crate) fn with_quota(quota: Quota, config: RateLimitConfig) -> Self {
        Self {
            limiter: RateLimiter::direct(quota),
            config,
        }
    }

    /// Spend one unit of budget.
    #[track_caller]
    pub fn check(&self) -> AuthErrorResult<()> {
        match self.limiter.check() {
            Ok(()) => Ok(()),
            Err(_) => Err(AuthError::rate_limited(
                self.config.max_requests,
                self.config.window_secs,
            )),
        }
    }
}
