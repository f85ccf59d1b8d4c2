use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::Instant;

/// Last-activity clock shared between a connection's pumps and the hub.
///
/// Stored as milliseconds since `origin` so it can be updated without a lock.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    origin: Instant,
    last_millis: Arc<AtomicU64>,
}

impl ActivityTracker {
    /// Starts as active "now".
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            last_millis: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn touch(&self) {
        self.touch_at(Instant::now());
    }

    pub fn touch_at(&self, at: Instant) {
        let millis = at.saturating_duration_since(self.origin).as_millis();
        let millis = u64::try_from(millis).unwrap_or(u64::MAX);
        // Never move backwards if two pumps race.
        self.last_millis.fetch_max(millis, Ordering::Relaxed);
    }

    pub fn last_activity(&self) -> Instant {
        self.origin + Duration::from_millis(self.last_millis.load(Ordering::Relaxed))
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity())
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}
