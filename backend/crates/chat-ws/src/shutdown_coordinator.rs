use crate::ShutdownGuard;

use std::sync::Arc;

use log::info;
use tokio::sync::watch;

/// Process-wide stop signal. Clones share one signal; it can only go from
/// running to stopped.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    stopped: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (stopped, _) = watch::channel(false);
        Self {
            stopped: Arc::new(stopped),
        }
    }

    /// Idempotent; only the first call logs.
    pub fn shutdown(&self) {
        if !self.stopped.send_replace(true) {
            info!("Shutdown requested, stopping hub, sweeper and listener");
        }
    }

    pub fn is_shutdown(&self) -> bool {
        *self.stopped.borrow()
    }

    /// Guard for one background task or connection
    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self)
    }

    pub(crate) fn watch(&self) -> watch::Receiver<bool> {
        self.stopped.subscribe()
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
