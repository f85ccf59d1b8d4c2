use crate::ShutdownCoordinator;

use tokio::sync::watch;

/// Per-task view of the stop signal. Taking a guard after shutdown still
/// observes it.
pub struct ShutdownGuard {
    stopped: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            stopped: coordinator.watch(),
        }
    }

    /// Resolves once shutdown is requested. Cancel safe, so it can sit in a
    /// `select!` loop.
    pub async fn wait(&mut self) {
        if self.stopped.wait_for(|stopped| *stopped).await.is_err() {
            // Every coordinator is gone, nobody can signal any more.
            std::future::pending::<()>().await;
        }
    }

    pub fn poll_shutdown(&self) -> bool {
        *self.stopped.borrow()
    }
}
