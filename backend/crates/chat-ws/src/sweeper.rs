use crate::{HubHandle, ShutdownGuard};

use chat_config::SweeperConfig;

use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval};

/// Periodically asks the hub to evict idle connections.
pub struct InactivitySweeper {
    hub: HubHandle,
    interval: Duration,
    max_inactivity: Duration,
}

impl InactivitySweeper {
    pub fn new(hub: HubHandle, interval: Duration, max_inactivity: Duration) -> Self {
        Self {
            hub,
            interval,
            max_inactivity,
        }
    }

    pub fn from_config(hub: HubHandle, config: &SweeperConfig) -> Self {
        Self::new(hub, config.interval(), config.max_inactivity())
    }

    pub fn spawn(self, shutdown: ShutdownGuard) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Stops on shutdown or when the hub goes away.
    pub async fn run(self, mut shutdown: ShutdownGuard) {
        info!(
            "Inactivity sweeper started (every {:?}, idle limit {:?})",
            self.interval, self.max_inactivity
        );

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // First tick fires immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.wait() => {
                    debug!("Inactivity sweeper stopping");
                    break;
                }

                _ = ticker.tick() => {
                    match self.hub.sweep(self.max_inactivity, Instant::now()).await {
                        Ok(0) => {}
                        Ok(evicted) => info!("Swept {evicted} inactive connection(s)"),
                        Err(e) => {
                            warn!("Inactivity sweeper stopping, hub unavailable: {e}");
                            break;
                        }
                    }
                }
            }
        }
    }
}
