use crate::{BroadcastMessage, ConnectionHandle, ConnectionId};

use std::time::Duration;

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::time::Instant;
use uuid::Uuid;

/// Everything that reads or changes hub state arrives as one of these.
#[derive(Debug)]
pub enum HubCommand {
    Admit(ConnectionHandle),
    Remove(ConnectionId),
    BroadcastToSession {
        session_id: Uuid,
        message: BroadcastMessage,
    },
    Sweep {
        idle_threshold: Duration,
        now: Instant,
        reply: oneshot::Sender<usize>,
    },
    Stats {
        reply: oneshot::Sender<HubStats>,
    },
    SessionSize {
        session_id: Uuid,
        reply: oneshot::Sender<usize>,
    },
}

/// Point-in-time hub counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HubStats {
    pub connections: usize,
    pub sessions: usize,
}
