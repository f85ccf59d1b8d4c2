use crate::{ActivityTracker, ConnectionId, OutboundFrame};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

/// The hub's view of a live connection.
///
/// Holds the only sender for the connection's outbound queue, so dropping the
/// handle closes the queue and lets the outbound pump finish.
#[derive(Debug)]
pub struct ConnectionHandle {
    pub connection_id: ConnectionId,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub connected_at: DateTime<Utc>,
    pub sender: mpsc::Sender<OutboundFrame>,
    pub activity: ActivityTracker,
}

impl ConnectionHandle {
    pub fn new(
        connection_id: ConnectionId,
        user_id: Uuid,
        session_id: Uuid,
        sender: mpsc::Sender<OutboundFrame>,
        activity: ActivityTracker,
    ) -> Self {
        Self {
            connection_id,
            user_id,
            session_id,
            connected_at: Utc::now(),
            sender,
            activity,
        }
    }

    /// Time since admission, for eviction logs.
    pub fn age(&self) -> TimeDelta {
        Utc::now() - self.connected_at
    }
}
