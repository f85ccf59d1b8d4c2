use crate::{
    BroadcastMessage, ConnectionHandle, ConnectionId, HubCommand, HubStats,
    Result as WsErrorResult, WsError,
};

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use uuid::Uuid;

/// Cloneable submitter for hub commands.
///
/// Submissions wait only for space in the hub's mailbox, never on a
/// connection's outbound queue.
#[derive(Debug, Clone)]
pub struct HubHandle {
    commands: mpsc::Sender<HubCommand>,
}

impl HubHandle {
    pub(crate) fn new(commands: mpsc::Sender<HubCommand>) -> Self {
        Self { commands }
    }

    pub async fn admit(&self, connection: ConnectionHandle) -> WsErrorResult<()> {
        self.submit(HubCommand::Admit(connection)).await
    }

    /// Idempotent.
    pub async fn remove(&self, connection_id: ConnectionId) -> WsErrorResult<()> {
        self.submit(HubCommand::Remove(connection_id)).await
    }

    pub async fn broadcast_to_session(
        &self,
        session_id: Uuid,
        message: BroadcastMessage,
    ) -> WsErrorResult<()> {
        self.submit(HubCommand::BroadcastToSession {
            session_id,
            message,
        })
        .await
    }

    /// Evict connections idle longer than `idle_threshold` as of `now`.
    /// Returns how many were evicted.
    pub async fn sweep(&self, idle_threshold: Duration, now: Instant) -> WsErrorResult<usize> {
        let (reply, rx) = oneshot::channel();
        self.submit(HubCommand::Sweep {
            idle_threshold,
            now,
            reply,
        })
        .await?;
        rx.await.map_err(|_| WsError::hub_unavailable())
    }

    pub async fn stats(&self) -> WsErrorResult<HubStats> {
        let (reply, rx) = oneshot::channel();
        self.submit(HubCommand::Stats { reply }).await?;
        rx.await.map_err(|_| WsError::hub_unavailable())
    }

    pub async fn session_size(&self, session_id: Uuid) -> WsErrorResult<usize> {
        let (reply, rx) = oneshot::channel();
        self.submit(HubCommand::SessionSize { session_id, reply })
            .await?;
        rx.await.map_err(|_| WsError::hub_unavailable())
    }

    /// True once the hub loop has exited.
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    async fn submit(&self, command: HubCommand) -> WsErrorResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| WsError::hub_unavailable())
    }
}
