use crate::{
    BroadcastMessage, CloseReason, ConnectionHandle, ConnectionId, HubCommand, HubHandle,
    HubStats, Metrics, OutboundFrame, SessionRegistry, ShutdownCoordinator, ShutdownGuard,
};

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

/// Owner of every live connection and the session registry.
///
/// Only the task running [`Hub::run`] touches this state; everyone else goes
/// through a [`HubHandle`]. The methods are synchronous and never wait on a
/// connection, so one stalled client cannot hold up the loop.
pub struct Hub {
    connections: HashMap<ConnectionId, ConnectionHandle>,
    sessions: SessionRegistry,
    metrics: Metrics,
}

impl Hub {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            connections: HashMap::new(),
            sessions: SessionRegistry::new(),
            metrics,
        }
    }

    /// Start the hub loop on its own task.
    ///
    /// The loop ends on shutdown (after closing every connection) or once every
    /// handle has been dropped.
    pub fn spawn(
        command_buffer_size: usize,
        metrics: Metrics,
        shutdown: &ShutdownCoordinator,
    ) -> (HubHandle, JoinHandle<()>) {
        let (commands_tx, commands_rx) = mpsc::channel(command_buffer_size.max(1));
        let guard = shutdown.subscribe_guard();
        let task = tokio::spawn(Hub::new(metrics).run(commands_rx, guard));
        (HubHandle::new(commands_tx), task)
    }

    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<HubCommand>,
        mut shutdown: ShutdownGuard,
    ) {
        info!("Hub started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown.wait() => {
                    let closed = self.close_all(CloseReason::SHUTDOWN);
                    info!("Hub shutting down, closed {closed} connection(s)");
                    break;
                }

                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => {
                        let closed = self.close_all(CloseReason::SHUTDOWN);
                        info!("All hub handles dropped, closed {closed} connection(s)");
                        break;
                    }
                },
            }
        }

        // Refuse further submissions.
        commands.close();
    }

    pub fn handle_command(&mut self, command: HubCommand) {
        match command {
            HubCommand::Admit(connection) => self.admit(connection),
            HubCommand::Remove(connection_id) => {
                if self.remove(connection_id).is_none() {
                    debug!("Remove for unknown connection {connection_id} ignored");
                }
            }
            HubCommand::BroadcastToSession {
                session_id,
                message,
            } => {
                self.broadcast_to_session(session_id, message);
            }
            HubCommand::Sweep {
                idle_threshold,
                now,
                reply,
            } => {
                let evicted = self.sweep(idle_threshold, now);
                let _ = reply.send(evicted);
            }
            HubCommand::Stats { reply } => {
                let _ = reply.send(self.stats());
            }
            HubCommand::SessionSize { session_id, reply } => {
                let _ = reply.send(self.session_size(session_id));
            }
        }

        self.metrics
            .hub_state(self.connections.len(), self.sessions.session_count());
    }

    pub fn admit(&mut self, connection: ConnectionHandle) {
        let connection_id = connection.connection_id;
        let session_id = connection.session_id;

        if let Some(previous) = self.connections.insert(connection_id, connection)
            && previous.session_id != session_id
        {
            self.sessions.remove(previous.session_id, connection_id);
        }
        self.sessions.insert(session_id, connection_id);

        debug!(
            "Admitted connection {connection_id} to session {session_id} ({} in session, {} total)",
            self.sessions.session_size(session_id),
            self.connections.len()
        );
    }

    /// Drops the connection's queue sender, which lets its outbound pump finish.
    /// `None` if it was already gone.
    pub fn remove(&mut self, connection_id: ConnectionId) -> Option<ConnectionHandle> {
        let connection = self.connections.remove(&connection_id)?;
        self.sessions.remove(connection.session_id, connection_id);

        debug!(
            "Removed connection {connection_id} from session {} ({} total)",
            connection.session_id,
            self.connections.len()
        );

        Some(connection)
    }

    /// Non-blocking fan-out. A recipient whose queue is full or closed is removed.
    /// Returns how many queues accepted the message.
    pub fn broadcast_to_session(&mut self, session_id: Uuid, message: BroadcastMessage) -> usize {
        let members = self.sessions.members(session_id);
        if members.is_empty() {
            debug!("No live connections in session {session_id}, broadcast skipped");
            return 0;
        }

        let mut delivered = 0;
        let mut dead = Vec::new();

        for connection_id in members {
            let Some(connection) = self.connections.get(&connection_id) else {
                continue;
            };

            match connection
                .sender
                .try_send(OutboundFrame::Message(message.clone()))
            {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    warn!(
                        "Connection {connection_id} send buffer full, dropping slow client (user {}, connected {}s)",
                        connection.user_id,
                        connection.age().num_seconds()
                    );
                    self.metrics.connection_evicted("slow_consumer");
                    dead.push(connection_id);
                }
                Err(TrySendError::Closed(_)) => {
                    debug!("Connection {connection_id} queue already closed");
                    dead.push(connection_id);
                }
            }
        }

        for connection_id in dead {
            self.remove(connection_id);
        }

        debug!(
            "Message {} broadcast to {delivered} connection(s) in session {session_id}",
            message.message_id
        );
        self.metrics.message_broadcast(delivered);

        delivered
    }

    /// Close and remove every connection idle for longer than `idle_threshold`.
    pub fn sweep(&mut self, idle_threshold: Duration, now: Instant) -> usize {
        let idle: Vec<ConnectionId> = self
            .connections
            .values()
            .filter(|c| c.activity.idle_for(now) > idle_threshold)
            .map(|c| c.connection_id)
            .collect();

        for connection_id in &idle {
            if let Some(connection) = self.remove(*connection_id) {
                info!(
                    "Evicting inactive connection {connection_id} (user {}, session {}, idle {:?}, connected {}s)",
                    connection.user_id,
                    connection.session_id,
                    connection.activity.idle_for(now),
                    connection.age().num_seconds()
                );
                // Best effort; a full queue still closes when the handle drops.
                let _ = connection
                    .sender
                    .try_send(OutboundFrame::Close(CloseReason::INACTIVE));
                self.metrics.connection_evicted("inactive");
            }
        }

        idle.len()
    }

    pub fn close_all(&mut self, reason: CloseReason) -> usize {
        let count = self.connections.len();
        for (_, connection) in self.connections.drain() {
            let _ = connection.sender.try_send(OutboundFrame::Close(reason));
            self.metrics.connection_evicted("shutdown");
        }
        self.sessions = SessionRegistry::new();
        count
    }

    pub fn contains(&self, connection_id: ConnectionId) -> bool {
        self.connections.contains_key(&connection_id)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.session_count()
    }

    pub fn session_size(&self, session_id: Uuid) -> usize {
        self.sessions.session_size(session_id)
    }

    pub fn stats(&self) -> HubStats {
        HubStats {
            connections: self.connection_count(),
            sessions: self.session_count(),
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}
