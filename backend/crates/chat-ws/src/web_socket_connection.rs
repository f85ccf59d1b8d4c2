use crate::{
    ActivityTracker, BroadcastMessage, ConnectionConfig, ConnectionId, HubHandle, Metrics,
    OutboundFrame, OutboundPump, Result as WsErrorResult, ShutdownGuard, WsError,
};

use chat_auth::{AuthenticatedUser, ConnectionRateLimiter};
use chat_core::{InboundMessage, MessageStore};

use std::ops::ControlFlow;
use std::panic::Location;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::ws::{Message, Utf8Bytes, WebSocket};
use error_location::ErrorLocation;
use futures::StreamExt;
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::time::timeout;
use uuid::Uuid;

// Private error replies waiting for the outbound pump
const REPLY_BUFFER_SIZE: usize = 16;

/// One admitted socket: runs the inbound pump and supervises the outbound pump.
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    user: AuthenticatedUser,
    session_id: Uuid,
    config: ConnectionConfig,
    metrics: Metrics,
    rate_limiter: ConnectionRateLimiter,
    hub: HubHandle,
    store: Arc<dyn MessageStore>,
    activity: ActivityTracker,
}

impl WebSocketConnection {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connection_id: ConnectionId,
        user: AuthenticatedUser,
        session_id: Uuid,
        config: ConnectionConfig,
        metrics: Metrics,
        rate_limiter: ConnectionRateLimiter,
        hub: HubHandle,
        store: Arc<dyn MessageStore>,
        activity: ActivityTracker,
    ) -> Self {
        Self {
            connection_id,
            user,
            session_id,
            config,
            metrics,
            rate_limiter,
            hub,
            store,
            activity,
        }
    }

    /// Run until the peer leaves, a pump fails, the hub evicts us, or shutdown.
    /// Always submits `Remove` before returning.
    pub async fn handle(
        self,
        socket: WebSocket,
        queue: mpsc::Receiver<OutboundFrame>,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        info!(
            "WebSocket connection {} established for user {} in session {}",
            self.connection_id, self.user.user_id, self.session_id
        );
        self.metrics.connection_established();

        let (ws_sender, mut ws_receiver) = socket.split();
        let (reply_tx, reply_rx) = mpsc::channel::<Utf8Bytes>(REPLY_BUFFER_SIZE);

        let pump = OutboundPump::new(
            self.connection_id,
            ws_sender,
            queue,
            reply_rx,
            self.activity.clone(),
            self.config.ping_interval,
            self.config.write_timeout,
            self.metrics.clone(),
        );
        let mut writer = tokio::spawn(pump.run());
        let mut writer_finished = false;

        let result = loop {
            tokio::select! {
                frame = timeout(self.config.read_timeout, ws_receiver.next()) => match frame {
                    Err(_) => {
                        warn!(
                            "Connection {} silent for {:?}, closing",
                            self.connection_id, self.config.read_timeout
                        );
                        break Err(WsError::HeartbeatTimeout {
                            timeout_secs: self.config.read_timeout.as_secs(),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                    Ok(None) => {
                        info!("Connection {} closed by client", self.connection_id);
                        break Ok(());
                    }
                    Ok(Some(Err(e))) => {
                        debug!("WebSocket error on connection {}: {e}", self.connection_id);
                        break Err(WsError::ConnectionClosed {
                            reason: format!("WebSocket error: {e}"),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                    Ok(Some(Ok(message))) => {
                        if self.handle_frame(message, &reply_tx).await.is_break() {
                            break Ok(());
                        }
                    }
                },

                _ = &mut writer => {
                    writer_finished = true;
                    debug!("Outbound pump for connection {} finished", self.connection_id);
                    break Ok(());
                }

                _ = shutdown_guard.wait() => {
                    info!("Shutting down connection {} gracefully", self.connection_id);
                    break Ok(());
                }
            }
        };

        // Idempotent: the hub may already have evicted us.
        if let Err(e) = self.hub.remove(self.connection_id).await {
            debug!(
                "Could not deregister connection {}: {e}",
                self.connection_id
            );
        }
        drop(reply_tx);

        if !writer_finished && timeout(self.config.write_timeout, &mut writer).await.is_err() {
            warn!(
                "Outbound pump for connection {} did not finish, aborting",
                self.connection_id
            );
            writer.abort();
        }

        self.metrics.connection_closed(match &result {
            Ok(()) => "normal",
            Err(WsError::HeartbeatTimeout { .. }) => "timeout",
            Err(_) => "error",
        });
        info!(
            "WebSocket connection {} closed for user {} in session {}",
            self.connection_id, self.user.user_id, self.session_id
        );

        result
    }

    async fn handle_frame(
        &self,
        message: Message,
        reply_tx: &mpsc::Sender<Utf8Bytes>,
    ) -> ControlFlow<()> {
        match message {
            Message::Text(text) => {
                self.activity.touch();
                self.handle_chat_frame(text.as_str().as_bytes(), reply_tx).await
            }
            Message::Binary(data) => {
                self.activity.touch();
                self.handle_chat_frame(&data, reply_tx).await
            }
            Message::Ping(_) => {
                // The transport answers pings on its own.
                self.activity.touch();
                ControlFlow::Continue(())
            }
            Message::Pong(_) => {
                debug!("Pong received from connection {}", self.connection_id);
                self.activity.touch();
                ControlFlow::Continue(())
            }
            Message::Close(frame) => {
                info!(
                    "Received close frame from connection {} ({:?})",
                    self.connection_id,
                    frame.as_ref().map(|f| f.code)
                );
                ControlFlow::Break(())
            }
        }
    }

    /// Rate limit, parse, persist, broadcast. Failures before the broadcast are
    /// reported to this client only.
    async fn handle_chat_frame(
        &self,
        frame: &[u8],
        reply_tx: &mpsc::Sender<Utf8Bytes>,
    ) -> ControlFlow<()> {
        let started = Instant::now();
        self.metrics.message_received();

        if let Err(e) = self.rate_limiter.check() {
            warn!("Rate limit exceeded for connection {}", self.connection_id);
            self.metrics.message_rejected("rate_limited");
            self.reply_error(reply_tx, WsError::from(e));
            return ControlFlow::Continue(());
        }

        let inbound = match InboundMessage::parse(frame) {
            Ok(inbound) => inbound,
            Err(e) => {
                debug!("Rejected message from connection {}: {e}", self.connection_id);
                self.metrics.message_rejected("invalid");
                self.reply_error(reply_tx, WsError::from(e));
                return ControlFlow::Continue(());
            }
        };

        let draft = inbound.into_draft(self.session_id, self.user.user_id);
        let message = match self.store.append(draft).await {
            Ok(message) => message,
            Err(e) => {
                error!(
                    "Failed to persist message from connection {}: {e}",
                    self.connection_id
                );
                self.metrics.error_occurred("persistence");
                self.reply_error(reply_tx, WsError::from(e));
                return ControlFlow::Continue(());
            }
        };
        self.metrics.message_persisted();

        let payload = match message.to_json() {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to serialize message {}: {e}", message.id);
                self.reply_error(reply_tx, WsError::from(e));
                return ControlFlow::Continue(());
            }
        };

        debug!(
            "Connection {} persisted message {} in session {}",
            self.connection_id, message.id, self.session_id
        );

        let broadcast = BroadcastMessage::new(message.id, payload);
        if let Err(e) = self.hub.broadcast_to_session(self.session_id, broadcast).await {
            error!(
                "Hub unavailable, closing connection {}: {e}",
                self.connection_id
            );
            return ControlFlow::Break(());
        }

        self.metrics.message_latency(started.elapsed());
        ControlFlow::Continue(())
    }

    fn reply_error(&self, reply_tx: &mpsc::Sender<Utf8Bytes>, error: WsError) {
        if reply_tx
            .try_send(Utf8Bytes::from(error.to_client_frame()))
            .is_err()
        {
            warn!(
                "Dropped error reply for connection {}: reply buffer full",
                self.connection_id
            );
        }
    }
}
