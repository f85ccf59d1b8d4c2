use crate::{
    ActivityTracker, BroadcastMessage, CloseReason, ConnectionId, Metrics, OutboundFrame,
    Result as WsErrorResult, WsError,
};

use std::fmt::Display;
use std::panic::Location;
use std::time::Duration;

use axum::extract::ws::{CloseFrame, Message, Utf8Bytes};
use bytes::Bytes;
use error_location::ErrorLocation;
use futures::{Sink, SinkExt};
use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval, timeout};

const MESSAGE_DELIMITER: char = '\n';

/// Drains one connection's outbound queue to the wire.
///
/// Also writes private replies from the inbound side and periodic pings.
/// Ends when the queue closes, a close frame is requested, or a write fails.
pub struct OutboundPump<S> {
    connection_id: ConnectionId,
    sink: S,
    queue: mpsc::Receiver<OutboundFrame>,
    replies: mpsc::Receiver<Utf8Bytes>,
    activity: ActivityTracker,
    ping_interval: Duration,
    write_timeout: Duration,
    metrics: Metrics,
    pending_close: Option<CloseReason>,
}

impl<S> OutboundPump<S>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connection_id: ConnectionId,
        sink: S,
        queue: mpsc::Receiver<OutboundFrame>,
        replies: mpsc::Receiver<Utf8Bytes>,
        activity: ActivityTracker,
        ping_interval: Duration,
        write_timeout: Duration,
        metrics: Metrics,
    ) -> Self {
        Self {
            connection_id,
            sink,
            queue,
            replies,
            activity,
            ping_interval,
            write_timeout,
            metrics,
            pending_close: None,
        }
    }

    pub async fn run(mut self) -> WsErrorResult<()> {
        let mut ping = interval(self.ping_interval);
        ping.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick fires immediately.
        ping.tick().await;

        let result = loop {
            if let Some(reason) = self.pending_close.take() {
                break self.write_close(reason).await;
            }

            tokio::select! {
                frame = self.queue.recv() => match frame {
                    Some(OutboundFrame::Message(first)) => {
                        let batch = self.coalesce(first);
                        if let Err(e) = self.write(Message::Text(batch)).await {
                            break Err(e);
                        }
                        self.activity.touch();
                    }
                    Some(OutboundFrame::Close(reason)) => break self.write_close(reason).await,
                    None => break self.write_close(CloseReason::NORMAL).await,
                },

                Some(reply) = self.replies.recv() => {
                    if let Err(e) = self.write(Message::Text(reply)).await {
                        break Err(e);
                    }
                }

                _ = ping.tick() => {
                    if let Err(e) = self.write(Message::Ping(Bytes::new())).await {
                        break Err(e);
                    }
                }
            }
        };

        if let Err(e) = &result {
            debug!("Outbound pump for connection {} ended: {e}", self.connection_id);
            self.metrics.error_occurred("write_failed");
        }

        result
    }

    /// Join `first` with whatever is already queued, in arrival order.
    /// A queued close request is kept for the next turn.
    fn coalesce(&mut self, first: BroadcastMessage) -> Utf8Bytes {
        let mut batch: Option<String> = None;

        while let Ok(frame) = self.queue.try_recv() {
            match frame {
                OutboundFrame::Message(next) => {
                    let text = batch.get_or_insert_with(|| first.payload.as_str().to_owned());
                    text.push(MESSAGE_DELIMITER);
                    text.push_str(next.payload.as_str());
                }
                OutboundFrame::Close(reason) => {
                    self.pending_close = Some(reason);
                    break;
                }
            }
        }

        match batch {
            Some(text) => Utf8Bytes::from(text),
            None => first.payload,
        }
    }

    async fn write(&mut self, message: Message) -> WsErrorResult<()> {
        match timeout(self.write_timeout, self.sink.send(message)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(WsError::ConnectionClosed {
                reason: format!("write failed: {e}"),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(_) => {
                warn!(
                    "Write to connection {} timed out after {:?}",
                    self.connection_id, self.write_timeout
                );
                Err(WsError::WriteTimeout {
                    timeout_secs: self.write_timeout.as_secs(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    async fn write_close(&mut self, reason: CloseReason) -> WsErrorResult<()> {
        debug!(
            "Closing connection {} ({} {})",
            self.connection_id, reason.code, reason.reason
        );
        let frame = CloseFrame {
            code: reason.code,
            reason: Utf8Bytes::from_static(reason.reason),
        };
        self.write(Message::Close(Some(frame))).await
    }
}
