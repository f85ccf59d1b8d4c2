mod property_tests;

use crate::{ActivityTracker, BroadcastMessage, ConnectionHandle, ConnectionId, OutboundFrame};

use tokio::sync::mpsc;
use uuid::Uuid;

/// A hub-side handle plus the receiving end of its outbound queue.
pub(crate) fn test_connection(
    session_id: Uuid,
    buffer: usize,
) -> (ConnectionHandle, mpsc::Receiver<OutboundFrame>) {
    let (tx, rx) = mpsc::channel(buffer);
    let handle = ConnectionHandle::new(
        ConnectionId::random(),
        Uuid::new_v4(),
        session_id,
        tx,
        ActivityTracker::new(),
    );
    (handle, rx)
}

pub(crate) fn test_message(text: &str) -> BroadcastMessage {
    BroadcastMessage::new(Uuid::new_v4(), text.to_string())
}

/// Payload of the next queued message frame, panicking on anything else.
pub(crate) fn next_payload(rx: &mut mpsc::Receiver<OutboundFrame>) -> String {
    match rx.try_recv() {
        Ok(OutboundFrame::Message(message)) => message.payload.as_str().to_string(),
        other => panic!("expected a queued message, got {other:?}"),
    }
}
