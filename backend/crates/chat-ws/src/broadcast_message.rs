use axum::extract::ws::Utf8Bytes;
use uuid::Uuid;

/// A serialized canonical message ready for the wire.
/// Cloning shares the payload buffer across recipients.
#[derive(Debug, Clone)]
pub struct BroadcastMessage {
    pub message_id: Uuid,
    pub payload: Utf8Bytes,
}

impl BroadcastMessage {
    pub fn new(message_id: Uuid, payload: impl Into<Utf8Bytes>) -> Self {
        Self {
            message_id,
            payload: payload.into(),
        }
    }
}
