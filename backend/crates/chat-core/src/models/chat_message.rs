use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical chat message: the persisted record with server-assigned identity.
///
/// This is the only shape ever broadcast to a session, so every recipient sees
/// the same `id` and `created_at` for a given message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub sender_id: Uuid,

    pub content: String,
    pub file_url: Option<String>,
    pub is_ai_message: bool,

    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Serialize to the outbound wire representation.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
