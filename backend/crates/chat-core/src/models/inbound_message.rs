use crate::{CoreError, NewChatMessage, Result as CoreResult};

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Client-authored chat message as received on the wire.
///
/// Any `id`, `sender_id`, `session_id` or `created_at` a client sends is
/// ignored; those fields come from the connection and the message store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InboundMessage {
    pub content: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_ai_message: bool,
}

// An explicit `null` means the flag was left unset.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl InboundMessage {
    /// Parse and validate a raw inbound frame.
    #[track_caller]
    pub fn parse(frame: &[u8]) -> CoreResult<Self> {
        let mut message: InboundMessage = serde_json::from_slice(frame)
            .map_err(|e| CoreError::validation(format!("invalid message format: {e}"), None))?;

        if message
            .file_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            message.file_url = None;
        }

        // A file attachment may travel without text
        if message.content.trim().is_empty() && message.file_url.is_none() {
            return Err(CoreError::validation(
                "content cannot be empty",
                Some("content"),
            ));
        }

        Ok(message)
    }

    /// Bind the draft to the connection it arrived on.
    pub fn into_draft(self, session_id: Uuid, sender_id: Uuid) -> NewChatMessage {
        NewChatMessage {
            session_id,
            sender_id,
            content: self.content,
            file_url: self.file_url,
            is_ai_message: self.is_ai_message,
        }
    }
}
