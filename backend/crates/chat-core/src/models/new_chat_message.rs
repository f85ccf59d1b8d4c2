use uuid::Uuid;

/// A validated message draft, ready to hand to a `MessageStore`.
/// Carries no id or timestamp: those are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    pub session_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub file_url: Option<String>,
    pub is_ai_message: bool,
}
