use crate::{ChatMessage, NewChatMessage, Result as CoreResult};

use async_trait::async_trait;

/// Durable storage for chat messages.
///
/// Implementations must assign the message id and `created_at` atomically with
/// the write and return the stored record.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn append(&self, message: NewChatMessage) -> CoreResult<ChatMessage>;
}
