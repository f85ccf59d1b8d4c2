use chat_core::{ChatSession, NewChatMessage};
use chat_db::{ChatSessionRepository, open_in_memory_pool};

use sqlx::SqlitePool;
use uuid::Uuid;

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    open_in_memory_pool()
        .await
        .expect("Failed to create test pool")
}

/// Inserts a session owned by `owner_id`
pub async fn create_test_session(pool: &SqlitePool, owner_id: Uuid) -> ChatSession {
    ChatSessionRepository::new(pool.clone())
        .create(owner_id, "Test session", None)
        .await
        .expect("Failed to create test session")
}

pub fn draft(session_id: Uuid, sender_id: Uuid, content: &str) -> NewChatMessage {
    NewChatMessage {
        session_id,
        sender_id,
        content: content.to_string(),
        file_url: None,
        is_ai_message: false,
    }
}
