use crate::Result as DbErrorResult;
use crate::repositories::row::{now_millis, parse_millis, parse_uuid};

use chat_core::{ChatMessage, CoreError, MessageStore, NewChatMessage, Result as CoreResult};

use async_trait::async_trait;
use log::error;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const TABLE: &str = "chat_messages";

pub struct ChatMessageRepository {
    pool: SqlitePool,
}

impl ChatMessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a draft, assigning its id and `created_at`, and return the stored record.
    pub async fn create(&self, draft: NewChatMessage) -> DbErrorResult<ChatMessage> {
        let message = ChatMessage {
            id: Uuid::new_v4(),
            session_id: draft.session_id,
            sender_id: draft.sender_id,
            content: draft.content,
            file_url: draft.file_url,
            is_ai_message: draft.is_ai_message,
            created_at: now_millis(),
        };

        sqlx::query(
            r#"
              INSERT INTO chat_messages (
                  id, session_id, sender_id, content, file_url, is_ai_message, created_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(message.id.to_string())
        .bind(message.session_id.to_string())
        .bind(message.sender_id.to_string())
        .bind(&message.content)
        .bind(message.file_url.as_deref())
        .bind(message.is_ai_message)
        .bind(message.created_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(message)
    }

    /// Session history, oldest first.
    pub async fn find_by_session(&self, session_id: Uuid) -> DbErrorResult<Vec<ChatMessage>> {
        let rows = sqlx::query(
            r#"
              SELECT id, session_id, sender_id, content, file_url, is_ai_message, created_at
              FROM chat_messages
              WHERE session_id = ?
              ORDER BY created_at ASC, rowid ASC
              "#,
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(message_from_row).collect()
    }

    pub async fn count_by_session(&self, session_id: Uuid) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chat_messages WHERE session_id = ?")
            .bind(session_id.to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl MessageStore for ChatMessageRepository {
    async fn append(&self, message: NewChatMessage) -> CoreResult<ChatMessage> {
        let session_id = message.session_id;
        self.create(message).await.map_err(|e| {
            error!("Failed to persist message for session {session_id}: {e}");
            CoreError::storage(format!("failed to save message: {e}"))
        })
    }
}

fn message_from_row(row: &SqliteRow) -> DbErrorResult<ChatMessage> {
    let id: String = row.try_get("id")?;
    let session_id: String = row.try_get("session_id")?;
    let sender_id: String = row.try_get("sender_id")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(ChatMessage {
        id: parse_uuid(TABLE, "id", &id)?,
        session_id: parse_uuid(TABLE, "session_id", &session_id)?,
        sender_id: parse_uuid(TABLE, "sender_id", &sender_id)?,
        content: row.try_get("content")?,
        file_url: row.try_get("file_url")?,
        is_ai_message: row.try_get("is_ai_message")?,
        created_at: parse_millis(TABLE, "created_at", created_at)?,
    })
}
