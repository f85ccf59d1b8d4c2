use crate::Result as DbErrorResult;
use crate::repositories::row::{now_millis, parse_millis, parse_uuid};

use chat_core::{
    ChatSession, CoreError, Result as CoreResult, SessionAccess, SessionAuthorizer,
};

use async_trait::async_trait;
use log::error;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const TABLE: &str = "chat_sessions";

pub struct ChatSessionRepository {
    pool: SqlitePool,
}

impl ChatSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        title: &str,
        team_id: Option<Uuid>,
    ) -> DbErrorResult<ChatSession> {
        let now = now_millis();
        let session = ChatSession {
            id: Uuid::new_v4(),
            owner_id,
            team_id,
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
              INSERT INTO chat_sessions (id, user_id, team_id, title, created_at, updated_at)
              VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(session.id.to_string())
        .bind(session.owner_id.to_string())
        .bind(session.team_id.map(|id| id.to_string()))
        .bind(&session.title)
        .bind(session.created_at.timestamp_millis())
        .bind(session.updated_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(session)
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<ChatSession>> {
        let row = sqlx::query(
            r#"
              SELECT id, user_id, team_id, title, created_at, updated_at
              FROM chat_sessions
              WHERE id = ?
              "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(session_from_row).transpose()
    }

    /// Returns `false` when the user was already a participant.
    pub async fn add_participant(&self, session_id: Uuid, user_id: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
              INSERT OR IGNORE INTO chat_participants (id, session_id, user_id, created_at)
              VALUES (?, ?, ?, ?)
              "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(session_id.to_string())
        .bind(user_id.to_string())
        .bind(now_millis().timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn remove_participant(
        &self,
        session_id: Uuid,
        user_id: Uuid,
    ) -> DbErrorResult<bool> {
        let result =
            sqlx::query("DELETE FROM chat_participants WHERE session_id = ? AND user_id = ?")
                .bind(session_id.to_string())
                .bind(user_id.to_string())
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Owner first, then participant. `None` for an unknown session or a stranger.
    pub async fn find_access(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> DbErrorResult<Option<SessionAccess>> {
        let session_id = session_id.to_string();
        let user_id = user_id.to_string();

        let owns: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM chat_sessions WHERE id = ? AND user_id = ?")
                .bind(&session_id)
                .bind(&user_id)
                .fetch_one(&self.pool)
                .await?;
        if owns > 0 {
            return Ok(Some(SessionAccess::Owner));
        }

        let participates: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM chat_participants WHERE session_id = ? AND user_id = ?",
        )
        .bind(&session_id)
        .bind(&user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((participates > 0).then_some(SessionAccess::Participant))
    }
}

#[async_trait]
impl SessionAuthorizer for ChatSessionRepository {
    async fn authorize(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> CoreResult<Option<SessionAccess>> {
        self.find_access(user_id, session_id).await.map_err(|e| {
            error!("Access check failed for user {user_id} on session {session_id}: {e}");
            CoreError::storage(format!("failed to verify session access: {e}"))
        })
    }
}

fn session_from_row(row: &SqliteRow) -> DbErrorResult<ChatSession> {
    let id: String = row.try_get("id")?;
    let owner_id: String = row.try_get("user_id")?;
    let team_id: Option<String> = row.try_get("team_id")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(ChatSession {
        id: parse_uuid(TABLE, "id", &id)?,
        owner_id: parse_uuid(TABLE, "user_id", &owner_id)?,
        team_id: team_id
            .map(|raw| parse_uuid(TABLE, "team_id", &raw))
            .transpose()?,
        title: row.try_get("title")?,
        created_at: parse_millis(TABLE, "created_at", created_at)?,
        updated_at: parse_millis(TABLE, "updated_at", updated_at)?,
    })
}
