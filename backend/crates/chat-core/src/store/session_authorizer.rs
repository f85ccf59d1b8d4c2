use crate::{Result as CoreResult, SessionAccess};

use async_trait::async_trait;
use uuid::Uuid;

/// Decides whether a user may join a chat session.
///
/// Returns `Ok(None)` when the user is neither the owner nor a participant.
#[async_trait]
pub trait SessionAuthorizer: Send + Sync {
    async fn authorize(&self, user_id: Uuid, session_id: Uuid)
    -> CoreResult<Option<SessionAccess>>;
}
