use uuid::Uuid;

pub const DEFAULT_ROLE: &str = "user";

/// The single canonical identity produced by the authorization gate.
/// Everything past token validation works with this type only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: String,
}
