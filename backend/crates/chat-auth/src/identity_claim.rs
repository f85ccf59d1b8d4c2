use crate::{AuthError, Result as AuthErrorResult};

use uuid::Uuid;

/// The user identifier as carried by a token.
///
/// Older tokens carry a `user_id` claim, newer ones the standard `sub` claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityClaim {
    /// Value of the legacy `user_id` claim, stringified if it was not a string
    Legacy(String),
    /// Value of the `sub` claim
    Subject(String),
}

impl IdentityClaim {
    fn claim_name(&self) -> &'static str {
        match self {
            Self::Legacy(_) => "user_id",
            Self::Subject(_) => "sub",
        }
    }

    fn raw(&self) -> &str {
        match self {
            Self::Legacy(raw) | Self::Subject(raw) => raw,
        }
    }

    /// Resolve to a user UUID.
    #[track_caller]
    pub fn resolve(&self) -> AuthErrorResult<Uuid> {
        Uuid::parse_str(self.raw())
            .map_err(|e| AuthError::malformed_identity(self.claim_name(), e.to_string()))
    }
}
