use crate::authenticated_user::DEFAULT_ROLE;
use crate::{AuthError, AuthenticatedUser, IdentityClaim, Result as AuthErrorResult};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JWT claims accepted by the hub.
///
/// Both identity shapes are optional at the serde level; `identity()` decides
/// which one applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Legacy identity claim; may be a string or any other JSON scalar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Claims {
    /// Pick the identity claim. The legacy `user_id` wins when both are present.
    #[track_caller]
    pub fn identity(&self) -> AuthErrorResult<IdentityClaim> {
        if let Some(legacy) = &self.user_id {
            let raw = match legacy {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Ok(IdentityClaim::Legacy(raw));
        }

        match &self.sub {
            Some(sub) if !sub.is_empty() => Ok(IdentityClaim::Subject(sub.clone())),
            _ => Err(AuthError::missing_identity()),
        }
    }

    /// Validate claims after signature verification and resolve the caller.
    #[track_caller]
    pub fn into_user(self) -> AuthErrorResult<AuthenticatedUser> {
        let user_id = self.identity()?.resolve()?;

        Ok(AuthenticatedUser {
            user_id,
            role: self
                .role
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        })
    }
}
