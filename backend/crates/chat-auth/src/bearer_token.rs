use crate::{AuthError, Result as AuthErrorResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Locate the caller's token.
///
/// Browsers cannot set headers on a WebSocket handshake, so a `token` query
/// parameter takes precedence over the `Authorization` header.
#[track_caller]
pub fn extract_token<'a>(
    query_token: Option<&'a str>,
    authorization: Option<&'a str>,
) -> AuthErrorResult<&'a str> {
    if let Some(token) = query_token.filter(|t| !t.is_empty()) {
        return Ok(token);
    }

    let header = authorization.ok_or_else(AuthError::missing_token)?;

    match header.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::invalid_scheme()),
    }
}
