use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Why the identity gate turned a caller away.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No token in query string or Authorization header {location}")]
    MissingToken { location: ErrorLocation },

    #[error("Authorization header is not a Bearer token {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Token rejected: {source} {location}")]
    TokenRejected {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Token carries no user identifier {location}")]
    MissingIdentity { location: ErrorLocation },

    #[error("Claim '{claim}' is not a valid user id: {message} {location}")]
    MalformedIdentity {
        claim: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unusable verification key: {message} {location}")]
    InvalidKey {
        message: String,
        location: ErrorLocation,
    },

    #[error("Rate limit exceeded: {limit} messages per {window_secs}s {location}")]
    RateLimitExceeded {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn missing_token() -> Self {
        Self::MissingToken {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_scheme() -> Self {
        Self::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn token_expired() -> Self {
        Self::TokenExpired {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn token_rejected(source: jsonwebtoken::errors::Error) -> Self {
        Self::TokenRejected {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_identity() -> Self {
        Self::MissingIdentity {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed_identity<S: Into<String>>(claim: &'static str, message: S) -> Self {
        Self::MalformedIdentity {
            claim,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_key<S: Into<String>>(message: S) -> Self {
        Self::InvalidKey {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rate_limited(limit: u32, window_secs: u64) -> Self {
        Self::RateLimitExceeded {
            limit,
            window_secs,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Machine-readable code for client responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingToken { .. } => "MISSING_TOKEN",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::TokenRejected { .. } => "INVALID_TOKEN",
            Self::MissingIdentity { .. } | Self::MalformedIdentity { .. } => "INVALID_IDENTITY",
            Self::InvalidKey { .. } => "INVALID_KEY",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
        }
    }

    /// Message safe to return to the caller: no key material, no locations.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::MissingToken { .. } => "authentication required",
            Self::InvalidScheme { .. } => "invalid authorization scheme",
            Self::TokenExpired { .. } => "token expired",
            Self::TokenRejected { .. } | Self::InvalidKey { .. } => "invalid token",
            Self::MissingIdentity { .. } | Self::MalformedIdentity { .. } => {
                "token does not identify a user"
            }
            Self::RateLimitExceeded { .. } => "rate limit exceeded",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
