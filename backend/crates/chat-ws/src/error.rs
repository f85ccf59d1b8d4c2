use chat_auth::AuthError;
use chat_core::CoreError;

use std::panic::Location;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use error_location::ErrorLocation;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Invalid message: {message} {location}")]
    InvalidMessage {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Failed to save message: {message} {location}")]
    Persistence {
        message: String,
        location: ErrorLocation,
    },

    #[error("Rate limited: {message} {location}")]
    RateLimited {
        message: String,
        location: ErrorLocation,
    },

    #[error("Hub is not running {location}")]
    HubUnavailable { location: ErrorLocation },

    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    #[error("No frame received for {timeout_secs}s {location}")]
    HeartbeatTimeout {
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("Write did not complete within {timeout_secs}s {location}")]
    WriteTimeout {
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl WsError {
    #[track_caller]
    pub fn hub_unavailable() -> Self {
        Self::HubUnavailable {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionClosed { .. } => "CONNECTION_CLOSED",
            Self::InvalidMessage { .. } => "INVALID_MESSAGE",
            Self::Persistence { .. } => "PERSISTENCE_FAILED",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::HubUnavailable { .. } => "HUB_UNAVAILABLE",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::HeartbeatTimeout { .. } => "HEARTBEAT_TIMEOUT",
            Self::WriteTimeout { .. } => "WRITE_TIMEOUT",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::BadRequest { .. } | Self::InvalidMessage { .. } => StatusCode::BAD_REQUEST,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::HubUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message without the source location.
    pub fn client_message(&self) -> String {
        match self {
            Self::ConnectionClosed { reason, .. } => reason.clone(),
            Self::InvalidMessage { message, .. }
            | Self::RateLimited { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Forbidden { message, .. }
            | Self::BadRequest { message, .. } => message.clone(),
            Self::HubUnavailable { .. } => "chat service unavailable".to_string(),
            Self::HeartbeatTimeout { .. } | Self::WriteTimeout { .. } => {
                "connection timed out".to_string()
            }
            // Storage and internal details stay in the server log.
            Self::Persistence { .. } => "failed to save message".to_string(),
            Self::Internal { .. } => "internal error".to_string(),
        }
    }

    /// JSON error object, sent privately on the socket or as an HTTP body.
    pub fn to_client_frame(&self) -> String {
        json!({
            "error": self.client_message(),
            "code": self.error_code(),
        })
        .to_string()
    }
}

impl From<CoreError> for WsError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            CoreError::Validation { message, field, .. } => Self::InvalidMessage {
                message,
                field,
                location,
            },
            CoreError::Storage { message, .. } => Self::Persistence { message, location },
            CoreError::Serialization { source, .. } => Self::Internal {
                message: format!("serialization failed: {source}"),
                location,
            },
        }
    }
}

impl From<AuthError> for WsError {
    #[track_caller]
    fn from(error: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            AuthError::RateLimitExceeded {
                limit, window_secs, ..
            } => Self::RateLimited {
                message: format!("rate limit exceeded: {limit} messages per {window_secs}s"),
                location,
            },
            other => {
                Self::unauthorized(format!("{} ({})", other.client_message(), other.error_code()))
            }
        }
    }
}

impl IntoResponse for WsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "error": self.client_message(),
            "code": self.error_code(),
        });
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
