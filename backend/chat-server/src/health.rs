use chat_ws::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - component status with live hub counts
pub async fn health(State(state): State<AppState>) -> Response {
    match state.hub.stats().await {
        Ok(stats) => {
            let body = json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "components": {
                    "hub": "operational",
                },
                "hub": stats,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            let body = json!({
                "status": "unhealthy",
                "version": env!("CARGO_PKG_VERSION"),
                "components": {
                    "hub": e.client_message(),
                },
                "timestamp": chrono::Utc::now().to_rfc3339(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

/// GET /live - the process answers
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - accepting new connections
pub async fn readiness(State(state): State<AppState>) -> Response {
    if state.shutdown.is_shutdown() || state.hub.is_closed() {
        return (StatusCode::SERVICE_UNAVAILABLE, "Not ready").into_response();
    }
    (StatusCode::OK, "Ready").into_response()
}
