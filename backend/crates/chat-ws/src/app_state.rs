use crate::{
    ActivityTracker, ConnectionConfig, ConnectionHandle, ConnectionId, HubHandle, Metrics,
    Result as WsErrorResult, ShutdownCoordinator, WebSocketConnection, WsError,
    create_connection_span,
};

use chat_auth::{
    AuthenticatedUser, ConnectionRateLimiter, JwtValidator, RateLimiterFactory, extract_token,
};
use chat_core::{MessageStore, SessionAuthorizer};

use std::sync::Arc;

use axum::extract::ws::{WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, header};
use axum::response::Response;
use log::{debug, error, info, warn};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

/// Shared application state for WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_validator: Arc<JwtValidator>,
    pub authorizer: Arc<dyn SessionAuthorizer>,
    pub store: Arc<dyn MessageStore>,
    pub hub: HubHandle,
    pub rate_limiter_factory: RateLimiterFactory,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

/// Query string of `GET /ws`
#[derive(Debug, Default, Deserialize)]
pub struct ConnectParams {
    pub session_id: Option<String>,
    pub token: Option<String>,
}

/// WebSocket upgrade handler.
///
/// Identity, session id and membership are all checked before the upgrade,
/// so a rejected caller never gets a socket and the hub never sees them.
pub async fn handler(
    State(state): State<AppState>,
    Query(params): Query<ConnectParams>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> WsErrorResult<Response> {
    if state.shutdown.is_shutdown() {
        return Err(WsError::hub_unavailable());
    }

    let user = authenticate(&state, &params, &headers)?;
    let session_id = parse_session_id(params.session_id.as_deref())?;
    authorize(&state, &user, session_id).await?;

    let rate_limiter = state.rate_limiter_factory.create();
    let max_frame_bytes = state.config.max_frame_bytes;

    Ok(ws
        .max_message_size(max_frame_bytes)
        .max_frame_size(max_frame_bytes)
        .on_upgrade(move |socket| handle_socket(socket, user, session_id, state, rate_limiter)))
}

fn authenticate(
    state: &AppState,
    params: &ConnectParams,
    headers: &HeaderMap,
) -> WsErrorResult<AuthenticatedUser> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = extract_token(params.token.as_deref(), authorization).inspect_err(|e| {
        warn!("WebSocket upgrade rejected: {e}");
    })?;

    state.jwt_validator.validate(token).map_err(|e| {
        warn!("JWT validation failed: {e}");
        WsError::from(e)
    })
}

fn parse_session_id(raw: Option<&str>) -> WsErrorResult<Uuid> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| WsError::bad_request("session_id is required"))?;

    Uuid::parse_str(raw).map_err(|_| WsError::bad_request("session_id must be a UUID"))
}

async fn authorize(
    state: &AppState,
    user: &AuthenticatedUser,
    session_id: Uuid,
) -> WsErrorResult<()> {
    match state.authorizer.authorize(user.user_id, session_id).await {
        Ok(Some(access)) => {
            debug!(
                "User {} joins session {session_id} as {access}",
                user.user_id
            );
            Ok(())
        }
        Ok(None) => {
            warn!(
                "User {} denied access to session {session_id}",
                user.user_id
            );
            Err(WsError::forbidden(
                "you are not a participant in this chat session",
            ))
        }
        Err(e) => {
            error!("Access check failed for session {session_id}: {e}");
            Err(WsError::internal(format!("access check failed: {e}")))
        }
    }
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(
    socket: WebSocket,
    user: AuthenticatedUser,
    session_id: Uuid,
    state: AppState,
    rate_limiter: ConnectionRateLimiter,
) {
    let connection_id = ConnectionId::random();
    let span = create_connection_span(connection_id, user.user_id, session_id);

    async move {
        let (queue_tx, queue_rx) = mpsc::channel(state.config.send_buffer_size.max(1));
        let activity = ActivityTracker::new();
        let handle = ConnectionHandle::new(
            connection_id,
            user.user_id,
            session_id,
            queue_tx,
            activity.clone(),
        );

        // Admit before either pump runs so our own first message reaches us.
        if let Err(e) = state.hub.admit(handle).await {
            error!("Failed to admit connection {connection_id}: {e}");
            return;
        }
        info!("Admitted connection {connection_id}");

        let connection = WebSocketConnection::new(
            connection_id,
            user,
            session_id,
            state.config.clone(),
            state.metrics.clone(),
            rate_limiter,
            state.hub.clone(),
            Arc::clone(&state.store),
            activity,
        );

        if let Err(e) = connection
            .handle(socket, queue_rx, state.shutdown.subscribe_guard())
            .await
        {
            debug!("Connection {connection_id} ended with error: {e}");
        }
    }
    .instrument(span)
    .await
}
