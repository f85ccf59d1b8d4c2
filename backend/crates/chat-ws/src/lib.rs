pub mod activity_tracker;
pub mod app_state;
pub mod broadcast_message;
pub mod connection_config;
pub mod connection_handle;
pub mod connection_id;
pub mod error;
pub mod hub;
pub mod hub_command;
pub mod hub_handle;
pub mod metrics;
pub mod outbound_frame;
pub mod outbound_pump;
pub mod session_registry;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod sweeper;
pub mod web_socket_connection;

pub use activity_tracker::ActivityTracker;
pub use app_state::{AppState, ConnectParams, handler};
pub use broadcast_message::BroadcastMessage;
pub use connection_config::ConnectionConfig;
pub use connection_handle::ConnectionHandle;
pub use connection_id::ConnectionId;
pub use error::{Result, WsError};
pub use hub::Hub;
pub use hub_command::{HubCommand, HubStats};
pub use hub_handle::HubHandle;
pub use metrics::Metrics;
pub use outbound_frame::{CloseReason, OutboundFrame};
pub use outbound_pump::OutboundPump;
pub use session_registry::SessionRegistry;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use sweeper::InactivitySweeper;
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;

use tracing::info_span;
use uuid::Uuid;

/// Tracing span covering one connection's lifetime.
pub fn create_connection_span(
    connection_id: ConnectionId,
    user_id: Uuid,
    session_id: Uuid,
) -> tracing::Span {
    info_span!(
        "ws_connection",
        connection_id = %connection_id,
        user_id = %user_id,
        session_id = %session_id,
    )
}
