use crate::BroadcastMessage;

use axum::extract::ws::close_code;

/// Close code and reason sent before the server drops a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseReason {
    pub code: u16,
    pub reason: &'static str,
}

impl CloseReason {
    pub const NORMAL: CloseReason = CloseReason {
        code: close_code::NORMAL,
        reason: "",
    };

    pub const INACTIVE: CloseReason = CloseReason {
        code: close_code::NORMAL,
        reason: "Connection inactive",
    };

    pub const SHUTDOWN: CloseReason = CloseReason {
        code: close_code::AWAY,
        reason: "Server shutting down",
    };
}

/// What the hub can place on a connection's outbound queue.
#[derive(Debug, Clone)]
pub enum OutboundFrame {
    Message(BroadcastMessage),
    Close(CloseReason),
}
