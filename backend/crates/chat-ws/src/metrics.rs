use std::time::Duration;

use metrics::{counter, gauge, histogram};

const CONNECTIONS_ESTABLISHED: &str = "chat_ws_connections_established_total";
const CONNECTIONS_CLOSED: &str = "chat_ws_connections_closed_total";
const CONNECTIONS_EVICTED: &str = "chat_ws_connections_evicted_total";
const CONNECTIONS_ACTIVE: &str = "chat_ws_connections_active";
const MESSAGES_RECEIVED: &str = "chat_ws_messages_received_total";
const MESSAGES_PERSISTED: &str = "chat_ws_messages_persisted_total";
const MESSAGES_REJECTED: &str = "chat_ws_messages_rejected_total";
const BROADCASTS: &str = "chat_ws_broadcasts_total";
const BROADCAST_RECIPIENTS: &str = "chat_ws_broadcast_recipients";
const MESSAGE_LATENCY: &str = "chat_ws_message_latency_seconds";
const HUB_CONNECTIONS: &str = "chat_ws_hub_connections";
const HUB_SESSIONS: &str = "chat_ws_hub_sessions";
const ERRORS: &str = "chat_ws_errors_total";

/// Thin facade over the `metrics` macros. Recording is a no-op until the
/// binary installs a recorder.
#[derive(Clone, Default)]
pub struct Metrics;

impl Metrics {
    pub fn new() -> Self {
        Self
    }

    pub fn connection_established(&self) {
        counter!(CONNECTIONS_ESTABLISHED).increment(1);
        gauge!(CONNECTIONS_ACTIVE).increment(1.0);
    }

    pub fn connection_closed(&self, reason: &str) {
        counter!(CONNECTIONS_CLOSED, "reason" => reason.to_owned()).increment(1);
        gauge!(CONNECTIONS_ACTIVE).decrement(1.0);
    }

    /// Hub-initiated: inactive, slow_consumer or shutdown
    pub fn connection_evicted(&self, reason: &'static str) {
        counter!(CONNECTIONS_EVICTED, "reason" => reason).increment(1);
    }

    pub fn message_received(&self) {
        counter!(MESSAGES_RECEIVED).increment(1);
    }

    pub fn message_persisted(&self) {
        counter!(MESSAGES_PERSISTED).increment(1);
    }

    pub fn message_rejected(&self, code: &'static str) {
        counter!(MESSAGES_REJECTED, "code" => code).increment(1);
    }

    /// One fan-out and how many queues accepted it
    pub fn message_broadcast(&self, recipients: usize) {
        counter!(BROADCASTS).increment(1);
        histogram!(BROADCAST_RECIPIENTS).record(recipients as f64);
    }

    /// Frame received to broadcast submitted
    pub fn message_latency(&self, elapsed: Duration) {
        histogram!(MESSAGE_LATENCY).record(elapsed.as_secs_f64());
    }

    pub fn hub_state(&self, connections: usize, sessions: usize) {
        gauge!(HUB_CONNECTIONS).set(connections as f64);
        gauge!(HUB_SESSIONS).set(sessions as f64);
    }

    pub fn error_occurred(&self, code: &'static str) {
        counter!(ERRORS, "code" => code).increment(1);
    }
}
