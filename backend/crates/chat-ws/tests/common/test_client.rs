#![allow(dead_code)]

use crate::common::jwt_helper::create_test_token;
use crate::common::test_server::TEST_JWT_SECRET;

use chat_core::ChatMessage;

use std::collections::VecDeque;
use std::time::Duration;

use axum_test::{TestServer, TestWebSocket, WsMessage};
use serde_json::{Value, json};
use tokio::time::timeout;
use uuid::Uuid;

pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(3);

/// How a close frame looked on the client side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedClose {
    pub code: u16,
    pub reason: String,
}

/// WebSocket test client wrapper.
///
/// The server may join several queued messages into one text frame separated
/// by newlines, so received frames are split and buffered line by line.
pub struct WsTestClient {
    ws: TestWebSocket,
    pending: VecDeque<String>,
    pub user_id: Uuid,
    pub session_id: Uuid,
}

impl WsTestClient {
    /// Connect with the token in the query string
    pub async fn connect(server: &TestServer, user_id: Uuid, session_id: Uuid) -> Self {
        let token = create_test_token(user_id, TEST_JWT_SECRET);
        let ws = server
            .get_websocket("/ws")
            .add_query_param("session_id", session_id)
            .add_query_param("token", &token)
            .await
            .into_websocket()
            .await;

        Self::wrap(ws, user_id, session_id)
    }

    /// Connect with the token in the Authorization header
    pub async fn connect_with_header(server: &TestServer, user_id: Uuid, session_id: Uuid) -> Self {
        let token = create_test_token(user_id, TEST_JWT_SECRET);
        let ws = server
            .get_websocket("/ws")
            .add_query_param("session_id", session_id)
            .add_header("Authorization", format!("Bearer {token}"))
            .await
            .into_websocket()
            .await;

        Self::wrap(ws, user_id, session_id)
    }

    pub fn wrap(ws: TestWebSocket, user_id: Uuid, session_id: Uuid) -> Self {
        Self {
            ws,
            pending: VecDeque::new(),
            user_id,
            session_id,
        }
    }

    pub async fn send_chat(&mut self, content: &str) {
        self.send_json(json!({ "content": content })).await;
    }

    pub async fn send_json(&mut self, value: Value) {
        self.ws.send_text(value.to_string()).await;
    }

    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    /// Next text line, or `None` if nothing arrives in time.
    /// Panics on a close frame.
    pub async fn try_receive_line(&mut self, wait: Duration) -> Option<String> {
        if let Some(line) = self.pending.pop_front() {
            return Some(line);
        }

        loop {
            let message = timeout(wait, self.ws.receive_message()).await.ok()?;
            match message {
                WsMessage::Text(text) => {
                    self.pending
                        .extend(text.as_str().split('\n').map(str::to_string));
                    return self.pending.pop_front();
                }
                WsMessage::Ping(_) | WsMessage::Pong(_) => continue,
                other => panic!("expected a text frame, got {other:?}"),
            }
        }
    }

    pub async fn receive_line(&mut self) -> String {
        self.try_receive_line(RECEIVE_TIMEOUT)
            .await
            .expect("no message received within timeout")
    }

    pub async fn receive_json(&mut self) -> Value {
        let line = self.receive_line().await;
        serde_json::from_str(&line).expect("server sent valid JSON")
    }

    /// Next broadcast chat message
    pub async fn receive_chat(&mut self) -> ChatMessage {
        let line = self.receive_line().await;
        serde_json::from_str(&line)
            .unwrap_or_else(|e| panic!("expected a chat message, got {line}: {e}"))
    }

    /// Next private error frame
    pub async fn receive_error(&mut self) -> Value {
        let value = self.receive_json().await;
        assert!(
            value.get("error").is_some(),
            "expected an error frame, got {value}"
        );
        value
    }

    /// Asserts nothing is delivered for `wait`
    pub async fn expect_silence(&mut self, wait: Duration) {
        if let Some(line) = self.try_receive_line(wait).await {
            panic!("expected no message, got {line}");
        }
    }

    /// Wait for the server to close the connection
    pub async fn expect_close(&mut self, wait: Duration) -> ReceivedClose {
        assert!(
            self.pending.is_empty(),
            "unread messages before close: {:?}",
            self.pending
        );

        loop {
            let message = timeout(wait, self.ws.receive_message())
                .await
                .expect("connection was not closed in time");
            match message {
                WsMessage::Close(Some(frame)) => {
                    return ReceivedClose {
                        code: u16::from(frame.code),
                        reason: String::from(&*frame.reason),
                    };
                }
                WsMessage::Close(None) => {
                    return ReceivedClose {
                        code: 1005,
                        reason: String::new(),
                    };
                }
                WsMessage::Ping(_) | WsMessage::Pong(_) => continue,
                other => panic!("expected close frame, got {other:?}"),
            }
        }
    }

    pub async fn close(self) {
        self.ws.close().await;
    }
}

/// Connect several users to one session
pub async fn connect_all(
    server: &TestServer,
    user_ids: &[Uuid],
    session_id: Uuid,
) -> Vec<WsTestClient> {
    let mut clients = Vec::with_capacity(user_ids.len());
    for user_id in user_ids {
        clients.push(WsTestClient::connect(server, *user_id, session_id).await);
    }
    clients
}
