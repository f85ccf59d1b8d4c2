#![allow(dead_code)]

//! Test infrastructure for chat-server end-to-end tests

use chat_auth::JwtValidator;
use chat_config::Config;
use chat_db::{ChatMessageRepository, ChatSessionRepository};
use chat_server::{Services, build_router, start_services};
use chat_ws::ShutdownCoordinator;

use std::time::{SystemTime, UNIX_EPOCH};

use axum_test::TestServer;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-integration-tests-min-32-bytes-long";

pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub sessions: ChatSessionRepository,
    pub messages: ChatMessageRepository,
    pub shutdown: ShutdownCoordinator,
    pub services_hub_task: tokio::task::JoinHandle<()>,
}

/// Full stack over an in-memory database
pub async fn create_test_app() -> TestApp {
    let pool = chat_db::open_in_memory_pool()
        .await
        .expect("Failed to create test database");

    let shutdown = ShutdownCoordinator::new();
    let Services {
        state, hub_task, ..
    } = start_services(
        &Config::default(),
        pool.clone(),
        JwtValidator::with_hs256(TEST_JWT_SECRET.as_bytes()),
        shutdown.clone(),
    );

    let server = TestServer::builder()
        .http_transport()
        .build(build_router(state))
        .expect("Failed to create test server");

    TestApp {
        server,
        sessions: ChatSessionRepository::new(pool.clone()),
        messages: ChatMessageRepository::new(pool.clone()),
        pool,
        shutdown,
        services_hub_task: hub_task,
    }
}

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    exp: u64,
    iat: u64,
}

pub fn create_test_token(user_id: Uuid) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs();
    let claims = TestClaims {
        sub: user_id.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to encode JWT")
}
