#![allow(dead_code)]

use crate::common::fakes::{InMemoryStore, StaticAuthorizer};

use chat_auth::{JwtValidator, RateLimitConfig, RateLimiterFactory};
use chat_core::SessionAccess;
use chat_ws::{
    AppState, ConnectionConfig, Hub, HubHandle, InactivitySweeper, Metrics, ShutdownCoordinator,
};

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::TestServer;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Default JWT secret for all tests (HS256 requires at least 32 bytes)
pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-integration-tests-min-32-bytes-long";

/// Configuration for test server instances
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub send_buffer_size: usize,
    pub ping_interval: Duration,
    pub read_timeout: Duration,
    pub max_frame_bytes: usize,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_secs: u64,
    /// `(interval, max_inactivity)`; no sweeper when `None`
    pub sweeper: Option<(Duration, Duration)>,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 64,
            // Long enough that no ping lands in the middle of a test
            ping_interval: Duration::from_secs(15),
            read_timeout: Duration::from_secs(60),
            max_frame_bytes: 8192,
            rate_limit_max_requests: 100,
            rate_limit_window_secs: 60,
            sweeper: None,
        }
    }
}

impl TestServerConfig {
    pub fn with_strict_rate_limits() -> Self {
        Self {
            rate_limit_max_requests: 3,
            rate_limit_window_secs: 60,
            ..Default::default()
        }
    }

    /// Wire-level silence limit of 300ms, no sweeper
    pub fn with_short_read_timeout() -> Self {
        Self {
            read_timeout: Duration::from_millis(300),
            ..Default::default()
        }
    }

    pub fn with_max_frame_bytes(max_frame_bytes: usize) -> Self {
        Self {
            max_frame_bytes,
            ..Default::default()
        }
    }

    pub fn with_fast_sweeper() -> Self {
        Self {
            sweeper: Some((Duration::from_millis(100), Duration::from_millis(400))),
            ..Default::default()
        }
    }
}

/// Test server with access to its collaborators
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
    pub store: Arc<InMemoryStore>,
    pub authorizer: Arc<StaticAuthorizer>,
    pub hub_task: JoinHandle<()>,
}

impl TestServerWithState {
    pub fn hub(&self) -> &HubHandle {
        &self.app_state.hub
    }

    pub fn shutdown(&self) -> &ShutdownCoordinator {
        &self.app_state.shutdown
    }

    /// Create a session with an owner and optional participants
    pub fn create_session(&self, owner: Uuid, participants: &[Uuid]) -> Uuid {
        let session_id = Uuid::new_v4();
        self.authorizer
            .grant(owner, session_id, SessionAccess::Owner);
        for participant in participants {
            self.authorizer
                .grant(*participant, session_id, SessionAccess::Participant);
        }
        session_id
    }

    /// Admission completes after the upgrade, so wait for the hub to catch up
    pub async fn wait_for_session_size(&self, session_id: Uuid, expected: usize) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
        loop {
            let size = self.hub().session_size(session_id).await.expect("hub running");
            if size == expected {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "session {session_id} has {size} connection(s), expected {expected}"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default())
}

pub fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let store = Arc::new(InMemoryStore::new());
    let authorizer = Arc::new(StaticAuthorizer::new());
    let shutdown = ShutdownCoordinator::new();
    let metrics = Metrics::new();

    let (hub, hub_task) = Hub::spawn(256, metrics.clone(), &shutdown);

    if let Some((interval, max_inactivity)) = config.sweeper {
        InactivitySweeper::new(hub.clone(), interval, max_inactivity)
            .spawn(shutdown.subscribe_guard());
    }

    let app_state = AppState {
        jwt_validator: Arc::new(JwtValidator::with_hs256(TEST_JWT_SECRET)),
        authorizer: authorizer.clone(),
        store: store.clone(),
        hub,
        rate_limiter_factory: RateLimiterFactory::new(RateLimitConfig {
            max_requests: config.rate_limit_max_requests,
            window_secs: config.rate_limit_window_secs,
        }),
        metrics,
        shutdown,
        config: ConnectionConfig {
            send_buffer_size: config.send_buffer_size,
            ping_interval: config.ping_interval,
            read_timeout: config.read_timeout,
            max_frame_bytes: config.max_frame_bytes,
            ..ConnectionConfig::default()
        },
    };

    let app = Router::new()
        .route("/ws", get(chat_ws::handler))
        .with_state(app_state.clone());

    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState {
        server,
        app_state,
        store,
        authorizer,
        hub_task,
    }
}
