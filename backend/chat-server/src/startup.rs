use crate::error::{Result as ServerErrorResult, ServerError};

use chat_auth::{JwtAlgorithm, JwtValidator, RateLimitConfig, RateLimiterFactory};
use chat_config::{Config, ConfigError};
use chat_db::{ChatMessageRepository, ChatSessionRepository};
use chat_ws::{AppState, ConnectionConfig, Hub, InactivitySweeper, Metrics, ShutdownCoordinator};

use std::path::Path;
use std::sync::Arc;

use log::info;
use sqlx::SqlitePool;
use tokio::task::JoinHandle;

/// Running background tasks plus the state shared with the router
pub struct Services {
    pub state: AppState,
    pub hub_task: JoinHandle<()>,
    pub sweeper_task: JoinHandle<()>,
}

/// HS256 when a secret is configured, otherwise RS256 from the PEM file.
pub fn build_jwt_validator(config: &Config, config_dir: &Path) -> ServerErrorResult<JwtValidator> {
    let algorithm = match (&config.auth.jwt_secret, config.auth.public_key_path(config_dir)) {
        (Some(secret), _) => JwtAlgorithm::HS256 {
            secret: secret.as_bytes().to_vec(),
        },
        (None, Some(key_path)) => {
            let public_key_pem =
                std::fs::read_to_string(&key_path).map_err(|source| ServerError::JwtKeyFile {
                    path: key_path.display().to_string(),
                    source,
                })?;
            JwtAlgorithm::RS256 { public_key_pem }
        }
        (None, None) => {
            return Err(ConfigError::invalid(
                "auth",
                "either jwt_secret or jwt_public_key_path must be set",
            )
            .into());
        }
    };

    let validator = JwtValidator::from_algorithm(algorithm)?;
    info!("JWT: {} authentication enabled", validator.algorithm());
    Ok(validator)
}

/// Spawn the hub and sweeper and assemble the shared state.
pub fn start_services(
    config: &Config,
    pool: SqlitePool,
    jwt_validator: JwtValidator,
    shutdown: ShutdownCoordinator,
) -> Services {
    let metrics = Metrics::new();

    let (hub, hub_task) = Hub::spawn(config.hub.command_buffer_size, metrics.clone(), &shutdown);
    let sweeper_task =
        InactivitySweeper::from_config(hub.clone(), &config.sweeper).spawn(shutdown.subscribe_guard());

    let state = AppState {
        jwt_validator: Arc::new(jwt_validator),
        authorizer: Arc::new(ChatSessionRepository::new(pool.clone())),
        store: Arc::new(ChatMessageRepository::new(pool)),
        hub,
        rate_limiter_factory: RateLimiterFactory::new(RateLimitConfig {
            max_requests: config.rate_limit.max_requests,
            window_secs: config.rate_limit.window_secs,
        }),
        metrics,
        shutdown,
        config: ConnectionConfig::from(&config.websocket),
    };

    Services {
        state,
        hub_task,
        sweeper_task,
    }
}
