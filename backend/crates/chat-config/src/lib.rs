//! Layered server configuration: defaults, then `config.toml`, then `CHAT_*`
//! environment variables.

mod auth_config;
mod config;
mod database_config;
mod error;
mod hub_config;
mod log_level;
mod logging_config;
mod rate_limit_config;
mod server_config;
mod sweeper_config;
mod validation;
mod websocket_config;

pub use auth_config::{AuthConfig, MIN_JWT_SECRET_LENGTH};
pub use config::{CONFIG_DIR_ENV, CONFIG_FILE_NAME, Config};
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use hub_config::HubConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use rate_limit_config::RateLimitConfig;
pub use server_config::{DEFAULT_PORT, ServerConfig};
pub use sweeper_config::SweeperConfig;
pub use websocket_config::WebSocketConfig;

#[cfg(test)]
mod tests;
