use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, HubConfig, LoggingConfig,
    RateLimitConfig, ServerConfig, SweeperConfig, WebSocketConfig,
};

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::Deserialize;

pub const CONFIG_DIR_ENV: &str = "CHAT_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR_NAME: &str = ".chat";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub websocket: WebSocketConfig,
    pub hub: HubConfig,
    pub sweeper: SweeperConfig,
    pub rate_limit: RateLimitConfig,
}

impl Config {
    /// Load from the process environment. See [`Config::load_with`].
    pub fn load() -> ConfigErrorResult<(Self, PathBuf)> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// Resolve the config directory, read `config.toml` from it when present
    /// and apply `CHAT_*` overrides. The directory is created if missing.
    ///
    /// Does not validate; call [`Config::validate`] with the returned directory.
    pub fn load_with<F>(env: F) -> ConfigErrorResult<(Self, PathBuf)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_dir = Self::config_dir_with(&env)?;
        std::fs::create_dir_all(&config_dir).map_err(|source| ConfigError::Read {
            path: config_dir.clone(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let mut config = if config_path.is_file() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        EnvOverrides(&env).apply(&mut config);
        Ok((config, config_dir))
    }

    /// `CHAT_CONFIG_DIR` if set, else `./.chat`
    pub fn config_dir_with<F>(env: F) -> ConfigErrorResult<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        match env(CONFIG_DIR_ENV) {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => std::env::current_dir()
                .map(|cwd| cwd.join(DEFAULT_CONFIG_DIR_NAME))
                .map_err(ConfigError::config_dir),
        }
    }

    fn from_file(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject the first bad section; run once at startup.
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(config_dir)?;
        self.logging.validate()?;
        self.websocket.validate()?;
        self.hub.validate()?;
        self.sweeper.validate()?;
        self.rate_limit.validate()
    }

    /// Secrets are never logged, only the algorithm they select.
    pub fn log_summary(&self, config_dir: &Path) {
        info!("Configuration loaded from {}", config_dir.display());
        info!("  server: {}", self.server.bind_addr());
        info!("  database: {}", self.database.resolve(config_dir).display());
        info!("  auth: {}", self.auth.algorithm_name());
        info!(
            "  logging: {} (colored: {}, file: {})",
            self.logging.level.filter(),
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        let ws = &self.websocket;
        info!(
            "  websocket: buffer={}, ping={}s, read={}s, write={}s, max_frame={}B",
            ws.send_buffer_size,
            ws.ping_interval_secs,
            ws.read_timeout_secs,
            ws.write_timeout_secs,
            ws.max_frame_bytes
        );
        info!("  hub: commands={}", self.hub.command_buffer_size);
        info!(
            "  sweeper: every {}s, idle limit {}s",
            self.sweeper.interval_secs, self.sweeper.max_inactivity_secs
        );
        info!(
            "  rate_limit: {}/{}s",
            self.rate_limit.max_requests, self.rate_limit.window_secs
        );
    }
}

/// `CHAT_*` variables layered over file values. Unparseable values are ignored.
struct EnvOverrides<'a, F>(&'a F);

impl<F> EnvOverrides<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn apply(&self, config: &mut Config) {
        let server = &mut config.server;
        self.set("CHAT_SERVER_HOST", &mut server.host);
        self.set("CHAT_SERVER_PORT", &mut server.port);

        self.set("CHAT_DATABASE_PATH", &mut config.database.path);

        let auth = &mut config.auth;
        self.set_some("CHAT_AUTH_JWT_SECRET", &mut auth.jwt_secret);
        self.set_some("CHAT_AUTH_JWT_PUBLIC_KEY_PATH", &mut auth.jwt_public_key_path);

        let logging = &mut config.logging;
        self.set("CHAT_LOG_LEVEL", &mut logging.level);
        self.set_flag("CHAT_LOG_COLORED", &mut logging.colored);
        self.set_some("CHAT_LOG_FILE", &mut logging.file);
        self.set("CHAT_LOG_DIR", &mut logging.dir);

        let ws = &mut config.websocket;
        self.set("CHAT_WS_SEND_BUFFER_SIZE", &mut ws.send_buffer_size);
        self.set("CHAT_WS_PING_INTERVAL_SECS", &mut ws.ping_interval_secs);
        self.set("CHAT_WS_READ_TIMEOUT_SECS", &mut ws.read_timeout_secs);
        self.set("CHAT_WS_WRITE_TIMEOUT_SECS", &mut ws.write_timeout_secs);
        self.set("CHAT_WS_MAX_FRAME_BYTES", &mut ws.max_frame_bytes);

        self.set("CHAT_HUB_COMMAND_BUFFER_SIZE", &mut config.hub.command_buffer_size);

        let sweeper = &mut config.sweeper;
        self.set("CHAT_SWEEPER_INTERVAL_SECS", &mut sweeper.interval_secs);
        self.set("CHAT_SWEEPER_MAX_INACTIVITY_SECS", &mut sweeper.max_inactivity_secs);

        let rate_limit = &mut config.rate_limit;
        self.set("CHAT_RATE_LIMIT_MAX_REQUESTS", &mut rate_limit.max_requests);
        self.set("CHAT_RATE_LIMIT_WINDOW_SECS", &mut rate_limit.window_secs);
    }

    fn set<T: FromStr>(&self, name: &str, target: &mut T) {
        if let Some(value) = (self.0)(name).and_then(|raw| raw.trim().parse().ok()) {
            *target = value;
        }
    }

    fn set_some(&self, name: &str, target: &mut Option<String>) {
        if let Some(raw) = (self.0)(name) {
            *target = Some(raw);
        }
    }

    /// "true", "1", "yes" and "on" enable; anything else disables.
    fn set_flag(&self, name: &str, target: &mut bool) {
        if let Some(raw) = (self.0)(name) {
            *target = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            );
        }
    }
}
