use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
/// Lowest non-privileged port; 0 asks the OS for an ephemeral one.
pub const MIN_PORT: u16 = 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() || self.host.contains(char::is_whitespace) {
            return Err(ConfigError::invalid(
                "server",
                format!("server.host must be a bare host name, got '{}'", self.host),
            ));
        }

        match self.port {
            0 => Ok(()),
            port if port >= MIN_PORT => Ok(()),
            port => Err(ConfigError::invalid(
                "server",
                format!("server.port must be 0 (auto) or >= {MIN_PORT}, got {port}"),
            )),
        }
    }

    /// `host:port` as accepted by `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
