use chat_config::WebSocketConfig;

use std::time::Duration;

/// Per-connection transport settings
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Outbound queue capacity; a full queue evicts the connection
    pub send_buffer_size: usize,
    pub ping_interval: Duration,
    /// Longest silence tolerated between inbound frames (pongs included)
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    pub max_frame_bytes: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::from(&WebSocketConfig::default())
    }
}

impl From<&WebSocketConfig> for ConnectionConfig {
    fn from(config: &WebSocketConfig) -> Self {
        Self {
            send_buffer_size: config.send_buffer_size,
            ping_interval: config.ping_interval(),
            read_timeout: config.read_timeout(),
            write_timeout: config.write_timeout(),
            max_frame_bytes: config.max_frame_bytes,
        }
    }
}
