use crate::ConfigErrorResult;
use crate::validation::{check_exceeds, check_range};

use std::time::Duration;

use serde::Deserialize;

const SECTION: &str = "websocket";

pub const SEND_BUFFER_RANGE: (usize, usize) = (1, 10_000);
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 256;

pub const PING_INTERVAL_RANGE: (u64, u64) = (1, 300);
pub const DEFAULT_PING_INTERVAL_SECS: u64 = 15;

pub const READ_TIMEOUT_RANGE: (u64, u64) = (2, 3600);
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 120;

pub const WRITE_TIMEOUT_RANGE: (u64, u64) = (1, 300);
pub const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 30;

pub const MAX_FRAME_RANGE: (usize, usize) = (256, 16 * 1024 * 1024);
pub const DEFAULT_MAX_FRAME_BYTES: usize = 8192;

/// Per-connection transport settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    /// Outbound queue capacity; a full queue evicts the connection
    pub send_buffer_size: usize,
    pub ping_interval_secs: u64,
    /// Read deadline, extended by any inbound frame including pongs
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
    pub max_frame_bytes: usize,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            ping_interval_secs: DEFAULT_PING_INTERVAL_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
            write_timeout_secs: DEFAULT_WRITE_TIMEOUT_SECS,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}

impl WebSocketConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(SECTION, "send_buffer_size", self.send_buffer_size, SEND_BUFFER_RANGE)?;
        check_range(SECTION, "ping_interval_secs", self.ping_interval_secs, PING_INTERVAL_RANGE)?;
        check_range(SECTION, "read_timeout_secs", self.read_timeout_secs, READ_TIMEOUT_RANGE)?;
        check_range(SECTION, "write_timeout_secs", self.write_timeout_secs, WRITE_TIMEOUT_RANGE)?;
        check_range(SECTION, "max_frame_bytes", self.max_frame_bytes, MAX_FRAME_RANGE)?;

        // An idle but healthy peer only stays inside the read deadline by answering pings.
        check_exceeds(
            SECTION,
            ("read_timeout_secs", self.read_timeout_secs),
            ("ping_interval_secs", self.ping_interval_secs),
        )
    }

    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}
