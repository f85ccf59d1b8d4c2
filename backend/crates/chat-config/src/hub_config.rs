use crate::ConfigErrorResult;
use crate::validation::check_range;

use serde::Deserialize;

pub const COMMAND_BUFFER_RANGE: (usize, usize) = (16, 1_000_000);
pub const DEFAULT_COMMAND_BUFFER_SIZE: usize = 1024;

/// Hub actor mailbox.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub command_buffer_size: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            command_buffer_size: DEFAULT_COMMAND_BUFFER_SIZE,
        }
    }
}

impl HubConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(
            "hub",
            "command_buffer_size",
            self.command_buffer_size,
            COMMAND_BUFFER_RANGE,
        )
    }
}
