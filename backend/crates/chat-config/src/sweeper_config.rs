use crate::ConfigErrorResult;
use crate::validation::{check_exceeds, check_range};

use std::time::Duration;

use serde::Deserialize;

const SECTION: &str = "sweeper";

pub const SWEEP_INTERVAL_RANGE: (u64, u64) = (1, 3600);
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

pub const MAX_INACTIVITY_RANGE: (u64, u64) = (2, 86_400);
pub const DEFAULT_MAX_INACTIVITY_SECS: u64 = 300;

/// Idle-connection eviction.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweeperConfig {
    pub interval_secs: u64,
    /// Connections idle longer than this are evicted
    pub max_inactivity_secs: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            max_inactivity_secs: DEFAULT_MAX_INACTIVITY_SECS,
        }
    }
}

impl SweeperConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(SECTION, "interval_secs", self.interval_secs, SWEEP_INTERVAL_RANGE)?;
        check_range(
            SECTION,
            "max_inactivity_secs",
            self.max_inactivity_secs,
            MAX_INACTIVITY_RANGE,
        )?;
        check_exceeds(
            SECTION,
            ("max_inactivity_secs", self.max_inactivity_secs),
            ("interval_secs", self.interval_secs),
        )
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn max_inactivity(&self) -> Duration {
        Duration::from_secs(self.max_inactivity_secs)
    }
}
