use crate::{ConfigError, ConfigErrorResult};

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_DATABASE_FILENAME: &str = "chat.db";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Relative to the config directory
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATABASE_FILENAME.to_owned(),
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let path = Path::new(self.path.trim());
        let stays_inside = path
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

        if self.path.trim().is_empty() || !stays_inside {
            return Err(ConfigError::invalid(
                "database",
                format!(
                    "database.path must be a relative path inside the config directory, got '{}'",
                    self.path
                ),
            ));
        }

        Ok(())
    }

    pub fn resolve(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.path)
    }
}
