use crate::{ConfigError, ConfigErrorResult, LogLevel};

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_LOG_DIRECTORY: &str = "log";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// ANSI colors on stdout
    pub colored: bool,
    /// Log file name under `dir`; stdout when unset
    pub file: Option<String>,
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            colored: true,
            file: None,
            dir: DEFAULT_LOG_DIRECTORY.to_owned(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let Some(file) = &self.file else {
            return Ok(());
        };

        let plain_name = Path::new(file).file_name().is_some_and(|name| name == file.as_str());
        if file.trim().is_empty() || !plain_name {
            return Err(ConfigError::invalid(
                "logging",
                format!("logging.file must be a plain file name, got '{file}'"),
            ));
        }

        if self.dir.trim().is_empty() {
            return Err(ConfigError::invalid(
                "logging",
                "logging.dir must be set when logging.file is used",
            ));
        }

        Ok(())
    }

    /// Absolute log file path, `None` when logging to stdout.
    /// A relative `dir` resolves against the config directory.
    pub fn file_path(&self, config_dir: &Path) -> Option<PathBuf> {
        let file = self.file.as_ref()?;
        let dir = Path::new(&self.dir);
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            config_dir.join(dir)
        };
        Some(dir.join(file))
    }
}
