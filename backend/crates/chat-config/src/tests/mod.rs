
use crate::{CONFIG_DIR_ENV, CONFIG_FILE_NAME, Config, ConfigErrorResult};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub(crate) const VALID_SECRET: &str = "0123456789abcdef0123456789abcdef";

/// Throwaway config directory plus a private variable map standing in for
/// the process environment.
pub(crate) struct TestEnv {
    dir: TempDir,
    vars: HashMap<String, String>,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let vars = HashMap::from([(
            CONFIG_DIR_ENV.to_string(),
            dir.path().to_string_lossy().into_owned(),
        )]);
        Self { dir, vars }
    }

    pub(crate) fn with_secret() -> Self {
        Self::new().var("CHAT_AUTH_JWT_SECRET", VALID_SECRET)
    }

    pub(crate) fn var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub(crate) fn file(self, contents: &str) -> Self {
        std::fs::write(self.dir.path().join(CONFIG_FILE_NAME), contents).unwrap();
        self
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn load(&self) -> ConfigErrorResult<(Config, PathBuf)> {
        Config::load_with(|name| self.vars.get(name).cloned())
    }

    /// Load, then validate against the resolved directory
    pub(crate) fn validate(&self) -> ConfigErrorResult<()> {
        let (config, dir) = self.load()?;
        config.validate(&dir)
    }
}
