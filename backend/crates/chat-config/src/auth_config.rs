use crate::{ConfigError, ConfigErrorResult};

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// HS256 secrets shorter than this are rejected.
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Token verification keys. One of `jwt_secret` (HS256) or
/// `jwt_public_key_path` (RS256) must be set; the secret wins if both are.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    /// PEM file, relative paths resolve against the config directory
    pub jwt_public_key_path: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("jwt_public_key_path", &self.jwt_public_key_path)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        if let Some(secret) = &self.jwt_secret {
            if secret.len() < MIN_JWT_SECRET_LENGTH {
                return Err(ConfigError::invalid(
                    "auth",
                    format!(
                        "auth.jwt_secret must be at least {MIN_JWT_SECRET_LENGTH} characters, got {}",
                        secret.len()
                    ),
                ));
            }
            return Ok(());
        }

        let Some(path) = self.public_key_path(config_dir) else {
            return Err(ConfigError::invalid(
                "auth",
                "either auth.jwt_secret or auth.jwt_public_key_path must be set",
            ));
        };

        if !path.is_file() {
            return Err(ConfigError::invalid(
                "auth",
                format!("auth.jwt_public_key_path does not exist: {}", path.display()),
            ));
        }

        Ok(())
    }

    pub fn public_key_path(&self, config_dir: &Path) -> Option<PathBuf> {
        let raw = self.jwt_public_key_path.as_deref()?;
        let path = Path::new(raw);
        Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            config_dir.join(path)
        })
    }

    pub fn algorithm_name(&self) -> &'static str {
        match (&self.jwt_secret, &self.jwt_public_key_path) {
            (Some(_), _) => "HS256",
            (None, Some(_)) => "RS256",
            (None, None) => "none",
        }
    }
}
