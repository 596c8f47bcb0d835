//! Deploy-time configuration loaded from JSON files.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides [`ServiceConfig::base_url`].
pub const BASE_URL_ENV: &str = "MTE_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let raw = std::fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Where the remote catalog and scoring service lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ServiceConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://mte-backend-v2.onrender.com";

    pub fn v0() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.into(),
            timeout_ms: default_timeout_ms(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = load_json(path)?;
        if config.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        Ok(config)
    }

    /// Applies `MTE_BASE_URL` when set and non-empty.
    pub fn with_env_override(self) -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => self.with_base_url(url),
            _ => self,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::v0()
    }
}
