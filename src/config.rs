//! User configuration, read from `<config_dir>/omnix-tui/config.json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::health::HealthConfig;
use crate::nix::{NixVersion, ProbeError};

/// Errors that can occur while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid min-nix-version in {path}: {source}")]
    MinNixVersion {
        path: PathBuf,
        #[source]
        source: ProbeError,
    },
}

/// Dashboard settings. Every field has a default, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Flake whose outputs the flake browser lists.
    pub flake: PathBuf,
    /// Spinner animation period in milliseconds.
    pub tick_interval_ms: u64,
    /// `tracing` filter used when `OMNIX_TUI_LOG` is unset.
    pub log_filter: String,
    pub health: HealthConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flake: PathBuf::from("."),
            tick_interval_ms: 100,
            log_filter: "info".to_string(),
            health: HealthConfig::default(),
        }
    }
}

impl Config {
    /// Loads the config from the platform config directory, falling back to
    /// defaults when there is no config directory or no file.
    pub fn load() -> Result<Self, ConfigError> {
        match dirs::config_dir() {
            Some(dir) => Self::from_path(dir.join("omnix-tui").join("config.json")),
            None => Ok(Self::default()),
        }
    }

    /// Loads the config from `path`; a missing file yields the defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config
            .health
            .min_nix_version
            .parse::<NixVersion>()
            .map_err(|source| ConfigError::MinNixVersion {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config)
    }

    /// Spinner animation period; never zero.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}
