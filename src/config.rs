//! Voyago configuration.
//!
//! Loaded from `~/.voyago/config.toml`. A missing file means defaults.
//!
//! The start destination is resolved through a chain:
//!
//! 1. `--start <token>`: explicit per-invocation override
//! 2. `VOYAGO_START` env var: process/session level
//! 3. `start-destination` in `~/.voyago/config.toml`
//! 4. `trips`

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::{Deserialize, Serialize};

use crate::route::{Route, RouteError};

/// Environment variable overriding the configured start destination.
pub const START_ENV: &str = "VOYAGO_START";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid start destination from {origin}: {source}")]
    StartDestination {
        origin: String,
        #[source]
        source: RouteError,
    },
}

/// Voyago configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Token of the screen a new session opens on.
    /// `trips` when not set.
    pub start_destination: Option<String>,
}

impl Config {
    /// Load config from `~/.voyago/config.toml`.
    ///
    /// Returns defaults when the home directory or the file is missing.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file. Missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The config file path: `~/.voyago/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".voyago").join("config.toml"))
    }

    /// Resolve the start destination: flag, then `VOYAGO_START`, then config, then `trips`.
    pub fn start_route(&self, explicit: Option<&str>) -> Result<Route, ConfigError> {
        let from_env = env::var(START_ENV).ok();
        self.resolve_start(explicit, from_env.as_deref())
    }

    fn resolve_start(
        &self,
        explicit: Option<&str>,
        from_env: Option<&str>,
    ) -> Result<Route, ConfigError> {
        let (origin, token) = if let Some(token) = explicit {
            ("--start".to_string(), token)
        } else if let Some(token) = from_env.filter(|s| !s.is_empty()) {
            (START_ENV.to_string(), token)
        } else if let Some(token) = self.start_destination.as_deref().filter(|s| !s.is_empty()) {
            let origin = Self::path().map_or_else(
                || "config".to_string(),
                |p| p.display().to_string(),
            );
            (origin, token)
        } else {
            return Ok(Route::Trips);
        };

        token
            .parse()
            .map_err(|source| ConfigError::StartDestination { origin, source })
    }
}
