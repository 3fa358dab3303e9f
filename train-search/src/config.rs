//! Application configuration.
//!
//! Everything has a default, so the server runs with no config file at all.
//! A JSON file named by `TRAIN_SEARCH_CONFIG` replaces any subset of the
//! defaults, and a couple of environment variables override the server
//! settings on top of that.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cache::CacheConfig;
use crate::engine::EngineConfig;
use crate::sources::{CsvProviderConfig, SourceLocation, SourceSchema, TimetableSchema};

/// Environment variable naming the JSON config file.
pub const CONFIG_PATH_VAR: &str = "TRAIN_SEARCH_CONFIG";

/// Environment variable overriding the listen address.
pub const ADDR_VAR: &str = "TRAIN_SEARCH_ADDR";

/// Environment variable overriding the reload interval in seconds.
pub const REFRESH_VAR: &str = "TRAIN_SEARCH_REFRESH_SECS";

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`AppConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Environment variable has an unusable value
    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    /// Two sources share an id
    #[error("duplicate source id '{0}'")]
    DuplicateSource(String),
}

/// A schedule source: where to read it and how its columns are named.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    /// File path or `http(s)://` URL.
    pub location: String,

    #[serde(flatten)]
    pub schema: SourceSchema,
}

/// The timetable: where to read it and how its columns are named.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimetableConfig {
    pub location: String,

    #[serde(flatten)]
    pub schema: TimetableSchema,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            location: "data/train_schedule.csv".to_string(),
            schema: TimetableSchema::default(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// How often to reload every source (seconds). Zero disables reloading.
    pub refresh_secs: u64,

    /// Timeout for fetching URL sources (seconds).
    pub http_timeout_secs: u64,
}

impl ServerConfig {
    /// Reload interval, or `None` when reloading is disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_secs > 0).then(|| Duration::from_secs(self.refresh_secs))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            refresh_secs: 24 * 60 * 60,
            http_timeout_secs: 30,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Schedule sources, highest priority first.
    pub sources: Vec<SourceConfig>,
    pub timetable: TimetableConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceConfig {
                    location: "data/schedules.csv".to_string(),
                    schema: SourceSchema::schedules(),
                },
                SourceConfig {
                    location: "data/trains_cleartrip.csv".to_string(),
                    schema: SourceSchema::cleartrip(),
                },
            ],
            timetable: TimetableConfig::default(),
            cache: CacheConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a JSON config document. Missing sections keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every source id is unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(source.schema.id.as_str()) {
                return Err(ConfigError::DuplicateSource(source.schema.id.clone()));
            }
        }
        Ok(())
    }

    /// Read and parse a JSON config file.
    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&json)
    }

    /// Load from the process environment: the optional config file, then
    /// the variable overrides.
    pub async fn from_env() -> Result<Self, ConfigError> {
        let config = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path)).await?,
            None => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `TRAIN_SEARCH_ADDR` and `TRAIN_SEARCH_REFRESH_SECS` from `lookup`.
    pub fn apply_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ADDR_VAR) {
            self.server.addr = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ADDR_VAR,
                value,
            })?;
        }
        if let Some(value) = lookup(REFRESH_VAR) {
            self.server.refresh_secs =
                value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    name: REFRESH_VAR,
                    value,
                })?;
        }
        Ok(self)
    }

    /// Engine configuration: one schema normalizer per source, in order.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(
            self.sources.iter().map(|s| s.schema.clone()),
            self.timetable.schema.clone(),
        )
    }

    /// CSV provider configuration for the configured locations.
    pub fn provider_config(&self) -> CsvProviderConfig {
        let mut config = CsvProviderConfig::new(SourceLocation::parse(&self.timetable.location));
        config.timeout_secs = self.server.http_timeout_secs;
        self.sources.iter().fold(config, |config, source| {
            config.with_source(&source.schema.id, SourceLocation::parse(&source.location))
        })
    }
}
