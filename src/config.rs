//! Application configuration, loadable from TOML.
//!
//! Every table and field is optional; missing values fall back to
//! [`Default`]. Command-line flags are applied on top by the binaries.

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::EngineConfig;
use crate::error::ConfigError;
use crate::eval::HEURISTIC_LIMIT;

/// Deepest search the engine accepts
pub const MAX_SEARCH_DEPTH: u8 = 60;

/// HTTP service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:8080`
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        if engine.max_depth == 0 || engine.max_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "engine.max_depth must be in 1..={MAX_SEARCH_DEPTH}"
            )));
        }
        if engine.time_limit_ms == 0 {
            return Err(ConfigError::Validation(
                "engine.time_limit_ms must be > 0".into(),
            ));
        }
        if engine.eval.endgame_discs == 0 || engine.eval.endgame_discs > 64 {
            return Err(ConfigError::Validation(
                "engine.eval.endgame_discs must be in 1..=64".into(),
            ));
        }
        if !engine.eval.is_bounded() {
            return Err(ConfigError::Validation(format!(
                "engine.eval weights can reach {}, the limit for undecided positions is {HEURISTIC_LIMIT}",
                engine.eval.max_heuristic_score()
            )));
        }
        if self.server.addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "server.addr '{}' is not a socket address",
                self.server.addr
            )));
        }
        Ok(())
    }

    /// Bind address of the HTTP service. Only valid after [`AppConfig::validate`].
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.addr.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "server.addr '{}' is not a socket address",
                self.server.addr
            ))
        })
    }

    /// TOML text with every default value, for writing an example config.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
