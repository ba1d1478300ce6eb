//! # edu-config
//!
//! Layered configuration loading for edushare using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`EDUSHARE_*` prefix, `__` as separator)
//! 2. `edushare.toml` in the working directory, or an explicit `--config` file
//! 3. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `EDUSHARE_SERVER__PORT` -> `server.port`,
//! `EDUSHARE_DATABASE__URL` -> `database.url`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use edu_config::EduConfig;
//!
//! let config = EduConfig::load_with_dotenv(None).expect("config");
//! println!("listening on {}", config.server.address());
//! ```

mod database;
mod error;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file name.
pub const CONFIG_FILE: &str = "edushare.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EduConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl EduConfig {
    /// Load configuration from TOML and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(config_path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(config_path)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let file = config_path.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }

        figment.merge(Env::prefixed("EDUSHARE_").split("__"))
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unusable port or an empty
    /// local database path with no remote configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".into(),
                reason: "must be non-zero".into(),
            });
        }
        if !self.database.is_remote() && self.database.path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "required when no remote database is configured".into(),
            });
        }
        Ok(())
    }
}
