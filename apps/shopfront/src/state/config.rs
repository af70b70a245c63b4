//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOPFRONT_*`)
//! 2. Config file (`SHOPFRONT_CONFIG`, else `shopfront.toml` in the config dir)
//! 3. Defaults (this file)
//!
//! ```toml
//! # shopfront.toml
//! store_name = "Brand"
//!
//! [catalog]
//! base_url = "http://localhost:3000"
//! products_path = "/api/products"
//! timeout_secs = 10
//! offline = false
//! ```
//!
//! Read-only after initialization.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shopfront_catalog::{CatalogConfig, CatalogError};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "SHOPFRONT_CONFIG";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: String, value: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigState {
    /// Brand name shown in the header.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Product fetch settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

fn default_store_name() -> String {
    "Brand".to_string()
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: default_store_name(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (a missing file is not an error)
    /// 3. Environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .or_else(Self::default_config_path);

        Self::load_with(path.as_deref(), |var| std::env::var(var).ok())
    }

    /// Same as [`ConfigState::load`] with an explicit file and variable lookup.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml(&contents)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides(lookup)?;
        config.catalog.validate()?;

        Ok(config)
    }

    /// Parses a `shopfront.toml` body.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("SHOPFRONT_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(url) = lookup("SHOPFRONT_API_BASE_URL") {
            debug!(url = %url, "Overriding API base URL from environment");
            self.catalog.base_url = url;
        }

        if let Some(path) = lookup("SHOPFRONT_PRODUCTS_PATH") {
            self.catalog.products_path = path;
        }

        if let Some(value) = lookup("SHOPFRONT_FETCH_TIMEOUT_SECS") {
            self.catalog.timeout_secs = value
                .trim()
                .parse()
                .map_err(|_| invalid("SHOPFRONT_FETCH_TIMEOUT_SECS", &value))?;
        }

        if let Some(value) = lookup("SHOPFRONT_OFFLINE") {
            self.catalog.offline =
                parse_flag(&value).ok_or_else(|| invalid("SHOPFRONT_OFFLINE", &value))?;
        }

        Ok(())
    }

    /// `<config dir>/shopfront.toml` for the current platform.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopfront", "shopfront")
            .map(|dirs| dirs.config_dir().join("shopfront.toml"))
    }
}

fn invalid(var: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        var: var.to_string(),
        value: value.to_string(),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
