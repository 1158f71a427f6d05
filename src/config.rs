//! Finder configuration.
//!
//! Configuration is plain YAML; every field is optional:
//!
//! ```yaml
//! catalog:
//!   base_url: https://www.thecocktaildb.com/api/json/v1/1
//!   timeout_ms: 10000
//! store:
//!   path: /var/mobile/.../my_cocktails.json
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;
use tracing::info;

/// Public TheCocktailDB endpoint using the free test key.
pub const DEFAULT_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1";

/// Environment variable that overrides `catalog.base_url`.
pub const BASE_URL_ENV: &str = "COCKTAIL_FINDER_BASE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub catalog: CatalogConfig,
    pub store: StoreConfig,
}

/// Settings for the remote catalog client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    /// Total request timeout. `None` keeps the transport default.
    pub timeout_ms: Option<u64>,
    /// Connect timeout. `None` keeps the transport default.
    pub connect_timeout_ms: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: None,
            connect_timeout_ms: None,
        }
    }
}

/// Settings for the saved-cocktail store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding saved cocktails; `None` keeps them in memory only.
    pub path: Option<Utf8PathBuf>,
}

impl FinderConfig {
    /// Parses a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Reads and parses a YAML config file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        info!(%path, base_url = %config.catalog.base_url, "loaded config");
        Ok(config)
    }

    /// Applies `COCKTAIL_FINDER_BASE_URL` if it is set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        self.with_base_url_override(std::env::var(BASE_URL_ENV).ok())
    }

    fn with_base_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.filter(|url| !url.trim().is_empty()) {
            info!(%url, "base url overridden from environment");
            self.catalog.base_url = url;
        }
        self
    }
}
