use pagecraft_document::Registry;
use pagecraft_editor::DEFAULT_UNDO_LEVELS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown catalog '{0}' (expected 'page' or 'store')")]
    UnknownCatalog(String),
}

/// Where save and publish requests go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    Http,
    File,
}

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Page-builder API root used by the http gateway
    pub endpoint: String,

    /// Environment variable holding the bearer token
    pub token_env: String,

    /// Output directory for the file gateway
    pub out_dir: String,

    pub gateway: GatewayKind,

    /// Maximum undo levels (0 = unlimited)
    pub undo_levels: usize,

    /// Element catalog: "page" or "store"
    pub catalog: String,

    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> Result<Self, ConfigError> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the configured element catalog
    pub fn registry(&self) -> Result<&'static Registry, ConfigError> {
        Registry::by_name(&self.catalog).ok_or_else(|| ConfigError::UnknownCatalog(self.catalog.clone()))
    }

    /// Bearer token from the configured environment variable, if set
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env).ok().filter(|token| !token.is_empty())
    }

    /// Get absolute path to the output directory
    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/page-builder".to_string(),
            token_env: "PAGECRAFT_TOKEN".to_string(),
            out_dir: "dist".to_string(),
            gateway: GatewayKind::File,
            undo_levels: DEFAULT_UNDO_LEVELS,
            catalog: "page".to_string(),
            log_level: "info".to_string(),
        }
    }
}
