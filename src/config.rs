//! # Application Configuration
//!
//! Loaded once at startup from an optional JSON file. Every field has a
//! default, so an absent file or a partial file is valid.
//!
//! ```json
//! {
//!   "http": { "host": "0.0.0.0", "port": 8080, "cors_origins": [] },
//!   "store": {
//!     "backend": "file",
//!     "data_dir": "./data",
//!     "database": "sfg",
//!     "beer_collection": "beer",
//!     "customer_collection": "customer"
//!   }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::store::{DocumentStore, FileStore, MemoryStore, StoreResult};

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// Which [`DocumentStore`] implementation backs the collections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local, lost on exit
    #[default]
    Memory,
    /// One JSON file per collection under `<data_dir>/<database>/`
    File,
}

/// Store connection target and collection naming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Root directory for the file backend (required when `backend` is `file`)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_beer_collection")]
    pub beer_collection: String,

    #[serde(default = "default_customer_collection")]
    pub customer_collection: String,
}

fn default_database() -> String {
    "sfg".to_string()
}

fn default_beer_collection() -> String {
    "beer".to_string()
}

fn default_customer_collection() -> String {
    "customer".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: None,
            database: default_database(),
            beer_collection: default_beer_collection(),
            customer_collection: default_customer_collection(),
        }
    }
}

/// Configuration failure, reported before anything is started
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Load and validate configuration. `None` yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                serde_json::from_str(&content)?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store.validate()
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == StoreBackend::File && self.data_dir.is_none() {
            return Err(ConfigError::Invalid(
                "store.data_dir is required for the file backend".to_string(),
            ));
        }

        for (field, value) in [
            ("database", &self.database),
            ("beer_collection", &self.beer_collection),
            ("customer_collection", &self.customer_collection),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "store.{} must not be empty",
                    field
                )));
            }
        }

        if self.beer_collection == self.customer_collection {
            return Err(ConfigError::Invalid(format!(
                "beer and customer collections must differ, both are '{}'",
                self.beer_collection
            )));
        }

        Ok(())
    }

    /// Directory holding this database's collection files
    pub fn database_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join(&self.database))
    }

    /// Open the configured store
    pub async fn open_store(&self) -> StoreResult<Arc<dyn DocumentStore>> {
        let store: Arc<dyn DocumentStore> = match (self.backend, self.database_path()) {
            (StoreBackend::File, Some(path)) => {
                tracing::info!(path = %path.display(), "opening file store");
                Arc::new(FileStore::open(path).await?)
            }
            _ => {
                tracing::info!("using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(store)
    }
}
