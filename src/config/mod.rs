//! Configuration
//!
//! Layered configuration: built-in defaults, then an optional TOML file,
//! then `STOREGRAPH__*` environment variables.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::store::DEFAULT_STORE_DIR;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name looked up in the working directory when no explicit config
/// path is given.
pub const CONFIG_FILE_NAME: &str = "storegraph.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreGraphConfig {
    /// Root directory of the package store
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_DIR)
}

impl Default for StoreGraphConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            logging: LoggingConfig::default(),
        }
    }
}
