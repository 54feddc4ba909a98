//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::StoreGraphConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `dir/storegraph.toml` (if any) and environment.
    pub fn load(dir: &Path) -> Result<StoreGraphConfig, ConfigError> {
        MergeService::load(dir)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<StoreGraphConfig, ConfigError> {
        MergeService::load_from_file(path)
    }
}
