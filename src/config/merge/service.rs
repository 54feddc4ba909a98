//! MergeService: orchestrates sources and deserializes to StoreGraphConfig.

use crate::config::sources::{environment, file};
use crate::config::StoreGraphConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config with `storegraph.toml` from `dir` as the file layer.
    /// Precedence: defaults (lowest) -> file -> environment (highest).
    pub fn load(dir: &Path) -> Result<StoreGraphConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = file::add_optional(builder, dir)?;
        let builder = environment::add_to_builder(builder)?;
        builder.build()?.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<StoreGraphConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = file::add_required(builder, path)?;
        let builder = environment::add_to_builder(builder)?;
        builder.build()?.try_deserialize()
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = StoreGraphConfig::default();
    let store_dir = defaults.store_dir.to_string_lossy().into_owned();
    Config::builder()
        .set_default("store_dir", store_dir)?
        .set_default("logging.level", defaults.logging.level)?
        .set_default("logging.format", defaults.logging.format)?
        .set_default("logging.output", defaults.logging.output)
}
