//! TOML file source

use crate::config::CONFIG_FILE_NAME;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

/// Add an explicit config file; it must exist.
pub fn add_required(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = path
        .to_str()
        .ok_or_else(|| ConfigError::Message(format!("non UTF-8 config path: {:?}", path)))?;
    Ok(builder.add_source(File::new(path, FileFormat::Toml).required(true)))
}

/// Add `storegraph.toml` from `dir` if present.
pub fn add_optional(
    builder: ConfigBuilder<DefaultState>,
    dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    match path.to_str() {
        Some(path) => Ok(builder.add_source(File::new(path, FileFormat::Toml).required(false))),
        None => Ok(builder),
    }
}
