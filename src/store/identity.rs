//! Identity extraction for store paths

use super::{StorePath, DEFAULT_STORE_DIR};
use crate::error::{ClosureError, Result};
use crate::types::AppType;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker child for executable outputs.
pub const BIN_DIR: &str = "bin";
/// Marker child for container image outputs.
pub const IMAGE_MANIFEST: &str = "manifest.json";

/// Logical identity of one store path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub name: String,
    pub version: String,
    pub app_type: AppType,
    pub content_digest: String,
}

/// Derives [`Identity`] records from store paths.
#[derive(Debug, Clone)]
pub struct IdentityParser {
    store_dir: PathBuf,
}

impl Default for IdentityParser {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_DIR)
    }
}

impl IdentityParser {
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
        }
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// Classify the path from its immediate children, then split its base
    /// name into digest, name and version.
    pub fn parse(&self, path: &Path) -> Result<Identity> {
        let app_type = classify(path)?;
        let store_path = StorePath::parse(path, &self.store_dir)?;

        Ok(Identity {
            name: store_path.name().to_string(),
            version: store_path.version().to_string(),
            app_type,
            content_digest: store_path.digest().to_string(),
        })
    }
}

/// Look for the `bin` and `manifest.json` markers among `path`'s children.
/// `bin` wins when both are present.
pub fn classify(path: &Path) -> Result<AppType> {
    let mut has_manifest = false;
    for entry in fs::read_dir(path).map_err(|e| ClosureError::io(path, e))? {
        let entry = entry.map_err(|e| ClosureError::io(path, e))?;
        let name = entry.file_name();
        if name == BIN_DIR {
            return Ok(AppType::Executable);
        }
        if name == IMAGE_MANIFEST {
            has_manifest = true;
        }
    }

    Ok(if has_manifest {
        AppType::Container
    } else {
        AppType::Unknown
    })
}
