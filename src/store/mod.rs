//! Store Paths
//!
//! Store paths live under a fixed root and are named
//! `<digest>-<name>-<version>`. The name segment may itself contain hyphens.

pub mod identity;

pub use identity::{Identity, IdentityParser};

use crate::error::{ClosureError, Result};
use serde::Serialize;
use std::path::{Component, Path};

/// The standard store directory.
pub const DEFAULT_STORE_DIR: &str = "/nix/store";

/// A store path base name split into its naming-convention segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorePath {
    digest: String,
    name: String,
    version: String,
}

impl StorePath {
    /// Parse `path` relative to `store_dir`.
    ///
    /// The base name is the first component below `store_dir`; paths outside
    /// the store fall back to their final component. Base names that are not
    /// valid UTF-8 are rejected.
    pub fn parse(path: &Path, store_dir: &Path) -> Result<Self> {
        let base = base_name(path, store_dir)
            .ok_or_else(|| ClosureError::InvalidPath(path.display().to_string()))?;

        let parts: Vec<&str> = base.split('-').collect();
        if parts.len() < 3 {
            return Err(ClosureError::InvalidPath(path.display().to_string()));
        }

        Ok(Self {
            digest: parts[0].to_string(),
            name: parts[1..parts.len() - 1].join("-"),
            version: parts[parts.len() - 1].to_string(),
        })
    }

    /// Leading digest segment of the base name.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Middle segments rejoined with `-`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trailing segment of the base name.
    pub fn version(&self) -> &str {
        &self.version
    }
}

fn base_name<'a>(path: &'a Path, store_dir: &Path) -> Option<&'a str> {
    let component = match path.strip_prefix(store_dir) {
        Ok(rest) => rest.components().find_map(|c| match c {
            Component::Normal(name) => Some(name),
            _ => None,
        }),
        Err(_) => path.file_name(),
    }?;
    component.to_str()
}
