//! Installed Artifact Digests
//!
//! Determines what a build output actually installs and digests it: the
//! result binary for executable outputs, or the config digest recorded in
//! the image manifest for container outputs.

use crate::error::{ClosureError, Result};
use crate::store::identity::{BIN_DIR, IMAGE_MANIFEST};
use crate::tree::file_sha256;
use crate::types::ArtifactDigest;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const SHA256_PREFIX: &str = "sha256:";

/// The subset of an OCI image manifest this crate reads.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageManifest {
    pub config: ManifestDescriptor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestDescriptor {
    pub digest: String,
}

impl ImageManifest {
    /// Config digest with a `sha256:` prefix stripped. Digests using any
    /// other algorithm are returned as recorded.
    pub fn config_digest(&self) -> ArtifactDigest {
        let digest = self.config.digest.as_str();
        ArtifactDigest::from_recorded(digest.strip_prefix(SHA256_PREFIX).unwrap_or(digest))
    }
}

/// Resolves the installed-artifact digest of a build output directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactDigestResolver;

impl ArtifactDigestResolver {
    pub fn new() -> Self {
        Self
    }

    /// Digest the artifact installed at `output`.
    ///
    /// Returns `Ok(None)` when the output is neither an executable nor an
    /// image bundle.
    pub fn resolve(&self, output: &Path) -> Result<Option<ArtifactDigest>> {
        let mut has_bin = false;
        let mut has_manifest = false;
        for entry in fs::read_dir(output).map_err(|e| ClosureError::io(output, e))? {
            let entry = entry.map_err(|e| ClosureError::io(output, e))?;
            let name = entry.file_name();
            has_bin |= name == BIN_DIR;
            has_manifest |= name == IMAGE_MANIFEST;
        }

        if has_bin {
            let binary = find_result_binary(output)?;
            debug!(binary = %binary.display(), "Hashing result binary");
            return file_sha256(&binary).map(Some);
        }

        if has_manifest {
            let manifest = read_manifest(&output.join(IMAGE_MANIFEST))?;
            return Ok(Some(manifest.config_digest()));
        }

        debug!(output = %output.display(), "No recognized artifact shape");
        Ok(None)
    }
}

/// Pick the result binary under `output/bin`: the lexicographically smallest
/// name among regular files, following symlinks. Dangling links are skipped;
/// any other metadata error is returned.
pub fn find_result_binary(output: &Path) -> Result<PathBuf> {
    let bin = output.join(BIN_DIR);
    let mut candidates = Vec::new();
    for entry in fs::read_dir(&bin).map_err(|e| ClosureError::io(&bin, e))? {
        let entry = entry.map_err(|e| ClosureError::io(&bin, e))?;
        let path = entry.path();
        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => candidates.push(path),
            Ok(_) => {}
            // dangling link
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(ClosureError::io(&path, e)),
        }
    }

    candidates
        .into_iter()
        .min_by(|a, b| a.file_name().cmp(&b.file_name()))
        .ok_or(ClosureError::NoResultBinary(bin))
}

/// Read and parse an image manifest.
pub fn read_manifest(path: &Path) -> Result<ImageManifest> {
    let bytes = fs::read(path).map_err(|e| ClosureError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|source| ClosureError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}
