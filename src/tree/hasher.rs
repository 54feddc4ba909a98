//! Hash computation for store paths and artifact files

use crate::error::{ClosureError, Result};
use crate::tree::archive::NarWriter;
use crate::types::{ArtifactDigest, NarHash};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

/// Computes canonical content hashes of filesystem entries.
///
/// The hash is SHA-256 over the NAR serialization of the entry, so two
/// trees with the same logical content hash identically.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHasher;

impl ContentHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash the file, directory tree or symlink at `path`.
    pub fn hash(&self, path: &Path) -> Result<NarHash> {
        let mut writer = NarWriter::new(Sha256::new());
        writer.dump(path)?;
        Ok(NarHash::from_bytes(writer.into_inner().finalize().into()))
    }
}

/// Plain SHA-256 of a file's bytes, hex encoded. Symlinks are followed.
pub fn file_sha256(path: &Path) -> Result<ArtifactDigest> {
    let mut file = File::open(path).map_err(|e| ClosureError::io(path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| ClosureError::io(path, e))?;
    Ok(ArtifactDigest::from_sha256(&hasher.finalize()))
}
