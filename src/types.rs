//! Core value types shared across the crate.
//!
//! The two digest encodings used here are deliberately separate types:
//! [`NarHash`] hashes a canonical tree serialization and renders in Nix
//! base-32, [`ArtifactDigest`] is a hex digest of raw artifact bytes.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Attribute key for the content hash written onto graph nodes.
pub const ATTR_HASH: &str = "hash";
/// Attribute key for the parsed package name.
pub const ATTR_NAME: &str = "name";
/// Attribute key for the parsed package version.
pub const ATTR_VERSION: &str = "version";

/// SHA-256 over the NAR serialization of a store path.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NarHash([u8; 32]);

impl NarHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Encode in the store's base-32 alphabet.
    pub fn to_nix_base32(&self) -> String {
        nix_base32::to_nix_base32(&self.0)
    }
}

impl fmt::Debug for NarHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NarHash({})", self.to_nix_base32())
    }
}

impl fmt::Display for NarHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_nix_base32())
    }
}

impl Serialize for NarHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_nix_base32())
    }
}

/// Digest of an installed artifact: a binary's hex SHA-256 or the hex part
/// of an image manifest's config digest.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactDigest(String);

impl ArtifactDigest {
    pub fn from_sha256(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Take a digest string as recorded elsewhere (e.g. an image manifest).
    pub fn from_recorded(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ArtifactDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArtifactDigest({})", self.0)
    }
}

impl fmt::Display for ArtifactDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse classification of what a store path contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    /// Has a `bin` directory.
    Executable,
    /// Has a `manifest.json` image manifest.
    Container,
    Unknown,
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppType::Executable => "executable",
            AppType::Container => "container",
            AppType::Unknown => "unknown",
        };
        f.write_str(s)
    }
}
