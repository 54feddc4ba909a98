//! Error types for closure analysis.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by hashing, identity parsing and closure analysis.
#[derive(Debug, Error)]
pub enum ClosureError {
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read symlink {}: {source}", path.display())]
    Symlink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file type at {}", .0.display())]
    UnsupportedFileType(PathBuf),

    #[error("file changed while hashing: {}", .0.display())]
    ContentChanged(PathBuf),

    #[error("invalid image manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no result binary found in {}", .0.display())]
    NoResultBinary(PathBuf),

    #[error("graph discovery failed: {0}")]
    Discovery(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl ClosureError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ClosureError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<walkdir::Error> for ClosureError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        ClosureError::Io {
            path,
            source: err.into(),
        }
    }
}

/// Result type alias for closure operations.
pub type Result<T> = std::result::Result<T, ClosureError>;
