//! Fake store fixtures shared by the integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory standing in for the store root.
pub struct FakeStore {
    pub root: TempDir,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    pub fn dir(&self) -> &Path {
        self.root.path()
    }

    /// Create a store path with a `bin/<binary>` file.
    pub fn add_executable(&self, base: &str, binary: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir().join(base);
        fs::create_dir_all(path.join("bin")).unwrap();
        fs::write(path.join("bin").join(binary), contents).unwrap();
        path
    }

    /// Create a store path holding a library file only.
    pub fn add_library(&self, base: &str) -> PathBuf {
        let path = self.dir().join(base);
        fs::create_dir_all(path.join("lib")).unwrap();
        fs::write(path.join("lib").join("lib.so"), base).unwrap();
        path
    }

    /// Create a store path holding an image manifest.
    pub fn add_image(&self, base: &str, config_digest: &str) -> PathBuf {
        let path = self.dir().join(base);
        fs::create_dir_all(&path).unwrap();
        fs::write(
            path.join("manifest.json"),
            format!(
                r#"{{"schemaVersion":2,"config":{{"mediaType":"application/vnd.oci.image.config.v1+json","digest":"{}","size":7}},"layers":[]}}"#,
                config_digest
            ),
        )
        .unwrap();
        path
    }
}

/// Graph label in the quoted form graph tools emit.
pub fn quoted(base: &str) -> String {
    format!("\"{}\"", base)
}
