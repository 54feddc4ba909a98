//! Node label normalization

use std::path::{Path, PathBuf};

/// Recover a literal path from a node display name.
///
/// Graph sources wrap names in double quotes and may escape embedded quotes
/// as `\"`; escapes are undone first, then surrounding quotes dropped.
pub fn normalize_label(label: &str) -> String {
    label
        .trim()
        .replace("\\\"", "\"")
        .trim_matches('"')
        .to_string()
}

/// Resolve a normalized label to an absolute path under `store_dir`.
pub fn label_to_path(label: &str, store_dir: &Path) -> PathBuf {
    let path = Path::new(label);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        store_dir.join(path)
    }
}
