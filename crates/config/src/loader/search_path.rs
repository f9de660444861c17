//! Normalization of the module search path list (`NODE_PATH`).
//!
//! Only relative entries survive, resolved against the application directory.

use std::path::{Component, Path, PathBuf};

use crate::constants::PATH_LIST_DELIMITER;

/// Drop empty and absolute entries, resolve the rest against `app_dir`.
pub(crate) fn normalize_search_path(value: &str, app_dir: &Path) -> String {
    value
        .split(PATH_LIST_DELIMITER)
        .filter(|entry| !entry.is_empty() && !Path::new(entry).is_absolute())
        .map(|entry| resolve_lexically(app_dir, entry).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(&PATH_LIST_DELIMITER.to_string())
}

/// Join `relative` onto `base` and fold `.` and `..` without touching the filesystem.
fn resolve_lexically(base: &Path, relative: &str) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in base.join(relative).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` refuses to go above the root.
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    resolved
}
