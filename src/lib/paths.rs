//! Shared helpers reused across modules (e.g., path validation).

use std::path::{Path, PathBuf};

/// Returns true if the path is non-empty and relative.
pub fn is_nonempty_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_relative()
}

/// Return the first `names` entry that exists as a directory under `root`.
pub fn first_existing_dir(root: &Path, names: &[String]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.is_dir())
}
