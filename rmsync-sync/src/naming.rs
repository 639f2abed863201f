//! Destination paths for managed files: confinement to the sync root and
//! collision-avoiding names for overwrite protection.

use std::path::{Component, Path, PathBuf};

use rmsync_core::LogicalName;

/// `<root>/<name>.pdf`, or `None` if `name` could leave `root`.
///
/// Only plain path segments are accepted: no leading `/`, no drive prefix,
/// no `.` or `..`.
pub fn managed_path(root: &Path, name: &LogicalName) -> Option<PathBuf> {
    let plain = Path::new(name.as_str())
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !plain || name.as_str().is_empty() {
        return None;
    }
    Some(root.join(name.managed_file_name()))
}

/// `path` itself if free, else the first free `"<stem> (N).<ext>"` sibling.
pub fn safe_filename(path: &Path) -> PathBuf {
    if !occupied(path) {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());

    let mut n: u32 = 0;
    loop {
        n += 1;
        let name = match &ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = path.with_file_name(name);
        if !occupied(&candidate) {
            return candidate;
        }
    }
}

// Dangling symlinks count as taken.
fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
