//! Depth-first removal of directories left empty under the sync root.

use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

/// Remove every empty directory beneath `root`, children before parents.
///
/// The root itself is scanned but never removed. Returns the removed
/// directories in removal order. The first read or remove error aborts the
/// prune; directories already removed stay removed.
pub fn prune_empty_dirs(root: &Path) -> Result<Vec<PathBuf>, SyncError> {
    let mut removed = Vec::new();
    prune_dir(root, false, &mut removed)?;
    Ok(removed)
}

fn prune_dir(dir: &Path, remove_self: bool, removed: &mut Vec<PathBuf>) -> Result<(), SyncError> {
    let mut children: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        // Symlinks to directories are not followed.
        let file_type = entry.file_type().map_err(|e| io_err(entry.path(), e))?;
        if file_type.is_dir() {
            children.push(entry.path());
        }
    }
    children.sort();

    for child in &children {
        prune_dir(child, true, removed)?;
    }

    if remove_self && is_empty_dir(dir)? {
        std::fs::remove_dir(dir).map_err(|e| io_err(dir, e))?;
        tracing::info!("removed empty directory '{}'", dir.display());
        removed.push(dir.to_path_buf());
    }
    Ok(())
}

fn is_empty_dir(dir: &Path) -> Result<bool, SyncError> {
    let mut entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    Ok(entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn removes_nested_empty_dirs_children_first() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("a/b/c")).unwrap();

        let removed = prune_empty_dirs(root.path()).unwrap();

        assert_eq!(
            removed,
            vec![
                root.path().join("a/b/c"),
                root.path().join("a/b"),
                root.path().join("a"),
            ]
        );
        assert!(root.path().exists(), "root must never be removed");
    }

    #[test]
    fn keeps_directories_with_files() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("keep/empty")).unwrap();
        fs::write(root.path().join("keep/file.txt"), "x").unwrap();

        let removed = prune_empty_dirs(root.path()).unwrap();

        assert_eq!(removed, vec![root.path().join("keep/empty")]);
        assert!(root.path().join("keep/file.txt").exists());
    }

    #[test]
    fn empty_root_is_kept() {
        let root = TempDir::new().unwrap();
        assert!(prune_empty_dirs(root.path()).unwrap().is_empty());
        assert!(root.path().exists());
    }

    #[test]
    fn second_run_changes_nothing() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("x/y")).unwrap();
        fs::create_dir_all(root.path().join("z")).unwrap();
        fs::write(root.path().join("z/keep.pdf"), "x").unwrap();

        assert_eq!(prune_empty_dirs(root.path()).unwrap().len(), 2);
        assert!(prune_empty_dirs(root.path()).unwrap().is_empty());
        assert!(root.path().join("z/keep.pdf").exists());
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = TempDir::new().unwrap();
        let err = prune_empty_dirs(&root.path().join("missing")).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
    }
}
