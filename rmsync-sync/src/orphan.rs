//! Deletion of local files that no remote document accounted for.

use std::path::PathBuf;

use crate::snapshot::LocalSnapshot;

/// Outcome of one orphan deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrphanResult {
    Removed { path: PathBuf },
    /// Dry run: the file *would* have been deleted.
    WouldRemove { path: PathBuf },
    /// Deletion failed; the remaining orphans were still processed.
    Failed { path: PathBuf, error: String },
}

/// Delete every entry left in `remaining`, in logical-name order.
///
/// Deletions are independent: a failure is logged and recorded, never fatal.
pub fn remove_orphans(remaining: LocalSnapshot, dry_run: bool) -> Vec<OrphanResult> {
    remaining
        .into_entries()
        .into_iter()
        .map(|entry| {
            let path = entry.full_path;
            if dry_run {
                tracing::info!("[dry-run] would delete local file '{}'", path.display());
                return OrphanResult::WouldRemove { path };
            }
            tracing::info!("deleting local file '{}'", path.display());
            match std::fs::remove_file(&path) {
                Ok(()) => OrphanResult::Removed { path },
                Err(err) => {
                    tracing::warn!(error = %err, "error deleting local file '{}'", path.display());
                    OrphanResult::Failed {
                        path,
                        error: err.to_string(),
                    }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use rmsync_core::LogicalName;
    use tempfile::TempDir;

    use crate::snapshot::LocalEntry;
    use crate::testing::{day, local_file};

    #[test]
    fn removes_every_remaining_entry() {
        let root = TempDir::new().unwrap();
        let a = local_file(root.path(), "A.pdf", day(1));
        let b = local_file(root.path(), "Work/B.pdf", day(1));
        let snapshot = LocalSnapshot::scan(root.path()).unwrap();

        let results = remove_orphans(snapshot, false);

        assert_eq!(
            results,
            vec![
                OrphanResult::Removed { path: a.clone() },
                OrphanResult::Removed { path: b.clone() },
            ]
        );
        assert!(!a.exists() && !b.exists());
    }

    #[test]
    fn failure_does_not_stop_later_deletions() {
        let root = TempDir::new().unwrap();
        let b = local_file(root.path(), "B.pdf", day(1));
        let mut snapshot = LocalSnapshot::scan(root.path()).unwrap();
        snapshot.insert(LocalEntry {
            logical_name: LogicalName::from("A"),
            full_path: root.path().join("gone.pdf"),
            modified_at: day(1),
        });

        let results = remove_orphans(snapshot, false);

        assert!(matches!(results[0], OrphanResult::Failed { .. }));
        assert_eq!(results[1], OrphanResult::Removed { path: b.clone() });
        assert!(!b.exists());
    }

    #[test]
    fn dry_run_keeps_files() {
        let root = TempDir::new().unwrap();
        let a = local_file(root.path(), "A.pdf", day(1));
        let snapshot = LocalSnapshot::scan(root.path()).unwrap();

        let results = remove_orphans(snapshot, true);

        assert_eq!(results, vec![OrphanResult::WouldRemove { path: a.clone() }]);
        assert_eq!(fs::read_to_string(&a).unwrap(), "local");
    }
}
