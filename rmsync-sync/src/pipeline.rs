//! One full reconciliation pass.
//!
//! ```text
//! patterns ──► select ──► order by name
//!                              │
//! scan root ──► scope to patterns ──► reconcile ──► remove orphans ──► prune
//! ```
//!
//! Selection runs before anything touches the disk, so an empty selection
//! ends the run with zero downloads and zero deletions.

use std::path::{Path, PathBuf};

use rmsync_core::{DescriptorSet, SyncOptions};

use crate::matcher::Matcher;
use crate::orphan::{remove_orphans, OrphanResult};
use crate::prune::prune_empty_dirs;
use crate::reconcile::{reconcile, DocumentAction, SkipReason};
use crate::selector::select;
use crate::snapshot::LocalSnapshot;
use crate::{Fetcher, SyncError};

/// Inputs of one pass.
#[derive(Debug, Clone)]
pub struct SyncRequest<'a> {
    /// Directory mirroring the tablet's folder tree.
    pub root: &'a Path,
    /// Free-text patterns; empty means everything.
    pub patterns: &'a [String],
    pub options: SyncOptions,
}

/// Everything a pass did, for the caller to print.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub selected: usize,
    pub unmatched_patterns: Vec<String>,
    pub documents: Vec<DocumentAction>,
    pub orphans: Vec<OrphanResult>,
    pub pruned: Vec<PathBuf>,
    /// The prune stopped early; the pass itself still succeeded.
    pub prune_error: Option<String>,
}

impl SyncReport {
    pub fn downloaded(&self) -> usize {
        self.documents
            .iter()
            .filter(|a| {
                matches!(
                    a,
                    DocumentAction::Downloaded { .. } | DocumentAction::WouldDownload { .. }
                )
            })
            .count()
    }

    pub fn up_to_date(&self) -> usize {
        self.count_skipped(SkipReason::UpToDate)
    }

    pub fn not_downloaded(&self) -> usize {
        self.count_skipped(SkipReason::DownloadsDisabled)
    }

    pub fn removed(&self) -> usize {
        self.orphans
            .iter()
            .filter(|o| !matches!(o, OrphanResult::Failed { .. }))
            .count()
    }

    pub fn failed_removals(&self) -> Vec<&OrphanResult> {
        self.orphans
            .iter()
            .filter(|o| matches!(o, OrphanResult::Failed { .. }))
            .collect()
    }

    fn count_skipped(&self, wanted: SkipReason) -> usize {
        self.documents
            .iter()
            .filter(|a| matches!(a, DocumentAction::Skipped { reason, .. } if *reason == wanted))
            .count()
    }
}

/// Run selection, reconciliation, orphan removal and pruning in sequence.
///
/// Fatal: empty selection, local scan failure, any fetch failure. Orphan
/// deletion and prune failures are recorded in the report instead.
pub fn run(
    files: &DescriptorSet,
    request: &SyncRequest<'_>,
    matcher: &dyn Matcher,
    fetcher: &mut dyn Fetcher,
) -> Result<SyncReport, SyncError> {
    let selection = select(files, request.patterns, matcher)?;
    let documents = selection.ordered(files);

    let mut local = LocalSnapshot::scan(request.root)?;
    if !request.patterns.is_empty() {
        local.retain_matching(request.patterns, matcher);
    }

    let actions = reconcile(&documents, &mut local, request.root, &request.options, fetcher)?;
    let orphans = remove_orphans(local, request.options.dry_run);

    let (pruned, prune_error) = if request.options.dry_run {
        (Vec::new(), None)
    } else {
        match prune_empty_dirs(request.root) {
            Ok(pruned) => (pruned, None),
            Err(err) => {
                tracing::warn!(error = %err, "error deleting empty directories");
                (Vec::new(), Some(err.to_string()))
            }
        }
    };

    Ok(SyncReport {
        selected: selection.len(),
        unmatched_patterns: selection.unmatched,
        documents: actions,
        orphans,
        pruned,
        prune_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::matcher::SubstringMatcher;
    use crate::testing::{day, descriptors, local_file, RecordingFetcher};

    #[test]
    fn empty_selection_touches_nothing() {
        let root = TempDir::new().unwrap();
        let orphan = local_file(root.path(), "B.pdf", day(1));
        let files = descriptors(&[("a", "A", false, 2)]);
        let patterns = vec!["zzz".to_string()];
        let request = SyncRequest {
            root: root.path(),
            patterns: &patterns,
            options: SyncOptions::default(),
        };
        let mut fetcher = RecordingFetcher::default();

        let err = run(&files, &request, &SubstringMatcher, &mut fetcher).unwrap_err();

        assert!(matches!(err, SyncError::NothingSelected { .. }));
        assert!(fetcher.calls.is_empty());
        assert!(orphan.exists());
    }

    #[test]
    fn dry_run_reports_without_changes() {
        let root = TempDir::new().unwrap();
        let orphan = local_file(root.path(), "Old/B.pdf", day(1));
        let files = descriptors(&[("a", "A", false, 2)]);
        let request = SyncRequest {
            root: root.path(),
            patterns: &[],
            options: SyncOptions {
                dry_run: true,
                ..SyncOptions::default()
            },
        };
        let mut fetcher = RecordingFetcher::default();

        let report = run(&files, &request, &SubstringMatcher, &mut fetcher).unwrap();

        assert_eq!(report.downloaded(), 1);
        assert_eq!(report.orphans, vec![OrphanResult::WouldRemove { path: orphan.clone() }]);
        assert!(report.pruned.is_empty());
        assert!(fetcher.calls.is_empty());
        assert!(orphan.exists());
    }

    #[test]
    fn prune_failure_is_reported_not_fatal() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("never-created");
        let files = descriptors(&[("a", "A", false, 2)]);
        let request = SyncRequest {
            root: &missing,
            patterns: &[],
            options: SyncOptions {
                download_enabled: false,
                ..SyncOptions::default()
            },
        };
        let mut fetcher = RecordingFetcher::default();

        let report = run(&files, &request, &SubstringMatcher, &mut fetcher).unwrap();

        assert_eq!(report.not_downloaded(), 1);
        assert!(report.prune_error.is_some());
    }
}
