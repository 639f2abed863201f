//! Download-or-skip decisions for the selected documents.
//!
//! For each non-folder document, in selection order:
//!
//! 1. Compute `<root>/<logical name>.pdf`. Names that would leave the root
//!    are skipped with a warning.
//! 2. Take the local entry for the logical name out of the snapshot. With
//!    overwrite protection on, its `"<name> (N)"` copies are taken too and
//!    the newest of them stands for the document.
//! 3. Download if there was no entry or the remote copy is strictly newer.
//!    A protected download goes to the next free `"<name> (N).pdf"`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rmsync_core::{DocumentId, LogicalName, RemoteDocument, SyncOptions};

use crate::naming::{managed_path, safe_filename};
use crate::snapshot::{LocalEntry, LocalSnapshot};
use crate::{Fetcher, SyncError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Local copy is at least as new as the tablet's.
    UpToDate,
    /// Stale or missing, but downloads are switched off.
    DownloadsDisabled,
}

/// What the reconciler did with one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentAction {
    Downloaded { id: DocumentId, path: PathBuf },
    /// Dry run: the document *would* have been downloaded.
    WouldDownload { id: DocumentId, path: PathBuf },
    Skipped {
        id: DocumentId,
        path: PathBuf,
        reason: SkipReason,
    },
}

impl DocumentAction {
    pub fn path(&self) -> &Path {
        match self {
            DocumentAction::Downloaded { path, .. }
            | DocumentAction::WouldDownload { path, .. }
            | DocumentAction::Skipped { path, .. } => path,
        }
    }
}

/// `true` if there is no local copy or the remote one is strictly newer.
pub fn needs_download(remote: &RemoteDocument, local: Option<&LocalEntry>) -> bool {
    match local {
        None => true,
        Some(entry) => remote.modified_at > entry.modified_at,
    }
}

/// Reconcile `documents` against `local`, fetching stale or missing ones.
///
/// Every evaluated document's entries are removed from `local`, downloaded or
/// not. Folders and names that would escape `root` are skipped without
/// touching the snapshot. The first fetch error aborts the pass.
pub fn reconcile(
    documents: &[&RemoteDocument],
    local: &mut LocalSnapshot,
    root: &Path,
    options: &SyncOptions,
    fetcher: &mut dyn Fetcher,
) -> Result<Vec<DocumentAction>, SyncError> {
    let remote_names: HashSet<&LogicalName> = documents
        .iter()
        .filter(|doc| !doc.is_folder)
        .map(|doc| &doc.logical_name)
        .collect();
    let mut actions = Vec::new();

    for doc in documents.iter().filter(|doc| !doc.is_folder) {
        let Some(canonical) = managed_path(root, &doc.logical_name) else {
            tracing::warn!(
                "skipping '{}': name is not a plain path under {}",
                doc.logical_name,
                root.display()
            );
            continue;
        };

        let existing = claim(local, &doc.logical_name, &remote_names, options);
        let id = doc.id.clone();

        let action = if !needs_download(doc, existing.as_ref()) {
            tracing::debug!("skipping '{}' (up to date)", canonical.display());
            DocumentAction::Skipped {
                id,
                path: canonical,
                reason: SkipReason::UpToDate,
            }
        } else if !options.download_enabled {
            tracing::debug!("skipping '{}' (downloads disabled)", canonical.display());
            DocumentAction::Skipped {
                id,
                path: canonical,
                reason: SkipReason::DownloadsDisabled,
            }
        } else {
            let target = if options.overwrite_protection {
                safe_filename(&canonical)
            } else {
                canonical.clone()
            };
            if options.dry_run {
                tracing::info!("[dry-run] would download '{}'", target.display());
                DocumentAction::WouldDownload { id, path: target }
            } else {
                if target != canonical {
                    tracing::warn!(
                        "'{}' exists, writing newer copy to '{}'",
                        canonical.display(),
                        target.display()
                    );
                }
                fetcher.fetch(&id, &target)?;
                DocumentAction::Downloaded { id, path: target }
            }
        };
        actions.push(action);
    }

    Ok(actions)
}

/// Take every local entry that belongs to `name` and return the newest.
///
/// Protected copies are only claimed when protection is on; otherwise they
/// stay in the snapshot and are removed as orphans.
fn claim(
    local: &mut LocalSnapshot,
    name: &LogicalName,
    remote_names: &HashSet<&LogicalName>,
    options: &SyncOptions,
) -> Option<LocalEntry> {
    let existing = local.take(name);
    if !options.overwrite_protection {
        return existing;
    }
    local
        .take_protected_copies(name, remote_names)
        .into_iter()
        .chain(existing)
        .max_by_key(|entry| entry.modified_at)
}
