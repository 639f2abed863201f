//! Local snapshot: every managed file under the sync root, keyed by logical
//! name.
//!
//! The snapshot is the run's working set. The reconciler [`take`]s each entry
//! it accounts for; whatever remains afterwards is an orphan.
//!
//! [`take`]: LocalSnapshot::take

use std::collections::{BTreeMap, HashSet};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use rmsync_core::{LogicalName, MANAGED_SUFFIX};

use crate::error::{io_err, SyncError};
use crate::matcher::{fold_pattern, Matcher};

/// One managed file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    pub logical_name: LogicalName,
    pub full_path: PathBuf,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalSnapshot {
    entries: BTreeMap<LogicalName, LocalEntry>,
}

impl LocalSnapshot {
    /// Walk `root` recursively and record every regular `.pdf` file.
    ///
    /// Any traversal error fails the whole scan; a partial snapshot would turn
    /// unreadable files into deletion candidates. A missing root is empty.
    pub fn scan(root: &Path) -> Result<Self, SyncError> {
        let mut snapshot = Self::default();
        match std::fs::metadata(root) {
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("sync root {} does not exist yet", root.display());
                return Ok(snapshot);
            }
            Err(err) => return Err(io_err(root, err)),
        }

        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|source| SyncError::Walk {
                root: root.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(logical_name) = logical_name_for(root, entry.path()) else {
                continue;
            };
            let metadata = entry.metadata().map_err(|source| SyncError::Walk {
                root: root.to_path_buf(),
                source,
            })?;
            let modified = metadata.modified().map_err(|e| io_err(entry.path(), e))?;

            snapshot.insert(LocalEntry {
                logical_name,
                full_path: entry.into_path(),
                modified_at: DateTime::<Utc>::from(modified),
            });
        }

        tracing::debug!(count = snapshot.len(), "scanned local files");
        Ok(snapshot)
    }

    pub fn insert(&mut self, entry: LocalEntry) {
        self.entries.insert(entry.logical_name.clone(), entry);
    }

    pub fn get(&self, name: &LogicalName) -> Option<&LocalEntry> {
        self.entries.get(name)
    }

    /// Remove and return the entry for `name`, marking it accounted for.
    pub fn take(&mut self, name: &LogicalName) -> Option<LocalEntry> {
        self.entries.remove(name)
    }

    /// Remove and return the overwrite-protection copies of `name`, i.e.
    /// entries named `"<name> (N)"`. Names in `keep` belong to other remote
    /// documents and are left alone.
    pub fn take_protected_copies(
        &mut self,
        name: &LogicalName,
        keep: &HashSet<&LogicalName>,
    ) -> Vec<LocalEntry> {
        let prefix = format!("{name} (");
        let copies: Vec<LogicalName> = self
            .entries
            .range(LogicalName::from(prefix.as_str())..)
            .map(|(key, _)| key)
            .take_while(|key| key.as_str().starts_with(&prefix))
            .filter(|key| is_copy_counter(&key.as_str()[prefix.len()..]))
            .filter(|key| !keep.contains(key))
            .cloned()
            .collect();
        copies
            .iter()
            .filter_map(|key| self.entries.remove(key))
            .collect()
    }

    /// Keep only entries whose logical name matches at least one pattern.
    ///
    /// Used for pattern-scoped runs so files outside every pattern can never
    /// become orphans.
    pub fn retain_matching(&mut self, patterns: &[String], matcher: &dyn Matcher) {
        let folded: Vec<String> = patterns.iter().map(|p| fold_pattern(p)).collect();
        self.entries
            .retain(|name, _| folded.iter().any(|p| matcher.matches(name.as_str(), p)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &LocalEntry> {
        self.entries.values()
    }

    /// Remaining entries in logical-name order.
    pub fn into_entries(self) -> Vec<LocalEntry> {
        self.entries.into_values().collect()
    }
}

// "3)" but not ")" or "x)".
fn is_copy_counter(rest: &str) -> bool {
    rest.strip_suffix(')')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Logical name of a managed file: path relative to `root`, `/`-separated,
/// suffix stripped. `None` for anything that is not a managed file under root.
pub fn logical_name_for(root: &Path, path: &Path) -> Option<LogicalName> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    let joined = parts.join("/");
    let name = joined.strip_suffix(MANAGED_SUFFIX)?;
    Some(LogicalName::from(name))
}
