//! Domain types shared by the device client and the reconciliation engine.
//!
//! A [`RemoteDocument`] is the tablet's view of one document or folder; a
//! [`DescriptorSet`] is the full snapshot returned by one enumeration.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Suffix of the managed file type. Local files without it are ignored.
pub const MANAGED_SUFFIX: &str = ".pdf";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Opaque, stable identifier the tablet assigns to a document or folder.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Hierarchical `/`-separated display name, e.g. `Work/Meetings/2024-01`.
///
/// This is the only key joining remote documents to local files.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LogicalName(pub String);

impl LogicalName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative file name of the managed copy: `<logical name>.pdf`.
    pub fn managed_file_name(&self) -> String {
        format!("{}{MANAGED_SUFFIX}", self.0)
    }
}

impl fmt::Display for LogicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for LogicalName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LogicalName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Remote descriptors
// ---------------------------------------------------------------------------

/// One entry of the tablet's document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDocument {
    pub id: DocumentId,
    pub logical_name: LogicalName,
    /// Folders are never downloaded.
    pub is_folder: bool,
    /// Client-side modification time reported by the tablet.
    pub modified_at: DateTime<Utc>,
}

/// Snapshot of every document and folder on the tablet, keyed by id.
pub type DescriptorSet = HashMap<DocumentId, RemoteDocument>;

// ---------------------------------------------------------------------------
// Run options
// ---------------------------------------------------------------------------

/// Per-run switches handed to each engine component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Write stale documents to a collision-free sibling instead of overwriting.
    pub overwrite_protection: bool,
    /// When false, documents are evaluated and accounted for but never fetched.
    pub download_enabled: bool,
    pub debug: bool,
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            overwrite_protection: true,
            download_enabled: true,
            debug: false,
            dry_run: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(DocumentId::from("0b1c").to_string(), "0b1c");
        assert_eq!(LogicalName::from("Work/Notes").to_string(), "Work/Notes");
    }

    #[test]
    fn managed_file_name_appends_suffix() {
        let name = LogicalName::from("Work/Notes");
        assert_eq!(name.managed_file_name(), "Work/Notes.pdf");
    }

    #[test]
    fn default_options_protect_and_download() {
        let opts = SyncOptions::default();
        assert!(opts.overwrite_protection);
        assert!(opts.download_enabled);
        assert!(!opts.dry_run);
    }
}
