//! Shared fixtures for unit tests.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use filetime::{set_file_mtime, FileTime};

use rmsync_core::{DescriptorSet, DocumentId, LogicalName, RemoteDocument};

use crate::{Fetcher, SyncError};

/// Midnight UTC on 2024-01-`day`.
pub fn day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
}

/// `(id, logical name, is_folder, modified day)` rows into a descriptor set.
pub fn descriptors(rows: &[(&str, &str, bool, u32)]) -> DescriptorSet {
    rows.iter()
        .map(|(id, name, is_folder, modified)| {
            let doc = RemoteDocument {
                id: DocumentId::from(*id),
                logical_name: LogicalName::from(*name),
                is_folder: *is_folder,
                modified_at: day(*modified),
            };
            (doc.id.clone(), doc)
        })
        .collect()
}

/// Write `<root>/<relative>` with its mtime pinned to `modified`.
pub fn local_file(root: &Path, relative: &str, modified: DateTime<Utc>) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "local").unwrap();
    set_file_mtime(&path, FileTime::from_unix_time(modified.timestamp(), 0)).unwrap();
    path
}

/// Writes a marker body and records every call.
#[derive(Debug, Default)]
pub struct RecordingFetcher {
    pub calls: Vec<(DocumentId, PathBuf)>,
}

impl Fetcher for RecordingFetcher {
    fn fetch(&mut self, id: &DocumentId, dest: &Path) -> Result<(), SyncError> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(dest, format!("remote {id}")).unwrap();
        self.calls.push((id.clone(), dest.to_path_buf()));
        Ok(())
    }
}
