//! Document tree enumeration.
//!
//! The tablet lists one folder per request. [`collect_tree`] walks folders
//! depth-first and flattens them into a [`DescriptorSet`] whose logical names
//! carry the full folder path.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use rmsync_core::{DescriptorSet, DocumentId, LogicalName, RemoteDocument};

use crate::error::DeviceError;

const FOLDER_TYPE: &str = "CollectionType";

/// One entry of a `/documents/` response. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    #[serde(rename = "ID")]
    pub id: String,
    // The device API spells it this way.
    #[serde(rename = "VissibleName")]
    pub visible_name: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "ModifiedClient")]
    pub modified_client: DateTime<Utc>,
}

impl RawEntry {
    pub fn is_folder(&self) -> bool {
        self.kind == FOLDER_TYPE
    }
}

/// Walk the tree starting at the root listing.
///
/// `list_folder(None)` must return the root entries and
/// `list_folder(Some(id))` the children of folder `id`.
pub fn collect_tree<F>(mut list_folder: F) -> Result<DescriptorSet, DeviceError>
where
    F: FnMut(Option<&DocumentId>) -> Result<Vec<RawEntry>, DeviceError>,
{
    let mut files = DescriptorSet::new();
    let mut pending: Vec<(Option<DocumentId>, String)> = vec![(None, String::new())];

    while let Some((folder, prefix)) = pending.pop() {
        for entry in list_folder(folder.as_ref())? {
            let logical_name = if prefix.is_empty() {
                entry.visible_name.clone()
            } else {
                format!("{prefix}/{}", entry.visible_name)
            };
            let id = DocumentId::from(entry.id.clone());

            // A folder listed twice would loop forever.
            if files.contains_key(&id) {
                tracing::warn!(id = %id, "duplicate entry in device listing, ignoring");
                continue;
            }
            if entry.is_folder() {
                pending.push((Some(id.clone()), logical_name.clone()));
            }
            files.insert(
                id.clone(),
                RemoteDocument {
                    id,
                    logical_name: LogicalName::from(logical_name),
                    is_folder: entry.is_folder(),
                    modified_at: entry.modified_client,
                },
            );
        }
    }

    tracing::debug!(count = files.len(), "enumerated device documents");
    Ok(files)
}
