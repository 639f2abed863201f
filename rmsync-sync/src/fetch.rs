//! Fetcher seam between the reconciler and the transport.

use std::path::Path;

use rmsync_core::DocumentId;
use rmsync_device::DeviceClient;

use crate::SyncError;

/// Retrieves one document into `dest`, creating parent directories.
///
/// Any error is fatal to the run.
pub trait Fetcher {
    fn fetch(&mut self, id: &DocumentId, dest: &Path) -> Result<(), SyncError>;
}

impl Fetcher for DeviceClient {
    fn fetch(&mut self, id: &DocumentId, dest: &Path) -> Result<(), SyncError> {
        self.download(id, dest)?;
        Ok(())
    }
}
