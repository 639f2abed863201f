//! Error types for rmsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use rmsync_device::DeviceError;

/// All errors that can end a reconciliation pass.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Every pattern matched nothing. Running on would delete every local file.
    #[error("nothing to search for")]
    NothingSelected { unmatched: Vec<String> },

    /// Transport or directory-creation failure while fetching.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// The local tree could not be walked completely.
    #[error("failed to scan local files under {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
