//! Error types for rmsync-device.

use std::path::PathBuf;

use thiserror::Error;

/// Error surface for enumeration and download.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Connection refused, timeout, DNS failure or non-2xx response.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The listing body was not the expected JSON shape.
    #[error("malformed listing from {url}: {source}")]
    Listing {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// Local I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A path component that must be a directory exists as something else.
    #[error("'{path}' exists and is not a directory")]
    NotADirectory { path: PathBuf },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DeviceError {
    DeviceError::Io {
        path: path.into(),
        source,
    }
}

pub(crate) fn http_err(url: &str, source: ureq::Error) -> DeviceError {
    DeviceError::Http {
        url: url.to_string(),
        source: Box::new(source),
    }
}
