//! Blocking `ureq` client for the tablet web interface.
//!
//! Endpoints:
//!
//! ```text
//! POST /documents/              root listing (JSON array)
//! POST /documents/<folder-id>   folder listing
//! GET  /download/<id>/placeholder   rendered PDF
//! ```

use std::path::Path;
use std::time::Duration;

use rmsync_core::{config::DEFAULT_HOST, DescriptorSet, DocumentId};

use crate::error::{http_err, DeviceError};
use crate::listing::{collect_tree, RawEntry};
use crate::transfer;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(300);

/// Where and how to reach the tablet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSettings {
    /// `host[:port]`, optionally with an `http://` prefix.
    pub host: String,
    pub connect_timeout: Duration,
    /// Rendering large notebooks on the device is slow.
    pub read_timeout: Duration,
}

impl DeviceSettings {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

/// Unauthenticated client; one instance per run.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    agent: ureq::Agent,
    base_url: String,
}

impl DeviceClient {
    pub fn new(settings: &DeviceSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(settings.connect_timeout)
            .timeout_read(settings.read_timeout)
            .build();
        Self {
            agent,
            base_url: base_url(&settings.host),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Enumerate every document and folder on the tablet.
    pub fn read_files(&self) -> Result<DescriptorSet, DeviceError> {
        collect_tree(|folder| self.list_folder(folder))
    }

    /// Download the PDF rendering of `id` into `dest`.
    ///
    /// Creates missing parent directories; returns the byte count.
    pub fn download(&self, id: &DocumentId, dest: &Path) -> Result<u64, DeviceError> {
        let url = format!("{}/download/{}/placeholder", self.base_url, id.0);
        tracing::info!("downloading '{}'", dest.display());

        let response = self.agent.get(&url).call().map_err(|e| http_err(&url, e))?;
        let mut body = response.into_reader();
        let written = transfer::write_stream(&mut body, dest)?;

        tracing::debug!(bytes = written, "wrote {}", dest.display());
        Ok(written)
    }

    fn list_folder(&self, folder: Option<&DocumentId>) -> Result<Vec<RawEntry>, DeviceError> {
        let url = match folder {
            Some(id) => format!("{}/documents/{}", self.base_url, id.0),
            None => format!("{}/documents/", self.base_url),
        };
        tracing::debug!("listing {url}");

        let response = self.agent.post(&url).call().map_err(|e| http_err(&url, e))?;
        response
            .into_json::<Vec<RawEntry>>()
            .map_err(|source| DeviceError::Listing { url, source })
    }
}

fn base_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_http_scheme() {
        assert_eq!(base_url("10.11.99.1"), "http://10.11.99.1");
        assert_eq!(base_url("tablet.local:8080/"), "http://tablet.local:8080");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        assert_eq!(base_url("http://127.0.0.1:9000"), "http://127.0.0.1:9000");
    }

    #[test]
    fn default_settings_target_usb_address() {
        let settings = DeviceSettings::default();
        assert_eq!(settings.host, "10.11.99.1");
        assert_eq!(settings.read_timeout, DEFAULT_READ_TIMEOUT);
    }
}
