//! # rmsync-device
//!
//! Blocking HTTP client for the tablet's USB web interface.
//!
//! [`DeviceClient::read_files`] enumerates the whole document tree into a
//! [`rmsync_core::DescriptorSet`]; [`DeviceClient::download`] streams one
//! rendered PDF to disk, creating parent directories as needed.

mod error;
pub mod client;
pub mod listing;
pub mod transfer;

pub use client::{DeviceClient, DeviceSettings};
pub use error::DeviceError;
