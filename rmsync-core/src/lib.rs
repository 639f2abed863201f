//! rmsync core library: domain types, config persistence, errors.
//!
//! - [`types`]: newtypes, remote descriptors, run options
//! - [`error`]: [`ConfigError`]
//! - [`config`]: load / save / init of `~/.rmsync/config.yaml`

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{
    DescriptorSet, DocumentId, LogicalName, RemoteDocument, SyncOptions, MANAGED_SUFFIX,
};
