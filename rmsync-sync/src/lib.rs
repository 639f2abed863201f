//! # rmsync-sync
//!
//! Reconciliation engine: mirrors the tablet's documents into a local
//! directory of PDFs.
//!
//! Call [`pipeline::run`] with a [`rmsync_core::DescriptorSet`] from the
//! device, a [`Matcher`] and a [`Fetcher`]. The individual stages are public
//! for callers that need only part of a pass.

pub mod error;
pub mod fetch;
pub mod matcher;
pub mod naming;
pub mod orphan;
pub mod pipeline;
pub mod prune;
pub mod reconcile;
pub mod selector;
pub mod snapshot;

#[cfg(test)]
mod testing;

pub use error::SyncError;
pub use fetch::Fetcher;
pub use matcher::{Matcher, SubstringMatcher};
pub use orphan::OrphanResult;
pub use pipeline::{run, SyncReport, SyncRequest};
pub use reconcile::{DocumentAction, SkipReason};
pub use selector::Selection;
pub use snapshot::{LocalEntry, LocalSnapshot};
