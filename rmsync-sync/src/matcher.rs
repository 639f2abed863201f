//! Pattern matching of logical names.
//!
//! Patterns arrive already case-folded (see [`fold_pattern`]); matchers only
//! fold the candidate name.

use rmsync_core::{DescriptorSet, DocumentId};

/// Decides whether a logical name is covered by a pattern.
pub trait Matcher {
    fn matches(&self, logical_name: &str, folded_pattern: &str) -> bool;

    /// Ids of every descriptor (documents and folders) whose logical name
    /// matches, sorted by id.
    fn match_files(&self, files: &DescriptorSet, folded_pattern: &str) -> Vec<DocumentId> {
        let mut ids: Vec<DocumentId> = files
            .values()
            .filter(|doc| self.matches(doc.logical_name.as_str(), folded_pattern))
            .map(|doc| doc.id.clone())
            .collect();
        ids.sort();
        ids
    }
}

/// Case-insensitive substring match anywhere in the full logical name, so a
/// folder name also selects everything beneath it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl Matcher for SubstringMatcher {
    fn matches(&self, logical_name: &str, folded_pattern: &str) -> bool {
        logical_name.to_lowercase().contains(folded_pattern)
    }
}

/// Case-fold a user-supplied pattern.
pub fn fold_pattern(pattern: &str) -> String {
    pattern.to_lowercase()
}
