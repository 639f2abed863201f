//! Resolve user patterns into the set of documents a run acts on.

use std::collections::BTreeSet;

use rmsync_core::{DescriptorSet, DocumentId, RemoteDocument};

use crate::matcher::{fold_pattern, Matcher};
use crate::SyncError;

/// Ids chosen for one run, plus the patterns that contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    ids: BTreeSet<DocumentId>,
    pub unmatched: Vec<String>,
}

impl Selection {
    pub fn ids(&self) -> &BTreeSet<DocumentId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected descriptors in processing order: by logical name, ties kept
    /// in id order.
    pub fn ordered<'a>(&self, files: &'a DescriptorSet) -> Vec<&'a RemoteDocument> {
        let mut docs: Vec<&RemoteDocument> =
            self.ids.iter().filter_map(|id| files.get(id)).collect();
        docs.sort_by(|a, b| a.logical_name.cmp(&b.logical_name));
        docs
    }
}

/// Build the selection for `patterns`.
///
/// No patterns selects every id. Otherwise the result is the union of each
/// folded pattern's matches; a pattern matching nothing is recorded in
/// [`Selection::unmatched`]. An empty result is
/// [`SyncError::NothingSelected`].
pub fn select(
    files: &DescriptorSet,
    patterns: &[String],
    matcher: &dyn Matcher,
) -> Result<Selection, SyncError> {
    let mut selection = Selection::default();

    if patterns.is_empty() {
        tracing::debug!("no patterns, including all documents");
        selection.ids.extend(files.keys().cloned());
    } else {
        for pattern in patterns {
            let matched = matcher.match_files(files, &fold_pattern(pattern));
            if matched.is_empty() {
                tracing::debug!("no matching items found for '{pattern}'");
                selection.unmatched.push(pattern.clone());
                continue;
            }
            selection.ids.extend(matched);
        }
    }

    if selection.is_empty() {
        return Err(SyncError::NothingSelected {
            unmatched: selection.unmatched,
        });
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::SubstringMatcher;
    use crate::testing::descriptors;

    fn files() -> DescriptorSet {
        descriptors(&[
            ("f1", "Work", true, 1),
            ("d1", "Work/Plan", false, 1),
            ("d2", "Home/Groceries", false, 1),
            ("d3", "Todo", false, 1),
        ])
    }

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_patterns_selects_everything() {
        let files = files();
        let selection = select(&files, &[], &SubstringMatcher).expect("select");
        assert_eq!(selection.len(), files.len());
        assert!(selection.unmatched.is_empty());
    }

    #[test]
    fn patterns_union_their_matches() {
        let selection =
            select(&files(), &patterns(&["plan", "TODO"]), &SubstringMatcher).expect("select");
        let ids: Vec<_> = selection.ids().iter().map(|id| id.0.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d3"]);
    }

    #[test]
    fn overlapping_patterns_do_not_duplicate() {
        let selection =
            select(&files(), &patterns(&["work", "plan"]), &SubstringMatcher).expect("select");
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn unmatched_pattern_is_reported_not_fatal() {
        let selection =
            select(&files(), &patterns(&["nothing-here", "todo"]), &SubstringMatcher)
                .expect("select");
        assert_eq!(selection.unmatched, vec!["nothing-here".to_string()]);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn all_patterns_unmatched_is_fatal() {
        let err = select(&files(), &patterns(&["x", "y"]), &SubstringMatcher).unwrap_err();
        match &err {
            SyncError::NothingSelected { unmatched } => {
                assert_eq!(unmatched, &patterns(&["x", "y"]));
            }
            other => panic!("expected NothingSelected, got {other:?}"),
        }
        assert_eq!(err.to_string(), "nothing to search for");
    }

    #[test]
    fn empty_device_is_fatal_even_without_patterns() {
        let err = select(&DescriptorSet::new(), &[], &SubstringMatcher).unwrap_err();
        assert!(matches!(err, SyncError::NothingSelected { .. }));
    }

    #[test]
    fn ordered_sorts_by_logical_name() {
        let files = files();
        let selection = select(&files, &[], &SubstringMatcher).expect("select");
        let names: Vec<_> = selection
            .ordered(&files)
            .iter()
            .map(|d| d.logical_name.0.as_str())
            .collect();
        assert_eq!(names, vec!["Home/Groceries", "Todo", "Work", "Work/Plan"]);
    }

    #[test]
    fn ordered_breaks_name_ties_by_id() {
        let files = descriptors(&[("b", "Same", false, 1), ("a", "Same", false, 1)]);
        let selection = select(&files, &[], &SubstringMatcher).expect("select");
        let ids: Vec<_> = selection.ordered(&files).iter().map(|d| d.id.0.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
