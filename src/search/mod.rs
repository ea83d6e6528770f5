//! Search module for case-insensitive note filtering.

use crate::entity::Note;

/// Check whether `haystack` contains `query`, ignoring case.
///
/// An empty query matches everything. The query is not trimmed: a search for
/// `" "` only matches text containing a space.
pub fn matches_text(haystack: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&query.to_lowercase())
}

/// Return the ordered subsequence of `notes` whose title or body contains
/// `query`.
///
/// # Examples
///
/// ```ignore
/// let visible = filter_notes(store.notes(), "milk");
/// assert!(visible.iter().all(|n| n.matches("milk")));
/// ```
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    notes.iter().filter(|n| n.matches(query)).collect()
}
