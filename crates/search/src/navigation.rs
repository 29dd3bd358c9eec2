//! Moving the host selection between search results.
//!
//! The cursor is re-read from the document on every call, so navigation
//! follows the user when they move the caret by hand.

use crate::host::HostDocument;
use crate::results::SearchResults;

/// Selects the first result starting after the cursor, wrapping to the first
/// result. Returns the selected index.
pub fn select_next<D>(document: &mut D, results: &SearchResults) -> Option<usize>
where
    D: HostDocument + ?Sized,
{
    if results.is_empty() {
        return None;
    }
    let cursor = document.selection().start;
    let index = results.first_after(cursor).unwrap_or(0);
    select_by_index(document, results, index)
}

/// Selects the last result starting before the cursor, wrapping to the last
/// result.
pub fn select_previous<D>(document: &mut D, results: &SearchResults) -> Option<usize>
where
    D: HostDocument + ?Sized,
{
    if results.is_empty() {
        return None;
    }
    let cursor = document.selection().start;
    let index = results
        .last_before(cursor)
        .unwrap_or(results.count() - 1);
    select_by_index(document, results, index)
}

pub fn select_by_index<D>(document: &mut D, results: &SearchResults, index: usize) -> Option<usize>
where
    D: HostDocument + ?Sized,
{
    let result = results.get(index)?;
    document.set_selection(result.range);
    log::debug!(
        "selected result {} of {} at {}..{}",
        index + 1,
        results.count(),
        result.range.start,
        result.range.end
    );
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{SearchEngine, SearchQuery};
    use crate::host::TextRange;
    use crate::memory::MemoryDocument;

    fn setup(text: &str, query: &str) -> (MemoryDocument, SearchResults) {
        let doc = MemoryDocument::new(text);
        let results = SearchEngine::default()
            .search(&doc, &SearchQuery::new(query))
            .unwrap();
        (doc, results)
    }

    #[test]
    fn next_walks_forward_and_wraps() {
        let (mut doc, results) = setup("cat dog cat dog cat", "cat");
        doc.set_selection(TextRange::empty(1));
        assert_eq!(select_next(&mut doc, &results), Some(1));
        assert_eq!(doc.selection(), TextRange::new(8, 11));
        assert_eq!(select_next(&mut doc, &results), Some(2));
        assert_eq!(select_next(&mut doc, &results), Some(0));
        assert_eq!(doc.selection(), TextRange::new(0, 3));
    }

    #[test]
    fn previous_walks_backward_and_wraps() {
        let (mut doc, results) = setup("cat dog cat dog cat", "cat");
        doc.set_selection(TextRange::new(8, 11));
        assert_eq!(select_previous(&mut doc, &results), Some(0));
        assert_eq!(select_previous(&mut doc, &results), Some(2));
        assert_eq!(doc.selection(), TextRange::new(16, 19));
    }

    #[test]
    fn navigation_follows_manual_cursor_moves() {
        let (mut doc, results) = setup("cat dog cat dog cat", "cat");
        assert_eq!(select_next(&mut doc, &results), Some(1));
        doc.set_selection(TextRange::empty(12));
        assert_eq!(select_next(&mut doc, &results), Some(2));
        doc.set_selection(TextRange::empty(12));
        assert_eq!(select_previous(&mut doc, &results), Some(1));
    }

    #[test]
    fn empty_results_leave_selection_alone() {
        let (mut doc, results) = setup("dog", "cat");
        doc.set_selection(TextRange::new(0, 2));
        assert_eq!(select_next(&mut doc, &results), None);
        assert_eq!(select_previous(&mut doc, &results), None);
        assert_eq!(doc.selection(), TextRange::new(0, 2));
    }

    #[test]
    fn select_by_index_checks_bounds() {
        let (mut doc, results) = setup("cat dog cat", "cat");
        assert_eq!(select_by_index(&mut doc, &results, 1), Some(1));
        assert_eq!(doc.selection(), TextRange::new(8, 11));
        assert_eq!(select_by_index(&mut doc, &results, 5), None);
        assert_eq!(doc.selection(), TextRange::new(8, 11));
    }
}
