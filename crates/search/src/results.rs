use serde::Serialize;

use crate::host::TextRange;
use crate::text::{char_len, collapse_whitespace};

const ELLIPSIS: char = '\u{2026}';

/// Text around a match, cut from the document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Snippet {
    pub before: String,
    pub matched: String,
    pub after: String,
    /// Set when `before` does not reach the document start.
    pub clipped_before: bool,
    /// Set when `after` does not reach the document end.
    pub clipped_after: bool,
}

impl Snippet {
    pub fn text(&self) -> String {
        format!("{}{}{}", self.before, self.matched, self.after)
    }

    /// Character range of the match inside [`Snippet::text`].
    pub fn highlight(&self) -> TextRange {
        let start = char_len(&self.before);
        TextRange::new(start, start + char_len(&self.matched))
    }

    /// Single-line preview with whitespace runs in the context collapsed.
    pub fn preview(&self) -> String {
        let mut preview = String::new();
        if self.clipped_before {
            preview.push(ELLIPSIS);
        }
        preview.push_str(&collapse_whitespace(&self.before));
        preview.push_str(&self.matched);
        preview.push_str(&collapse_whitespace(&self.after));
        if self.clipped_after {
            preview.push(ELLIPSIS);
        }
        preview
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub range: TextRange,
    pub snippet: Snippet,
    pub page: usize,
    pub line: usize,
}

/// Accepted matches of one search, ordered by start offset.
///
/// Offsets refer to the document as it was when the search ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    results: Vec<SearchResult>,
    scope: TextRange,
}

impl SearchResults {
    pub fn new(mut results: Vec<SearchResult>, scope: TextRange) -> Self {
        results.sort_by_key(|result| result.range.start);
        Self { results, scope }
    }

    pub fn count(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SearchResult> {
        self.results.get(index)
    }

    pub fn as_slice(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchResult> {
        self.results.iter()
    }

    pub fn scope(&self) -> TextRange {
        self.scope
    }

    /// Index of the first result starting strictly after `offset`.
    pub fn first_after(&self, offset: usize) -> Option<usize> {
        let index = self
            .results
            .partition_point(|result| result.range.start <= offset);
        (index < self.results.len()).then_some(index)
    }

    /// Index of the last result starting strictly before `offset`.
    pub fn last_before(&self, offset: usize) -> Option<usize> {
        let index = self
            .results
            .partition_point(|result| result.range.start < offset);
        index.checked_sub(1)
    }
}
