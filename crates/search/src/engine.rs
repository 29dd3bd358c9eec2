use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::format::FormatPredicate;
use crate::host::{HostDocument, TextRange};
use crate::matcher::FormattingMatcher;
use crate::pattern::{CompiledPattern, PatternKind};
use crate::results::{SearchResult, SearchResults, Snippet};
use crate::scope::{ScanMode, resolve_document_scope};
use crate::text::CharIndex;

pub const DEFAULT_SNIPPET_RADIUS: usize = 60;
pub const DEFAULT_YIELD_INTERVAL: Duration = Duration::from_secs(1);

const FALLBACK_PAGE: usize = 1;
const FALLBACK_LINE: usize = 1;

/// Input of one search or replace invocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub text: String,
    pub mode: ScanMode,
    /// Maximum number of words allowed between consecutive terms.
    pub slop: usize,
    pub kind: PatternKind,
    pub case_sensitive: bool,
    pub format: FormatPredicate,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: PatternKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_slop(mut self, slop: usize) -> Self {
        self.slop = slop;
        self
    }

    pub fn with_format(mut self, format: FormatPredicate) -> Self {
        self.format = format;
        self
    }

    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    pub fn compile(&self) -> Result<CompiledPattern, SearchError> {
        CompiledPattern::compile(&self.text, self.kind, self.slop, self.case_sensitive)
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Characters of context fetched on each side of a match.
    pub snippet_radius: usize,
    /// How often a bulk replace hands control back to the host.
    pub yield_interval: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            snippet_radius: DEFAULT_SNIPPET_RADIUS,
            yield_interval: DEFAULT_YIELD_INTERVAL,
        }
    }
}

pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn search<D>(&self, document: &D, query: &SearchQuery) -> Result<SearchResults, SearchError>
    where
        D: HostDocument + ?Sized,
    {
        let pattern = query.compile()?;
        let scope = resolve_document_scope(document, query.mode);
        if scope.is_empty() {
            return Ok(SearchResults::new(Vec::new(), scope));
        }

        let text = document.text(scope)?;
        let index = CharIndex::new(&text);
        let matcher = FormattingMatcher::new(&query.format);
        let bounds = document.bounds();

        let mut results = Vec::new();
        for m in pattern.regex().find_iter(&text) {
            if m.is_empty() {
                continue;
            }

            let local = TextRange::new(index.byte_to_char(m.start()), index.byte_to_char(m.end()));
            let range = scope.offset_by(local);

            if matcher.needs_formatting() {
                match document.formatting(range) {
                    Ok(run) => {
                        if let Some(attribute) = matcher.first_mismatch(&run) {
                            log::debug!(
                                "match at {}..{} rejected on {}",
                                range.start,
                                range.end,
                                attribute
                            );
                            continue;
                        }
                    }
                    Err(e) => {
                        log::warn!(
                            "skipping match at {}..{}: formatting unavailable: {}",
                            range.start,
                            range.end,
                            e
                        );
                        continue;
                    }
                }
            }

            results.push(SearchResult {
                range,
                snippet: self.snippet(document, range, m.as_str(), bounds),
                page: document.page_number(range).unwrap_or(FALLBACK_PAGE),
                line: document.line_number(range).unwrap_or(FALLBACK_LINE),
            });
        }

        log::debug!(
            "'{}' matched {} times in {}..{}",
            query.text,
            results.len(),
            scope.start,
            scope.end
        );

        Ok(SearchResults::new(results, scope))
    }

    /// Context is cut from the whole document, not just the scope.
    fn snippet<D>(&self, document: &D, range: TextRange, matched: &str, bounds: TextRange) -> Snippet
    where
        D: HostDocument + ?Sized,
    {
        let radius = self.config.snippet_radius;
        let before = TextRange::new(range.start.saturating_sub(radius), range.start).clamp_to(bounds);
        let after = TextRange::new(range.end, range.end.saturating_add(radius)).clamp_to(bounds);

        Snippet {
            before: read_context(document, before),
            matched: matched.to_string(),
            after: read_context(document, after),
            clipped_before: before.start > bounds.start,
            clipped_after: after.end < bounds.end,
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

fn read_context<D: HostDocument + ?Sized>(document: &D, range: TextRange) -> String {
    if range.is_empty() {
        return String::new();
    }
    document.text(range).unwrap_or_else(|e| {
        log::debug!("no snippet context for {}..{}: {}", range.start, range.end, e);
        String::new()
    })
}
