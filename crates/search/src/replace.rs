use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::engine::{DEFAULT_YIELD_INTERVAL, SearchQuery};
use crate::error::{HostError, SearchError};
use crate::format::FormatPredicate;
use crate::host::{EditTransaction, HostDocument, TextRange};
use crate::pattern::CompiledPattern;
use crate::results::SearchResults;
use crate::text::{CharIndex, char_len};

pub const REPLACE_EDIT_NAME: &str = "Replace";
pub const REPLACE_ALL_EDIT_NAME: &str = "Replace All";

/// Text and formatting written over each match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Replacement {
    /// May hold `$1` / `${name}` references for regex queries.
    pub text: String,
    pub format: FormatPredicate,
}

impl Replacement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: FormatPredicate::default(),
        }
    }

    pub fn with_format(mut self, format: FormatPredicate) -> Self {
        self.format = format;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReplaceSummary {
    pub replaced: usize,
    /// Results that no longer matched or that the host refused to edit.
    pub skipped: usize,
}

pub struct ReplaceEngine {
    yield_interval: Duration,
}

impl ReplaceEngine {
    pub fn new(yield_interval: Duration) -> Self {
        Self { yield_interval }
    }

    /// Replaces the first match inside the current selection. Returns false
    /// when the selection holds no match.
    pub fn replace_current<D>(
        &self,
        document: &mut D,
        query: &SearchQuery,
        replacement: &Replacement,
    ) -> Result<bool, SearchError>
    where
        D: HostDocument + ?Sized,
    {
        let pattern = query.compile()?;
        let selection = document.selection();
        if selection.is_empty() {
            return Ok(false);
        }

        let text = document.text(selection)?;
        let Some(caps) = pattern.find_first(&text) else {
            log::debug!("selection holds no match for '{}'", query.text);
            return Ok(false);
        };
        let Some(m) = caps.get(0) else {
            return Ok(false);
        };

        let index = CharIndex::new(&text);
        let local = TextRange::new(index.byte_to_char(m.start()), index.byte_to_char(m.end()));
        let range = selection.offset_by(local);
        let new_text = pattern.expand_replacement(&caps, &replacement.text);

        let mut edit = EditTransaction::begin(document, REPLACE_EDIT_NAME);
        substitute(&mut *edit, range, &new_text, &replacement.format)?;
        Ok(true)
    }

    /// Replaces every result, last to first, inside one edit group.
    ///
    /// Each range is matched again, in place, against the document text as
    /// it stands when the group opens. Ranges that no longer match, and host
    /// failures on a single range, are skipped without aborting the rest.
    pub fn replace_all<D>(
        &self,
        document: &mut D,
        query: &SearchQuery,
        results: &SearchResults,
        replacement: &Replacement,
    ) -> Result<ReplaceSummary, SearchError>
    where
        D: HostDocument + ?Sized,
    {
        let pattern = query.compile()?;
        let mut summary = ReplaceSummary::default();

        {
            let mut edit = EditTransaction::begin(document, REPLACE_ALL_EDIT_NAME);
            // Verified against one snapshot: a later edit must not change
            // what an earlier range sees at its edges.
            let bounds = edit.bounds();
            let snapshot = edit.text(bounds)?;
            let index = CharIndex::new(&snapshot);
            let mut last_yield = Instant::now();

            // Results are sorted ascending and never overlap, so walking
            // them in reverse keeps every remaining offset valid.
            for result in results.as_slice().iter().rev() {
                if last_yield.elapsed() >= self.yield_interval {
                    edit.yield_to_host();
                    last_yield = Instant::now();
                }

                let Some(new_text) =
                    recheck(&pattern, &snapshot, &index, bounds, result.range, &replacement.text)
                else {
                    summary.skipped += 1;
                    log::debug!(
                        "{}..{} no longer matches, skipped",
                        result.range.start,
                        result.range.end
                    );
                    continue;
                };

                match substitute(&mut *edit, result.range, &new_text, &replacement.format) {
                    Ok(()) => summary.replaced += 1,
                    Err(e) => {
                        summary.skipped += 1;
                        log::warn!(
                            "skipped {}..{}: {}",
                            result.range.start,
                            result.range.end,
                            e
                        );
                    }
                }
            }
        }

        log::info!(
            "replaced {} of {} matches for '{}'",
            summary.replaced,
            results.count(),
            query.text
        );
        Ok(summary)
    }
}

impl Default for ReplaceEngine {
    fn default() -> Self {
        Self::new(DEFAULT_YIELD_INTERVAL)
    }
}

/// Expanded replacement text when `range` still holds a match of `pattern`
/// in `snapshot`, which covers `bounds`.
fn recheck(
    pattern: &CompiledPattern,
    snapshot: &str,
    index: &CharIndex,
    bounds: TextRange,
    range: TextRange,
    replacement: &str,
) -> Option<String> {
    if range.start < bounds.start || range.end - bounds.start > index.char_count() {
        return None;
    }
    let start = index.char_to_byte(range.start - bounds.start);
    let end = index.char_to_byte(range.end - bounds.start);
    let caps = pattern.match_at(snapshot, start, end)?;
    Some(pattern.expand_replacement(&caps, replacement))
}

/// Writes `text` over `range`, then selects and formats the inserted text.
fn substitute<D>(
    document: &mut D,
    range: TextRange,
    text: &str,
    format: &FormatPredicate,
) -> Result<(), HostError>
where
    D: HostDocument + ?Sized,
{
    document.set_text(range, text)?;

    let inserted = TextRange::new(range.start, range.start + char_len(text));
    document.set_selection(inserted);
    if inserted.is_empty() {
        return Ok(());
    }

    for attribute in format.attributes() {
        if let Err(e) = document.apply_attribute(inserted, &attribute) {
            log::warn!("could not apply {}: {}", attribute.name(), e);
        }
    }
    Ok(())
}
