use crate::engine::{SearchConfig, SearchEngine, SearchQuery};
use crate::error::SearchError;
use crate::format::FormatPredicate;
use crate::host::HostDocument;
use crate::navigation;
use crate::replace::{ReplaceEngine, ReplaceSummary, Replacement};
use crate::results::SearchResults;

/// Manages one find/replace session against a document
pub struct SearchSession {
    engine: SearchEngine,
    replacer: ReplaceEngine,
    results: Option<SearchResults>,
    query: Option<SearchQuery>,
    error: Option<String>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl SearchSession {
    pub fn new(config: SearchConfig) -> Self {
        let replacer = ReplaceEngine::new(config.yield_interval);
        Self {
            engine: SearchEngine::new(config),
            replacer,
            results: None,
            query: None,
            error: None,
        }
    }

    /// Run a search and keep its results for navigation and replace all.
    /// A failed search leaves the previous results in place.
    pub fn search<D>(&mut self, document: &D, query: &SearchQuery) -> Result<&SearchResults, SearchError>
    where
        D: HostDocument + ?Sized,
    {
        self.error = None;
        let results = self.engine.search(document, query).map_err(|e| self.record(e))?;
        self.query = Some(query.clone());
        Ok(&*self.results.insert(results))
    }

    /// Replace the first match inside the selection
    pub fn replace_current<D>(
        &mut self,
        document: &mut D,
        query: &SearchQuery,
        replacement: &Replacement,
    ) -> Result<bool, SearchError>
    where
        D: HostDocument + ?Sized,
    {
        self.error = None;
        let replaced = self
            .replacer
            .replace_current(document, query, replacement)
            .map_err(|e| self.record(e))?;
        if replaced {
            self.invalidate();
        }
        Ok(replaced)
    }

    /// Replace every result of the last search for `query`. Searches first
    /// when there are no results for that query.
    pub fn replace_all<D>(
        &mut self,
        document: &mut D,
        query: &SearchQuery,
        replacement: &Replacement,
    ) -> Result<ReplaceSummary, SearchError>
    where
        D: HostDocument + ?Sized,
    {
        self.error = None;
        let reuse = self.results.is_some() && self.query.as_ref() == Some(query);
        let searched = if reuse {
            None
        } else {
            Some(
                self.engine
                    .search(&*document, query)
                    .map_err(|e| self.record(e))?,
            )
        };
        let results = match (&searched, &self.results) {
            (Some(results), _) | (None, Some(results)) => results,
            (None, None) => return Ok(ReplaceSummary::default()),
        };

        let outcome = self.replacer.replace_all(document, query, results, replacement);
        let summary = outcome.map_err(|e| self.record(e))?;
        self.invalidate();
        Ok(summary)
    }

    /// Select the next result after the cursor
    pub fn select_next<D>(&self, document: &mut D) -> Option<usize>
    where
        D: HostDocument + ?Sized,
    {
        navigation::select_next(document, self.results.as_ref()?)
    }

    /// Select the previous result before the cursor
    pub fn select_previous<D>(&self, document: &mut D) -> Option<usize>
    where
        D: HostDocument + ?Sized,
    {
        navigation::select_previous(document, self.results.as_ref()?)
    }

    pub fn select_by_index<D>(&self, document: &mut D, index: usize) -> Option<usize>
    where
        D: HostDocument + ?Sized,
    {
        navigation::select_by_index(document, self.results.as_ref()?, index)
    }

    /// Formatting of the current selection as a predicate, for "use
    /// formatting from selection"
    pub fn current_selection_formatting<D>(&self, document: &D) -> Result<FormatPredicate, SearchError>
    where
        D: HostDocument + ?Sized,
    {
        let run = document.formatting(document.selection())?;
        Ok(FormatPredicate::from_run(&run))
    }

    /// Get results of the last search, if they still describe the document
    pub fn results(&self) -> Option<&SearchResults> {
        self.results.as_ref()
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    /// Get the message of the last user-correctable error
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn config(&self) -> &SearchConfig {
        self.engine.config()
    }

    /// Clear search state
    pub fn clear(&mut self) {
        self.results = None;
        self.query = None;
        self.error = None;
    }

    /// Results hold offsets into the old text once the document changes.
    fn invalidate(&mut self) {
        self.results = None;
    }

    fn record(&mut self, error: SearchError) -> SearchError {
        if error.is_user_error() {
            self.error = Some(error.to_string());
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{FormatAttribute, Tri};
    use crate::host::TextRange;
    use crate::memory::MemoryDocument;

    #[test]
    fn search_keeps_results() {
        let doc = MemoryDocument::new("cat dog cat");
        let mut session = SearchSession::default();
        let count = session.search(&doc, &SearchQuery::new("cat")).unwrap().count();
        assert_eq!(count, 2);
        assert_eq!(session.results().map(SearchResults::count), Some(2));
        assert!(session.error().is_none());
    }

    #[test]
    fn user_error_is_recorded() {
        let doc = MemoryDocument::new("cat");
        let mut session = SearchSession::default();
        assert!(session.search(&doc, &SearchQuery::new("")).is_err());
        assert_eq!(session.error(), Some("enter text to search for"));
        assert!(session.results().is_none());

        session.search(&doc, &SearchQuery::new("cat")).unwrap();
        assert!(session.error().is_none());
    }

    #[test]
    fn failed_search_keeps_previous_results() {
        let mut doc = MemoryDocument::new("cat dog cat");
        let mut session = SearchSession::default();
        session.search(&doc, &SearchQuery::new("cat")).unwrap();

        assert!(session.search(&doc, &SearchQuery::new("")).is_err());
        assert!(session.error().is_some());
        assert_eq!(session.results().map(SearchResults::count), Some(2));
        assert_eq!(session.query().map(|q| q.text.as_str()), Some("cat"));
        assert_eq!(session.select_next(&mut doc), Some(1));
        assert_eq!(doc.selection(), TextRange::new(8, 11));
    }

    #[test]
    fn failed_replace_all_keeps_previous_results() {
        let mut doc = MemoryDocument::new("cat dog cat");
        let mut session = SearchSession::default();
        session.search(&doc, &SearchQuery::new("cat")).unwrap();

        let bad = SearchQuery::new("(").with_kind(crate::pattern::PatternKind::Regex);
        assert!(session
            .replace_all(&mut doc, &bad, &Replacement::new("x"))
            .is_err());
        assert!(session.error().is_some());
        assert_eq!(session.results().map(SearchResults::count), Some(2));
        assert_eq!(doc.as_string(), "cat dog cat");
    }

    #[test]
    fn navigation_without_search_is_noop() {
        let mut doc = MemoryDocument::new("cat");
        let session = SearchSession::default();
        assert_eq!(session.select_next(&mut doc), None);
        assert_eq!(session.select_by_index(&mut doc, 0), None);
    }

    #[test]
    fn replace_all_drops_stale_results() {
        let mut doc = MemoryDocument::new("aaa");
        let mut session = SearchSession::default();
        let query = SearchQuery::new("a").with_kind(crate::pattern::PatternKind::Regex);
        session.search(&doc, &query).unwrap();

        let summary = session
            .replace_all(&mut doc, &query, &Replacement::new("bb"))
            .unwrap();
        assert_eq!(summary.replaced, 3);
        assert_eq!(doc.as_string(), "bbbbbb");
        assert!(session.results().is_none());
        assert_eq!(session.select_next(&mut doc), None);
    }

    #[test]
    fn replace_all_searches_when_query_changed() {
        let mut doc = MemoryDocument::new("cat dog cat");
        let mut session = SearchSession::default();
        session.search(&doc, &SearchQuery::new("dog")).unwrap();

        let summary = session
            .replace_all(&mut doc, &SearchQuery::new("cat"), &Replacement::new("owl"))
            .unwrap();
        assert_eq!(summary.replaced, 2);
        assert_eq!(doc.as_string(), "owl dog owl");
    }

    #[test]
    fn replace_current_invalidates_results() {
        let mut doc = MemoryDocument::new("cat dog cat");
        let mut session = SearchSession::default();
        let query = SearchQuery::new("cat");
        session.search(&doc, &query).unwrap();
        session.select_by_index(&mut doc, 0);

        assert!(session
            .replace_current(&mut doc, &query, &Replacement::new("kitten"))
            .unwrap());
        assert_eq!(doc.as_string(), "kitten dog cat");
        assert!(session.results().is_none());
    }

    #[test]
    fn picks_up_selection_formatting() {
        let mut doc = MemoryDocument::new("plain bold");
        doc.apply_attribute(TextRange::new(6, 10), &FormatAttribute::Bold(true))
            .unwrap();
        doc.set_selection(TextRange::new(6, 10));

        let predicate = SearchSession::default()
            .current_selection_formatting(&doc)
            .unwrap();
        assert_eq!(predicate.bold, Tri::Required(true));
        assert_eq!(predicate.italic, Tri::Required(false));
        assert_eq!(predicate.style.as_deref(), Some("Normal"));
        assert_eq!(predicate.font.as_deref(), Some("Calibri"));

        doc.set_selection(TextRange::new(0, 10));
        let mixed = SearchSession::default()
            .current_selection_formatting(&doc)
            .unwrap();
        assert_eq!(mixed.bold, Tri::Unconstrained);
    }
}
