//! Property tests for search and bulk replace.
//!
//! 1. Results come back sorted by start offset and never overlap.
//! 2. Raising the slop never loses matches.
//! 3. Replace all rewrites exactly the matched words, whatever the
//!    replacement length.
//! 4. Replace all with nothing to do leaves the document untouched and the
//!    edit group closed.

use proptest::prelude::*;
use richfind_search::{
    HostDocument, MemoryDocument, ReplaceEngine, Replacement, SearchEngine, SearchQuery,
    SearchResults,
};

const VOCABULARY: &[&str] = &["cat", "dog", "run", "went", "for", "a", "catalog", "the"];

fn words_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..40)
}

fn search(doc: &MemoryDocument, query: &SearchQuery) -> SearchResults {
    SearchEngine::default().search(doc, query).unwrap()
}

proptest! {
    #[test]
    fn results_are_ordered_and_disjoint(
        words in words_strategy(),
        term in prop::sample::select(VOCABULARY),
    ) {
        let doc = MemoryDocument::new(&words.join(" "));
        let results = search(&doc, &SearchQuery::new(term));
        for pair in results.as_slice().windows(2) {
            prop_assert!(pair[0].range.end <= pair[1].range.start);
        }
        let expected = words.iter().filter(|w| **w == term).count();
        prop_assert_eq!(results.count(), expected);
    }
}

proptest! {
    #[test]
    fn slop_is_monotone(words in words_strategy(), slop in 1usize..6) {
        let doc = MemoryDocument::new(&words.join(" "));
        let tight = search(&doc, &SearchQuery::new("cat run").with_slop(slop));
        let loose = search(&doc, &SearchQuery::new("cat run").with_slop(slop + 1));
        prop_assert!(tight.count() <= loose.count());
    }
}

proptest! {
    #[test]
    fn replace_all_rewrites_every_match(
        words in words_strategy(),
        replacement in prop::sample::select(vec!["", "c", "cow", "tigers"]),
    ) {
        let mut doc = MemoryDocument::new(&words.join(" "));
        let query = SearchQuery::new("cat");
        let results = search(&doc, &query);
        let expected_count = words.iter().filter(|w| **w == "cat").count();

        let summary = ReplaceEngine::default()
            .replace_all(&mut doc, &query, &results, &Replacement::new(replacement))
            .unwrap();

        let expected: Vec<&str> = words
            .iter()
            .map(|w| if *w == "cat" { replacement } else { *w })
            .collect();
        prop_assert_eq!(summary.replaced, expected_count);
        prop_assert_eq!(summary.skipped, 0);
        prop_assert_eq!(doc.as_string(), expected.join(" "));
        prop_assert!(!doc.is_editing());
        prop_assert!(doc.undo_steps() <= 1);
    }
}

proptest! {
    #[test]
    fn replace_all_without_matches_is_noop(words in words_strategy()) {
        let text = words.join(" ");
        let mut doc = MemoryDocument::new(&text);
        let query = SearchQuery::new("zebra");
        let results = search(&doc, &query);
        prop_assert!(results.is_empty());

        let summary = ReplaceEngine::default()
            .replace_all(&mut doc, &query, &results, &Replacement::new("x"))
            .unwrap();
        prop_assert_eq!(summary.replaced, 0);
        prop_assert_eq!(doc.as_string(), text);
        prop_assert!(!doc.is_editing());
        prop_assert!(!doc.rendering_suspended());
        prop_assert_eq!(doc.undo_steps(), 0);
        prop_assert_eq!(doc.bounds().end, doc.char_count());
    }
}
