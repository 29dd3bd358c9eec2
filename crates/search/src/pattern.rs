use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    #[default]
    Literal,
    /// `*` matches any run of characters, `?` matches one character.
    Wildcard,
    Regex,
}

impl PatternKind {
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "literal" | "plain" | "text" => Some(Self::Literal),
            "wildcard" | "wildcards" | "glob" => Some(Self::Wildcard),
            "regex" | "regexp" => Some(Self::Regex),
            _ => None,
        }
    }
}

/// A user query compiled to a regular expression.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    kind: PatternKind,
}

impl CompiledPattern {
    pub fn compile(
        raw: &str,
        kind: PatternKind,
        slop: usize,
        case_sensitive: bool,
    ) -> Result<Self, SearchError> {
        if raw.is_empty() {
            return Err(SearchError::MissingQuery);
        }

        let source = build_pattern(raw, kind, slop);
        let regex = build_regex(&source, case_sensitive)?;

        Ok(Self { regex, kind })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// First non-empty match in `text`.
    pub fn find_first<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.regex
            .captures_iter(text)
            .find(|caps| caps.get(0).is_some_and(|m| !m.is_empty()))
    }

    /// Matches only when the match found from byte `start` of `haystack`
    /// spans exactly `start..end`. The surrounding text stays visible to
    /// `\b`, `\B`, `^` and `$`.
    pub fn match_at<'t>(&self, haystack: &'t str, start: usize, end: usize) -> Option<Captures<'t>> {
        if start > haystack.len() {
            return None;
        }
        self.regex
            .captures_at(haystack, start)
            .filter(|caps| caps.get(0).is_some_and(|m| m.start() == start && m.end() == end))
    }

    /// Builds the text that replaces a match. Back-references are expanded
    /// for regex queries only.
    pub fn expand_replacement(&self, caps: &Captures<'_>, replacement: &str) -> String {
        match self.kind {
            PatternKind::Regex => {
                let mut expanded = String::new();
                caps.expand(replacement, &mut expanded);
                expanded
            }
            PatternKind::Literal | PatternKind::Wildcard => replacement.to_string(),
        }
    }
}

/// Builds the regex source for a query.
///
/// With `slop > 0` and at least two whitespace separated terms, each term is
/// compiled on its own and consecutive terms may be separated by up to `slop`
/// other words.
pub fn build_pattern(raw: &str, kind: PatternKind, slop: usize) -> String {
    let terms: Vec<&str> = raw.split_whitespace().collect();

    if slop == 0 || terms.len() < 2 {
        return with_word_edges(raw, compile_term(raw, kind), kind);
    }

    let connector = proximity_connector(slop);
    let joined = terms
        .iter()
        .map(|term| compile_term(term, kind))
        .collect::<Vec<_>>()
        .join(&connector);

    let first = terms.first().copied().unwrap_or_default();
    let last = terms.last().copied().unwrap_or_default();
    let mut pattern = String::new();
    if kind != PatternKind::Regex && starts_with_word_char(first) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&joined);
    if kind != PatternKind::Regex && ends_with_word_char(last) {
        pattern.push_str(r"\b");
    }
    pattern
}

fn compile_term(term: &str, kind: PatternKind) -> String {
    match kind {
        PatternKind::Literal => regex::escape(term),
        PatternKind::Wildcard => {
            let mut compiled = String::with_capacity(term.len() * 2);
            let mut buf = [0u8; 4];
            for ch in term.chars() {
                match ch {
                    '*' => compiled.push_str(".*"),
                    '?' => compiled.push('.'),
                    _ => compiled.push_str(&regex::escape(ch.encode_utf8(&mut buf))),
                }
            }
            compiled
        }
        PatternKind::Regex => term.to_string(),
    }
}

/// A word boundary, one run of non-word characters, up to `slop` further
/// words, then a word boundary. The repetition is lazy so each match ends at
/// the nearest following term.
fn proximity_connector(slop: usize) -> String {
    format!(r#"\b\W+(?:[\w'"]+\W+){{0,{slop}}}?\b"#)
}

/// Word boundaries are only added next to word characters; a boundary next
/// to punctuation would never match.
fn with_word_edges(raw: &str, compiled: String, kind: PatternKind) -> String {
    if kind == PatternKind::Regex {
        return compiled;
    }

    let mut pattern = String::with_capacity(compiled.len() + 4);
    if starts_with_word_char(raw) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&compiled);
    if ends_with_word_char(raw) {
        pattern.push_str(r"\b");
    }
    pattern
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn starts_with_word_char(text: &str) -> bool {
    text.chars().next().is_some_and(is_word_char)
}

fn ends_with_word_char(text: &str) -> bool {
    text.chars().next_back().is_some_and(is_word_char)
}

fn build_regex(source: &str, case_sensitive: bool) -> Result<Regex, SearchError> {
    RegexBuilder::new(source)
        .case_insensitive(!case_sensitive)
        .multi_line(true)
        .build()
        .map_err(|e| SearchError::InvalidPattern(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(pattern: &CompiledPattern, text: &str) -> usize {
        pattern.regex().find_iter(text).count()
    }

    #[test]
    fn literal_escapes_metacharacters() {
        let pattern = CompiledPattern::compile("foo.*bar", PatternKind::Literal, 0, true).unwrap();
        assert_eq!(count(&pattern, "fooXXXbar"), 0);
        assert_eq!(count(&pattern, "foo.*bar"), 1);
    }

    #[test]
    fn literal_matches_whole_words_only() {
        let pattern = CompiledPattern::compile("cat", PatternKind::Literal, 0, true).unwrap();
        assert_eq!(count(&pattern, "cat concatenate cats cat"), 2);
    }

    #[test]
    fn punctuation_edges_get_no_boundary() {
        let pattern = CompiledPattern::compile("(x)", PatternKind::Literal, 0, true).unwrap();
        assert_eq!(pattern.as_str(), r"\(x\)");
        assert_eq!(count(&pattern, "f(x) = (x)"), 2);
    }

    #[test]
    fn wildcard_translation() {
        assert_eq!(build_pattern("c*t", PatternKind::Wildcard, 0), r"\bc.*t\b");
        assert_eq!(build_pattern("c?t", PatternKind::Wildcard, 0), r"\bc.t\b");
        assert_eq!(build_pattern("a.b?", PatternKind::Wildcard, 0), r"\ba\.b.");

        let pattern = CompiledPattern::compile("c?t", PatternKind::Wildcard, 0, true).unwrap();
        assert_eq!(count(&pattern, "cat cot cart"), 2);
    }

    #[test]
    fn regex_kind_is_used_as_is() {
        assert_eq!(build_pattern(r"\d+", PatternKind::Regex, 0), r"\d+");
        let pattern = CompiledPattern::compile(r"\d+", PatternKind::Regex, 0, true).unwrap();
        assert_eq!(count(&pattern, "foo 123 bar 456"), 2);
    }

    #[test]
    fn invalid_regex_is_a_user_error() {
        let err = CompiledPattern::compile("[invalid", PatternKind::Regex, 0, true).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern(_)));
        assert!(err.is_user_error());
    }

    #[test]
    fn empty_query_is_missing() {
        let err = CompiledPattern::compile("", PatternKind::Literal, 0, true).unwrap_err();
        assert_eq!(err, SearchError::MissingQuery);
    }

    #[test]
    fn case_insensitive_by_flag() {
        let insensitive =
            CompiledPattern::compile("HELLO", PatternKind::Literal, 0, false).unwrap();
        assert_eq!(count(&insensitive, "Hello World"), 1);

        let sensitive = CompiledPattern::compile("HELLO", PatternKind::Literal, 0, true).unwrap();
        assert_eq!(count(&sensitive, "Hello World"), 0);
    }

    #[test]
    fn slop_allows_intervening_words() {
        let pattern = CompiledPattern::compile("cat run", PatternKind::Literal, 2, true).unwrap();
        let text = "cat went for run";
        let m = pattern.regex().find(text).unwrap();
        assert_eq!(m.as_str(), text);

        let tight = CompiledPattern::compile("cat run", PatternKind::Literal, 1, true).unwrap();
        assert!(tight.regex().find(text).is_none());
        assert!(tight.regex().find("cat will run").is_some());
    }

    #[test]
    fn slop_match_ends_at_nearest_term() {
        let pattern = CompiledPattern::compile("cat run", PatternKind::Literal, 3, true).unwrap();
        let found: Vec<&str> = pattern
            .regex()
            .find_iter("cat run cat run")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["cat run", "cat run"]);
    }

    #[test]
    fn slop_zero_treats_query_as_one_phrase() {
        let pattern = CompiledPattern::compile("cat run", PatternKind::Literal, 0, true).unwrap();
        assert_eq!(pattern.as_str(), r"\bcat run\b");
        assert!(pattern.regex().find("cat will run").is_none());
        assert!(pattern.regex().find("the cat run").is_some());
    }

    #[test]
    fn single_term_ignores_slop() {
        assert_eq!(build_pattern("cat", PatternKind::Literal, 3), r"\bcat\b");
    }

    #[test]
    fn slop_connector_spans_punctuation_and_quotes() {
        let pattern = CompiledPattern::compile("cat run", PatternKind::Literal, 1, true).unwrap();
        assert!(pattern.regex().find("cat, \"don't\" run").is_some());
    }

    #[test]
    fn match_at_requires_exact_span() {
        let pattern = CompiledPattern::compile("cat", PatternKind::Literal, 0, true).unwrap();
        assert!(pattern.match_at("a cat", 2, 5).is_some());
        assert!(pattern.match_at("a cat", 2, 4).is_none());
        assert!(pattern.match_at("a cat", 0, 5).is_none());
        assert!(pattern.match_at("a cat", 9, 12).is_none());
    }

    #[test]
    fn match_at_sees_neighbouring_text() {
        let pattern = CompiledPattern::compile(r"\Bat", PatternKind::Regex, 0, true).unwrap();
        assert!(pattern.match_at("cat bat", 1, 3).is_some());
        assert!(pattern.match_at("at", 0, 2).is_none());

        let line_start = CompiledPattern::compile("^cat", PatternKind::Regex, 0, true).unwrap();
        assert!(line_start.match_at("dog\ncat", 4, 7).is_some());
        assert!(line_start.match_at("dog cat", 4, 7).is_none());
    }

    #[test]
    fn replacement_expands_groups_for_regex_only() {
        let regex = CompiledPattern::compile(r"(\w+)@(\w+)", PatternKind::Regex, 0, true).unwrap();
        let caps = regex.find_first("mail bob@home").unwrap();
        assert_eq!(regex.expand_replacement(&caps, "$2 at ${1}"), "home at bob");

        let literal = CompiledPattern::compile("cost", PatternKind::Literal, 0, true).unwrap();
        let caps = literal.find_first("the cost").unwrap();
        assert_eq!(literal.expand_replacement(&caps, "$5"), "$5");
    }

    #[test]
    fn find_first_skips_empty_matches() {
        let pattern = CompiledPattern::compile("x*", PatternKind::Regex, 0, true).unwrap();
        let caps = pattern.find_first("abxxc").unwrap();
        assert_eq!(caps.get(0).unwrap().as_str(), "xx");
    }

    #[test]
    fn pattern_kind_names() {
        assert_eq!(PatternKind::from_name("Regex"), Some(PatternKind::Regex));
        assert_eq!(PatternKind::from_name("wildcards"), Some(PatternKind::Wildcard));
        assert_eq!(PatternKind::from_name("fuzzy"), None);
    }
}
