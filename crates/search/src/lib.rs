//! Formatting-aware find and replace over a host rich-text document.
//!
//! The host is reached only through [`HostDocument`]. Queries compile to a
//! regular expression, matches are filtered by their character formatting,
//! and bulk replacement runs inside a single [`EditTransaction`].

mod engine;
mod error;
mod format;
mod host;
mod matcher;
mod memory;
pub mod navigation;
mod pattern;
mod replace;
mod results;
mod scope;
mod state;
mod text;

pub use engine::{
    DEFAULT_SNIPPET_RADIUS, DEFAULT_YIELD_INTERVAL, SearchConfig, SearchEngine, SearchQuery,
};
pub use error::{HostError, SearchError};
pub use format::{FormatAttribute, FormatPredicate, RunFormatting, Tri, Underline, merge_dual};
pub use host::{EditTransaction, HostDocument, TextRange};
pub use matcher::FormattingMatcher;
pub use memory::{CharFormat, DEFAULT_LINES_PER_PAGE, MemoryDocument};
pub use pattern::{CompiledPattern, PatternKind, build_pattern};
pub use replace::{REPLACE_ALL_EDIT_NAME, REPLACE_EDIT_NAME, ReplaceEngine, ReplaceSummary, Replacement};
pub use results::{SearchResult, SearchResults, Snippet};
pub use scope::{ScanMode, resolve_scope};
pub use state::SearchSession;

pub use richfind_colors as colors;
