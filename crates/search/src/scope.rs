use serde::{Deserialize, Serialize};

use crate::host::{HostDocument, TextRange};

/// Which part of the document a search scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    #[default]
    All,
    /// From the end of the selection to the end of the document.
    Forward,
    /// From the start of the document to the start of the selection.
    Backward,
    Selection,
}

impl ScanMode {
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "document" => Some(Self::All),
            "forward" | "down" => Some(Self::Forward),
            "backward" | "up" => Some(Self::Backward),
            "selection" => Some(Self::Selection),
            _ => None,
        }
    }
}

/// Computes the scan window. An inverted or empty window collapses to an
/// empty range at its start.
pub fn resolve_scope(mode: ScanMode, selection: TextRange, bounds: TextRange) -> TextRange {
    let selection = selection.clamp_to(bounds);
    let (start, end) = match mode {
        ScanMode::All => (bounds.start, bounds.end),
        ScanMode::Forward => (selection.end, bounds.end),
        ScanMode::Backward => (bounds.start, selection.start),
        ScanMode::Selection => (selection.start, selection.end),
    };

    if start >= end {
        TextRange::empty(start)
    } else {
        TextRange::new(start, end)
    }
}

pub fn resolve_document_scope<D: HostDocument + ?Sized>(document: &D, mode: ScanMode) -> TextRange {
    resolve_scope(mode, document.selection(), document.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: TextRange = TextRange::new(0, 100);

    #[test]
    fn all_covers_document() {
        let scope = resolve_scope(ScanMode::All, TextRange::new(10, 20), BOUNDS);
        assert_eq!(scope, BOUNDS);
    }

    #[test]
    fn forward_starts_after_selection() {
        let scope = resolve_scope(ScanMode::Forward, TextRange::new(10, 20), BOUNDS);
        assert_eq!(scope, TextRange::new(20, 100));
    }

    #[test]
    fn backward_ends_at_selection_start() {
        let scope = resolve_scope(ScanMode::Backward, TextRange::new(10, 20), BOUNDS);
        assert_eq!(scope, TextRange::new(0, 10));
    }

    #[test]
    fn selection_is_exact() {
        let scope = resolve_scope(ScanMode::Selection, TextRange::new(10, 20), BOUNDS);
        assert_eq!(scope, TextRange::new(10, 20));
    }

    #[test]
    fn degenerate_scopes_are_empty() {
        let at_end = resolve_scope(ScanMode::Forward, TextRange::new(90, 100), BOUNDS);
        assert_eq!(at_end, TextRange::empty(100));

        let at_start = resolve_scope(ScanMode::Backward, TextRange::empty(0), BOUNDS);
        assert_eq!(at_start, TextRange::empty(0));

        let caret = resolve_scope(ScanMode::Selection, TextRange::empty(42), BOUNDS);
        assert!(caret.is_empty());
        assert_eq!(caret.start, 42);
    }

    #[test]
    fn mode_names() {
        assert_eq!(ScanMode::from_name("Forward"), Some(ScanMode::Forward));
        assert_eq!(ScanMode::from_name("selection"), Some(ScanMode::Selection));
        assert_eq!(ScanMode::from_name("sideways"), None);
    }
}
