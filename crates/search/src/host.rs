//! Boundary between the search core and the document it operates on.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::format::{FormatAttribute, RunFormatting};

/// Half-open range of character offsets in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Shifts a range that is local to `self` into absolute offsets.
    pub fn offset_by(&self, local: TextRange) -> TextRange {
        TextRange::new(self.start + local.start, self.start + local.end)
    }

    pub fn clamp_to(&self, bounds: TextRange) -> TextRange {
        let start = self.start.clamp(bounds.start, bounds.end);
        let end = self.end.clamp(start, bounds.end);
        TextRange::new(start, end)
    }
}

/// A mutable rich-text document.
///
/// Offsets are character offsets. `set_text` shifts every offset after the
/// replaced range by the length delta.
pub trait HostDocument {
    fn text(&self, range: TextRange) -> Result<String, HostError>;

    fn set_text(&mut self, range: TextRange, text: &str) -> Result<(), HostError>;

    fn formatting(&self, range: TextRange) -> Result<RunFormatting, HostError>;

    fn apply_attribute(
        &mut self,
        range: TextRange,
        attribute: &FormatAttribute,
    ) -> Result<(), HostError>;

    fn selection(&self) -> TextRange;

    fn set_selection(&mut self, range: TextRange);

    fn bounds(&self) -> TextRange;

    fn page_number(&self, _range: TextRange) -> Result<usize, HostError> {
        Err(HostError::Unsupported("page numbers"))
    }

    fn line_number(&self, _range: TextRange) -> Result<usize, HostError> {
        Err(HostError::Unsupported("line numbers"))
    }

    /// Opens an undo group and suspends rendering. Calls may nest.
    fn begin_edit(&mut self, name: &str);

    fn end_edit(&mut self);

    /// Lets the host pump its message loop during long edits.
    fn yield_to_host(&mut self) {}
}

/// Scoped edit group. The group is closed when the guard drops, on every
/// exit path.
pub struct EditTransaction<'a, D: HostDocument + ?Sized> {
    document: &'a mut D,
}

impl<'a, D: HostDocument + ?Sized> EditTransaction<'a, D> {
    pub fn begin(document: &'a mut D, name: &str) -> Self {
        log::debug!("begin edit '{}'", name);
        document.begin_edit(name);
        Self { document }
    }
}

impl<D: HostDocument + ?Sized> Deref for EditTransaction<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.document
    }
}

impl<D: HostDocument + ?Sized> DerefMut for EditTransaction<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.document
    }
}

impl<D: HostDocument + ?Sized> Drop for EditTransaction<'_, D> {
    fn drop(&mut self) {
        self.document.end_edit();
        log::debug!("end edit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;

    #[test]
    fn range_helpers() {
        let range = TextRange::new(4, 9);
        assert_eq!(range.len(), 5);
        assert!(range.contains(4));
        assert!(!range.contains(9));
        assert_eq!(range.offset_by(TextRange::new(1, 3)), TextRange::new(5, 7));
        assert!(TextRange::empty(3).is_empty());
    }

    #[test]
    fn clamp_keeps_range_inside_bounds() {
        let bounds = TextRange::new(0, 10);
        assert_eq!(TextRange::new(8, 20).clamp_to(bounds), TextRange::new(8, 10));
        assert_eq!(TextRange::new(12, 20).clamp_to(bounds), TextRange::empty(10));
    }

    #[test]
    fn transaction_closes_on_drop() {
        let mut doc = MemoryDocument::new("abc");
        {
            let mut edit = EditTransaction::begin(&mut doc, "test");
            assert!(edit.is_editing());
            edit.set_text(TextRange::new(0, 1), "x").unwrap();
        }
        assert!(!doc.is_editing());
        assert!(!doc.rendering_suspended());
        assert_eq!(doc.as_string(), "xbc");
    }

    #[test]
    fn transaction_closes_when_unwinding() {
        let mut doc = MemoryDocument::new("abc");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _edit = EditTransaction::begin(&mut doc, "test");
            panic!("host blew up");
        }));
        assert!(result.is_err());
        assert!(!doc.is_editing());
    }
}
