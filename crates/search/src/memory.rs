//! In-memory rich-text document.
//!
//! Backs the bridge binary and the CLI, and stands in for a real host in
//! tests. Every character carries its own [`CharFormat`].

use richfind_colors::NativeColor;

use crate::error::HostError;
use crate::format::{FormatAttribute, RunFormatting, Underline};
use crate::host::{HostDocument, TextRange};

pub const DEFAULT_LINES_PER_PAGE: usize = 50;
pub const DEFAULT_STYLES: &[&str] = &["Normal", "Heading 1", "Heading 2", "Title", "Quote"];

#[derive(Debug, Clone, PartialEq)]
pub struct CharFormat {
    pub bold: bool,
    pub bold_bi: bool,
    pub italic: bool,
    pub italic_bi: bool,
    pub underline: Underline,
    pub superscript: bool,
    pub subscript: bool,
    pub style: String,
    pub font_name: String,
    pub font_name_bi: String,
    pub font_size: f32,
    pub font_size_bi: f32,
    pub color: NativeColor,
}

impl Default for CharFormat {
    fn default() -> Self {
        Self {
            bold: false,
            bold_bi: false,
            italic: false,
            italic_bi: false,
            underline: Underline::None,
            superscript: false,
            subscript: false,
            style: "Normal".to_string(),
            font_name: "Calibri".to_string(),
            font_name_bi: String::new(),
            font_size: 11.0,
            font_size_bi: 0.0,
            color: NativeColor::AUTOMATIC,
        }
    }
}

impl CharFormat {
    fn apply(&mut self, attribute: &FormatAttribute) {
        match attribute {
            FormatAttribute::Bold(value) => self.bold = *value,
            FormatAttribute::BoldBi(value) => self.bold_bi = *value,
            FormatAttribute::Italic(value) => self.italic = *value,
            FormatAttribute::ItalicBi(value) => self.italic_bi = *value,
            FormatAttribute::Underline(value) => self.underline = *value,
            FormatAttribute::Superscript(value) => {
                self.superscript = *value;
                if *value {
                    self.subscript = false;
                }
            }
            FormatAttribute::Subscript(value) => {
                self.subscript = *value;
                if *value {
                    self.superscript = false;
                }
            }
            FormatAttribute::Style(name) => self.style = name.clone(),
            FormatAttribute::FontName(name) => self.font_name = name.clone(),
            FormatAttribute::FontNameBi(name) => self.font_name_bi = name.clone(),
            FormatAttribute::FontSize(size) => self.font_size = *size,
            FormatAttribute::FontSizeBi(size) => self.font_size_bi = *size,
            FormatAttribute::Color(color) => self.color = *color,
        }
    }
}

#[derive(Debug, Clone)]
struct Snapshot {
    name: String,
    chars: Vec<char>,
    formats: Vec<CharFormat>,
    selection: TextRange,
}

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    chars: Vec<char>,
    formats: Vec<CharFormat>,
    selection: TextRange,
    styles: Vec<String>,
    lines_per_page: usize,
    numbering: bool,
    edit_depth: usize,
    open_edit: Option<Snapshot>,
    undo_stack: Vec<Snapshot>,
    rendering_suspended: bool,
    yields: usize,
    locked: Vec<usize>,
}

impl MemoryDocument {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let formats = vec![CharFormat::default(); chars.len()];
        Self {
            chars,
            formats,
            selection: TextRange::empty(0),
            styles: DEFAULT_STYLES.iter().map(|s| s.to_string()).collect(),
            lines_per_page: DEFAULT_LINES_PER_PAGE,
            numbering: true,
            edit_depth: 0,
            open_edit: None,
            undo_stack: Vec::new(),
            rendering_suspended: false,
            yields: 0,
            locked: Vec::new(),
        }
    }

    pub fn with_lines_per_page(mut self, lines_per_page: usize) -> Self {
        self.lines_per_page = lines_per_page.max(1);
        self
    }

    pub fn with_style(mut self, name: &str) -> Self {
        if !self.styles.iter().any(|style| style == name) {
            self.styles.push(name.to_string());
        }
        self
    }

    /// Makes page and line queries fail, like a host without layout.
    pub fn without_numbering(mut self) -> Self {
        self.numbering = false;
        self
    }

    /// Rejects any later `set_text` whose range covers `offset`.
    pub fn lock_offset(&mut self, offset: usize) {
        self.locked.push(offset);
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn char_count(&self) -> usize {
        self.chars.len()
    }

    pub fn char_format(&self, offset: usize) -> Option<&CharFormat> {
        self.formats.get(offset)
    }

    pub fn is_editing(&self) -> bool {
        self.edit_depth > 0
    }

    pub fn rendering_suspended(&self) -> bool {
        self.rendering_suspended
    }

    pub fn yield_count(&self) -> usize {
        self.yields
    }

    pub fn undo_steps(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn undo_names(&self) -> Vec<&str> {
        self.undo_stack.iter().map(|step| step.name.as_str()).collect()
    }

    /// Reverts the most recent undo step. Returns false when there is none.
    pub fn undo(&mut self) -> bool {
        let Some(step) = self.undo_stack.pop() else {
            return false;
        };
        log::debug!("undo '{}'", step.name);
        self.chars = step.chars;
        self.formats = step.formats;
        self.selection = step.selection;
        true
    }

    fn snapshot(&self, name: &str) -> Snapshot {
        Snapshot {
            name: name.to_string(),
            chars: self.chars.clone(),
            formats: self.formats.clone(),
            selection: self.selection,
        }
    }

    /// Edits outside a group get an undo step of their own.
    fn record_standalone(&mut self, name: &str) {
        if self.edit_depth == 0 {
            let step = self.snapshot(name);
            self.undo_stack.push(step);
        }
    }

    fn check(&self, range: TextRange) -> Result<(), HostError> {
        if range.start > range.end || range.end > self.chars.len() {
            return Err(HostError::invalid_range(range));
        }
        Ok(())
    }

    fn line_of(&self, offset: usize) -> usize {
        let end = offset.min(self.chars.len());
        1 + self.chars[..end].iter().filter(|ch| **ch == '\n').count()
    }

    fn shift(offset: usize, replaced: TextRange, inserted: usize) -> usize {
        if offset >= replaced.end {
            offset - replaced.len() + inserted
        } else if offset > replaced.start {
            offset.min(replaced.start + inserted)
        } else {
            offset
        }
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new("")
    }
}

impl HostDocument for MemoryDocument {
    fn text(&self, range: TextRange) -> Result<String, HostError> {
        self.check(range)?;
        Ok(self.chars[range.start..range.end].iter().collect())
    }

    fn set_text(&mut self, range: TextRange, text: &str) -> Result<(), HostError> {
        self.check(range)?;
        if let Some(offset) = self.locked.iter().find(|offset| range.contains(**offset)) {
            return Err(HostError::Rejected(format!(
                "text at offset {} is protected",
                offset
            )));
        }

        self.record_standalone("Replace");

        // Inserted text takes the formatting of the first replaced
        // character, or of the character before an insertion point.
        let template = self
            .formats
            .get(range.start)
            .filter(|_| !range.is_empty())
            .or_else(|| range.start.checked_sub(1).and_then(|i| self.formats.get(i)))
            .cloned()
            .unwrap_or_default();

        let inserted: Vec<char> = text.chars().collect();
        let count = inserted.len();
        self.chars.splice(range.start..range.end, inserted);
        self.formats.splice(
            range.start..range.end,
            std::iter::repeat_n(template, count),
        );

        self.selection = TextRange::new(
            Self::shift(self.selection.start, range, count),
            Self::shift(self.selection.end, range, count),
        );
        Ok(())
    }

    fn formatting(&self, range: TextRange) -> Result<RunFormatting, HostError> {
        self.check(range)?;

        let formats: &[CharFormat] = if range.is_empty() {
            let at = range.start.min(self.formats.len()).saturating_sub(1);
            self.formats.get(at..=at).unwrap_or(&[])
        } else {
            &self.formats[range.start..range.end]
        };

        Ok(RunFormatting {
            bold: uniform(formats, |f| f.bold),
            bold_bi: uniform(formats, |f| f.bold_bi),
            italic: uniform(formats, |f| f.italic),
            italic_bi: uniform(formats, |f| f.italic_bi),
            underline: uniform(formats, |f| f.underline),
            superscript: uniform(formats, |f| f.superscript),
            subscript: uniform(formats, |f| f.subscript),
            style: uniform(formats, |f| f.style.clone()),
            font_name: uniform(formats, |f| f.font_name.clone()),
            font_name_bi: uniform(formats, |f| f.font_name_bi.clone()),
            font_size: uniform(formats, |f| f.font_size),
            font_size_bi: uniform(formats, |f| f.font_size_bi),
            color: uniform(formats, |f| f.color),
        })
    }

    fn apply_attribute(
        &mut self,
        range: TextRange,
        attribute: &FormatAttribute,
    ) -> Result<(), HostError> {
        self.check(range)?;
        if let FormatAttribute::Style(name) = attribute
            && !self.styles.iter().any(|style| style == name)
        {
            return Err(HostError::Rejected(format!("unknown style '{}'", name)));
        }

        self.record_standalone("Format");
        for format in &mut self.formats[range.start..range.end] {
            format.apply(attribute);
        }
        Ok(())
    }

    fn selection(&self) -> TextRange {
        self.selection
    }

    fn set_selection(&mut self, range: TextRange) {
        self.selection = range.clamp_to(self.bounds());
    }

    fn bounds(&self) -> TextRange {
        TextRange::new(0, self.chars.len())
    }

    fn page_number(&self, range: TextRange) -> Result<usize, HostError> {
        if !self.numbering {
            return Err(HostError::Unsupported("page numbers"));
        }
        Ok((self.line_of(range.start) - 1) / self.lines_per_page + 1)
    }

    fn line_number(&self, range: TextRange) -> Result<usize, HostError> {
        if !self.numbering {
            return Err(HostError::Unsupported("line numbers"));
        }
        Ok(self.line_of(range.start))
    }

    fn begin_edit(&mut self, name: &str) {
        if self.edit_depth == 0 {
            self.open_edit = Some(self.snapshot(name));
            self.rendering_suspended = true;
        }
        self.edit_depth += 1;
    }

    fn end_edit(&mut self) {
        self.edit_depth = self.edit_depth.saturating_sub(1);
        if self.edit_depth > 0 {
            return;
        }

        self.rendering_suspended = false;
        if let Some(step) = self.open_edit.take()
            && (step.chars != self.chars || step.formats != self.formats)
        {
            self.undo_stack.push(step);
        }
    }

    fn yield_to_host(&mut self) {
        self.yields += 1;
    }
}

/// The shared value of a field, or `None` when the slice mixes values.
fn uniform<T, F>(formats: &[CharFormat], field: F) -> Option<T>
where
    T: PartialEq,
    F: Fn(&CharFormat) -> T,
{
    let mut values = formats.iter().map(field);
    let first = values.next()?;
    values.all(|value| value == first).then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::EditTransaction;

    #[test]
    fn text_uses_character_offsets() {
        let doc = MemoryDocument::new("na\u{ef}ve cat");
        assert_eq!(doc.text(TextRange::new(6, 9)).unwrap(), "cat");
        assert_eq!(doc.bounds(), TextRange::new(0, 9));
    }

    #[test]
    fn out_of_bounds_range_is_rejected() {
        let doc = MemoryDocument::new("abc");
        assert!(matches!(
            doc.text(TextRange::new(2, 5)),
            Err(HostError::InvalidRange { start: 2, end: 5 })
        ));
    }

    #[test]
    fn set_text_shifts_selection_after_edit() {
        let mut doc = MemoryDocument::new("aaa bbb ccc");
        doc.set_selection(TextRange::new(8, 11));
        doc.set_text(TextRange::new(0, 3), "x").unwrap();
        assert_eq!(doc.as_string(), "x bbb ccc");
        assert_eq!(doc.selection(), TextRange::new(6, 9));
    }

    #[test]
    fn inserted_text_inherits_formatting() {
        let mut doc = MemoryDocument::new("cat dog");
        doc.apply_attribute(TextRange::new(0, 3), &FormatAttribute::Bold(true))
            .unwrap();
        doc.set_text(TextRange::new(0, 3), "tiger").unwrap();
        assert!(doc.char_format(4).unwrap().bold);
        assert!(!doc.char_format(5).unwrap().bold);
    }

    #[test]
    fn mixed_formatting_reports_none() {
        let mut doc = MemoryDocument::new("abcd");
        doc.apply_attribute(TextRange::new(0, 2), &FormatAttribute::Italic(true))
            .unwrap();
        let run = doc.formatting(TextRange::new(0, 4)).unwrap();
        assert_eq!(run.italic, None);
        assert_eq!(run.bold, Some(false));
        assert_eq!(run.style.as_deref(), Some("Normal"));
    }

    #[test]
    fn caret_formatting_reads_previous_character() {
        let mut doc = MemoryDocument::new("ab");
        doc.apply_attribute(TextRange::new(0, 1), &FormatAttribute::Bold(true))
            .unwrap();
        let run = doc.formatting(TextRange::empty(1)).unwrap();
        assert_eq!(run.bold, Some(true));
    }

    #[test]
    fn unknown_style_is_rejected() {
        let mut doc = MemoryDocument::new("abc");
        let err = doc
            .apply_attribute(TextRange::new(0, 3), &FormatAttribute::Style("Fancy".into()))
            .unwrap_err();
        assert!(matches!(err, HostError::Rejected(_)));

        let mut doc = MemoryDocument::new("abc").with_style("Fancy");
        doc.apply_attribute(TextRange::new(0, 3), &FormatAttribute::Style("Fancy".into()))
            .unwrap();
        assert_eq!(doc.char_format(1).unwrap().style, "Fancy");
    }

    #[test]
    fn superscript_clears_subscript() {
        let mut doc = MemoryDocument::new("x");
        let all = TextRange::new(0, 1);
        doc.apply_attribute(all, &FormatAttribute::Subscript(true)).unwrap();
        doc.apply_attribute(all, &FormatAttribute::Superscript(true)).unwrap();
        let format = doc.char_format(0).unwrap();
        assert!(format.superscript);
        assert!(!format.subscript);
    }

    #[test]
    fn group_is_one_undo_step() {
        let mut doc = MemoryDocument::new("a b c");
        {
            let mut edit = EditTransaction::begin(&mut doc, "Replace All");
            assert!(edit.rendering_suspended());
            edit.set_text(TextRange::new(4, 5), "z").unwrap();
            edit.set_text(TextRange::new(0, 1), "x").unwrap();
        }
        assert_eq!(doc.as_string(), "x b z");
        assert_eq!(doc.undo_names(), vec!["Replace All"]);
        assert!(doc.undo());
        assert_eq!(doc.as_string(), "a b c");
        assert!(!doc.undo());
    }

    #[test]
    fn unchanged_group_leaves_no_undo_step() {
        let mut doc = MemoryDocument::new("abc");
        drop(EditTransaction::begin(&mut doc, "Replace All"));
        assert_eq!(doc.undo_steps(), 0);
    }

    #[test]
    fn nested_groups_close_once() {
        let mut doc = MemoryDocument::new("abc");
        doc.begin_edit("outer");
        doc.begin_edit("inner");
        doc.set_text(TextRange::new(0, 1), "x").unwrap();
        doc.end_edit();
        assert!(doc.is_editing());
        doc.end_edit();
        assert!(!doc.is_editing());
        assert_eq!(doc.undo_names(), vec!["outer"]);
    }

    #[test]
    fn locked_offset_rejects_edit() {
        let mut doc = MemoryDocument::new("abc");
        doc.lock_offset(1);
        assert!(doc.set_text(TextRange::new(0, 2), "x").is_err());
        assert!(doc.set_text(TextRange::new(2, 3), "x").is_ok());
        assert_eq!(doc.as_string(), "abx");
    }

    #[test]
    fn line_and_page_numbers() {
        let doc = MemoryDocument::new("one\ntwo\nthree\nfour").with_lines_per_page(2);
        assert_eq!(doc.line_number(TextRange::new(0, 3)).unwrap(), 1);
        assert_eq!(doc.line_number(TextRange::new(8, 13)).unwrap(), 3);
        assert_eq!(doc.page_number(TextRange::new(8, 13)).unwrap(), 2);
        assert_eq!(doc.page_number(TextRange::new(14, 18)).unwrap(), 2);
    }
}
