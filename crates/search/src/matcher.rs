use crate::format::{FormatPredicate, RunFormatting, Underline};

const FONT_SIZE_TOLERANCE: f32 = 0.01;

/// Decides whether the formatting of a text match satisfies a predicate.
#[derive(Debug, Clone, Copy)]
pub struct FormattingMatcher<'a> {
    predicate: &'a FormatPredicate,
}

impl<'a> FormattingMatcher<'a> {
    pub fn new(predicate: &'a FormatPredicate) -> Self {
        Self { predicate }
    }

    /// False when every attribute is unconstrained, so the host does not
    /// need to be asked for formatting at all.
    pub fn needs_formatting(&self) -> bool {
        !self.predicate.is_unconstrained()
    }

    pub fn accepts(&self, run: &RunFormatting) -> bool {
        self.first_mismatch(run).is_none()
    }

    /// Name of the first attribute that rejects `run`.
    pub fn first_mismatch(&self, run: &RunFormatting) -> Option<&'static str> {
        let p = self.predicate;

        // A mixed dual attribute never rejects on its own.
        if let Some(bold) = run.merged_bold()
            && !p.bold.accepts(Some(bold))
        {
            return Some("bold");
        }
        if let Some(italic) = run.merged_italic()
            && !p.italic.accepts(Some(italic))
        {
            return Some("italic");
        }

        // Mixed underline reads as "not none".
        let underlined = run.underline != Some(Underline::None);
        if !p.underline.accepts(Some(underlined)) {
            return Some("underline");
        }

        if !p.superscript.accepts(run.superscript) {
            return Some("superscript");
        }
        if !p.subscript.accepts(run.subscript) {
            return Some("subscript");
        }

        if let Some(style) = p.style()
            && run.style.as_deref() != Some(style)
        {
            return Some("style");
        }
        if let Some(font) = p.font()
            && run.merged_font_name() != Some(font)
        {
            return Some("font");
        }
        if let Some(size) = p.font_size {
            let matches = run
                .merged_font_size()
                .is_some_and(|actual| (actual - size).abs() < FONT_SIZE_TOLERANCE);
            if !matches {
                return Some("font_size");
            }
        }
        if let Some(color) = p.color
            && run.color != Some(color)
        {
            return Some("color");
        }

        None
    }
}
