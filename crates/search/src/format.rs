//! Typed character formatting shared by matching and replacing.

use richfind_colors::NativeColor;
use serde::{Deserialize, Serialize};

/// A boolean constraint that may be left open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Tri {
    #[default]
    Unconstrained,
    Required(bool),
}

impl Tri {
    pub fn is_unconstrained(self) -> bool {
        self == Self::Unconstrained
    }

    pub fn required(self) -> Option<bool> {
        match self {
            Self::Unconstrained => None,
            Self::Required(value) => Some(value),
        }
    }

    /// A resolved host value of `None` (mixed) only passes an open constraint.
    pub fn accepts(self, actual: Option<bool>) -> bool {
        match self {
            Self::Unconstrained => true,
            Self::Required(expected) => actual == Some(expected),
        }
    }
}

impl From<Option<bool>> for Tri {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unconstrained, Self::Required)
    }
}

impl From<Tri> for Option<bool> {
    fn from(value: Tri) -> Self {
        value.required()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Underline {
    #[default]
    None,
    Single,
    Double,
    Thick,
    Dotted,
    Dashed,
    Wavy,
}

/// Formatting the host reports for a range. `None` means the range mixes
/// several values for that attribute. Fields ending in `_bi` hold the
/// complex-script variant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunFormatting {
    pub bold: Option<bool>,
    pub bold_bi: Option<bool>,
    pub italic: Option<bool>,
    pub italic_bi: Option<bool>,
    pub underline: Option<Underline>,
    pub superscript: Option<bool>,
    pub subscript: Option<bool>,
    pub style: Option<String>,
    pub font_name: Option<String>,
    pub font_name_bi: Option<String>,
    pub font_size: Option<f32>,
    pub font_size_bi: Option<f32>,
    pub color: Option<NativeColor>,
}

impl RunFormatting {
    pub fn merged_bold(&self) -> Option<bool> {
        merge_dual(self.bold, self.bold_bi)
    }

    pub fn merged_italic(&self) -> Option<bool> {
        merge_dual(self.italic, self.italic_bi)
    }

    pub fn merged_font_name(&self) -> Option<&str> {
        match self.font_name_bi.as_deref() {
            Some(name) if !name.is_empty() => Some(name),
            _ => self.font_name.as_deref().filter(|name| !name.is_empty()),
        }
    }

    pub fn merged_font_size(&self) -> Option<f32> {
        match self.font_size_bi {
            Some(size) if size > 0.0 => Some(size),
            _ => self.font_size.filter(|size| *size > 0.0),
        }
    }
}

/// Merges the primary and complex-script values of a dual attribute.
///
/// True wins, false needs agreement, anything else is mixed.
pub fn merge_dual(primary: Option<bool>, complex: Option<bool>) -> Option<bool> {
    if primary == Some(true) || complex == Some(true) {
        Some(true)
    } else if primary == Some(false) && complex == Some(false) {
        Some(false)
    } else {
        None
    }
}

/// One writable attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatAttribute {
    Bold(bool),
    BoldBi(bool),
    Italic(bool),
    ItalicBi(bool),
    Underline(Underline),
    Superscript(bool),
    Subscript(bool),
    Style(String),
    FontName(String),
    FontNameBi(String),
    FontSize(f32),
    FontSizeBi(f32),
    Color(NativeColor),
}

impl FormatAttribute {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bold(_) => "bold",
            Self::BoldBi(_) => "bold_bi",
            Self::Italic(_) => "italic",
            Self::ItalicBi(_) => "italic_bi",
            Self::Underline(_) => "underline",
            Self::Superscript(_) => "superscript",
            Self::Subscript(_) => "subscript",
            Self::Style(_) => "style",
            Self::FontName(_) => "font_name",
            Self::FontNameBi(_) => "font_name_bi",
            Self::FontSize(_) => "font_size",
            Self::FontSizeBi(_) => "font_size_bi",
            Self::Color(_) => "color",
        }
    }
}

/// Formatting constraints for Find, or attributes to apply for Replace.
///
/// Absent fields are unconstrained when matching and left unchanged when
/// applying.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatPredicate {
    pub bold: Tri,
    pub italic: Tri,
    pub underline: Tri,
    pub superscript: Tri,
    pub subscript: Tri,
    pub style: Option<String>,
    pub font: Option<String>,
    pub font_size: Option<f32>,
    pub color: Option<NativeColor>,
}

impl FormatPredicate {
    pub fn is_unconstrained(&self) -> bool {
        self.bold.is_unconstrained()
            && self.italic.is_unconstrained()
            && self.underline.is_unconstrained()
            && self.superscript.is_unconstrained()
            && self.subscript.is_unconstrained()
            && self.style().is_none()
            && self.font().is_none()
            && self.font_size.is_none()
            && self.color.is_none()
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref().filter(|style| !style.is_empty())
    }

    pub fn font(&self) -> Option<&str> {
        self.font.as_deref().filter(|font| !font.is_empty())
    }

    /// Attributes to write when this predicate describes a replacement.
    /// Dual attributes are written to both script variants.
    pub fn attributes(&self) -> Vec<FormatAttribute> {
        let mut attributes = Vec::new();

        if let Some(bold) = self.bold.required() {
            attributes.push(FormatAttribute::Bold(bold));
            attributes.push(FormatAttribute::BoldBi(bold));
        }
        if let Some(italic) = self.italic.required() {
            attributes.push(FormatAttribute::Italic(italic));
            attributes.push(FormatAttribute::ItalicBi(italic));
        }
        if let Some(underline) = self.underline.required() {
            let value = if underline {
                Underline::Single
            } else {
                Underline::None
            };
            attributes.push(FormatAttribute::Underline(value));
        }
        if let Some(superscript) = self.superscript.required() {
            attributes.push(FormatAttribute::Superscript(superscript));
        }
        if let Some(subscript) = self.subscript.required() {
            attributes.push(FormatAttribute::Subscript(subscript));
        }
        if let Some(style) = self.style() {
            attributes.push(FormatAttribute::Style(style.to_string()));
        }
        if let Some(font) = self.font() {
            attributes.push(FormatAttribute::FontName(font.to_string()));
            attributes.push(FormatAttribute::FontNameBi(font.to_string()));
        }
        if let Some(size) = self.font_size.filter(|size| *size > 0.0) {
            attributes.push(FormatAttribute::FontSize(size));
            attributes.push(FormatAttribute::FontSizeBi(size));
        }
        if let Some(color) = self.color {
            attributes.push(FormatAttribute::Color(color));
        }

        attributes
    }

    /// Captures the resolved formatting of a run, leaving mixed attributes
    /// unconstrained.
    pub fn from_run(run: &RunFormatting) -> Self {
        Self {
            bold: run.merged_bold().into(),
            italic: run.merged_italic().into(),
            underline: run.underline.map(|u| u != Underline::None).into(),
            superscript: run.superscript.into(),
            subscript: run.subscript.into(),
            style: run.style.clone().filter(|style| !style.is_empty()),
            font: run.merged_font_name().map(str::to_string),
            font_size: run.merged_font_size(),
            color: run.color,
        }
    }
}
