use clap::Args;
use richfind_colors::{ColorError, NativeColor, ThemeColor, encode_rgb, encode_theme};
use richfind_search::{
    FormatPredicate, HostDocument, PatternKind, ScanMode, SearchQuery, TextRange, Tri,
};

use crate::config::SearchDefaults;

/// Query options shared by -find and -replace-all
#[derive(Debug, Clone, Args)]
pub struct QueryOptions {
    /// Text, wildcard or regex to look for
    pub query: String,

    /// Pattern kind: literal, wildcard or regex
    #[arg(long, value_parser = parse_kind)]
    pub kind: Option<PatternKind>,

    /// Words allowed between query terms
    #[arg(long)]
    pub slop: Option<usize>,

    /// Match case exactly (true) or ignore case (false)
    #[arg(long)]
    pub case_sensitive: Option<bool>,

    /// Part of the file to scan: all, forward, backward or selection
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<ScanMode>,

    /// Selection the scan mode works from, as START:END character offsets
    #[arg(long, value_parser = parse_selection)]
    pub selection: Option<TextRange>,

    /// Only matches that are (true) or are not (false) bold
    #[arg(long)]
    pub bold: Option<bool>,

    #[arg(long)]
    pub italic: Option<bool>,

    #[arg(long)]
    pub underline: Option<bool>,

    #[arg(long)]
    pub superscript: Option<bool>,

    #[arg(long)]
    pub subscript: Option<bool>,

    /// Paragraph or character style name
    #[arg(long)]
    pub style: Option<String>,

    #[arg(long)]
    pub font: Option<String>,

    #[arg(long)]
    pub size: Option<f32>,

    /// Hex color (RRGGBB) or theme color name
    #[arg(long, value_parser = parse_color)]
    pub color: Option<NativeColor>,
}

impl QueryOptions {
    pub fn to_query(&self, defaults: &SearchDefaults) -> SearchQuery {
        SearchQuery {
            text: self.query.clone(),
            kind: self.kind.unwrap_or(defaults.pattern_kind),
            slop: self.slop.unwrap_or(defaults.slop),
            mode: self.mode.unwrap_or(defaults.scan_mode),
            case_sensitive: self.case_sensitive.unwrap_or(defaults.case_sensitive),
            format: FormatPredicate {
                bold: self.bold.into(),
                italic: self.italic.into(),
                underline: self.underline.into(),
                superscript: self.superscript.into(),
                subscript: self.subscript.into(),
                style: self.style.clone(),
                font: self.font.clone(),
                font_size: self.size,
                color: self.color,
            },
        }
    }

    /// Places the document selection given by `--selection`, if any.
    pub fn apply_selection<D: HostDocument + ?Sized>(&self, document: &mut D) {
        if let Some(range) = self.selection {
            document.set_selection(range.clamp_to(document.bounds()));
        }
    }
}

/// Formatting written over each replaced match
#[derive(Debug, Clone, Default, Args)]
pub struct ReplacementFormat {
    #[arg(id = "set_bold", long = "set-bold")]
    pub bold: Option<bool>,

    #[arg(id = "set_italic", long = "set-italic")]
    pub italic: Option<bool>,

    #[arg(id = "set_underline", long = "set-underline")]
    pub underline: Option<bool>,

    #[arg(id = "set_superscript", long = "set-superscript")]
    pub superscript: Option<bool>,

    #[arg(id = "set_subscript", long = "set-subscript")]
    pub subscript: Option<bool>,

    #[arg(id = "set_style", long = "set-style")]
    pub style: Option<String>,

    #[arg(id = "set_font", long = "set-font")]
    pub font: Option<String>,

    #[arg(id = "set_size", long = "set-size")]
    pub size: Option<f32>,

    #[arg(id = "set_color", long = "set-color", value_parser = parse_color)]
    pub color: Option<NativeColor>,
}

impl ReplacementFormat {
    pub fn to_predicate(&self) -> FormatPredicate {
        FormatPredicate {
            bold: Tri::from(self.bold),
            italic: Tri::from(self.italic),
            underline: Tri::from(self.underline),
            superscript: Tri::from(self.superscript),
            subscript: Tri::from(self.subscript),
            style: self.style.clone(),
            font: self.font.clone(),
            font_size: self.size,
            color: self.color,
        }
    }
}

fn parse_kind(value: &str) -> Result<PatternKind, String> {
    PatternKind::from_name(value)
        .ok_or_else(|| format!("unknown pattern kind '{}' (literal, wildcard, regex)", value))
}

fn parse_mode(value: &str) -> Result<ScanMode, String> {
    ScanMode::from_name(value).ok_or_else(|| {
        format!("unknown scan mode '{}' (all, forward, backward, selection)", value)
    })
}

fn parse_selection(value: &str) -> Result<TextRange, String> {
    let parsed = value.split_once(':').and_then(|(start, end)| {
        Some((start.trim().parse::<usize>().ok()?, end.trim().parse::<usize>().ok()?))
    });
    match parsed {
        Some((start, end)) if start <= end => Ok(TextRange::new(start, end)),
        _ => Err(format!("'{}' is not a START:END range", value)),
    }
}

/// Accepts `RRGGBB`, `#RRGGBB`, a theme color name, or `name:adjust`
/// such as `accent1:-0.25`.
pub fn parse_color(value: &str) -> Result<NativeColor, ColorError> {
    if let Ok(color) = encode_rgb(value) {
        return Ok(color);
    }

    let (name, adjust) = match value.rsplit_once(':') {
        Some((name, adjust)) => match adjust.trim().parse::<f64>() {
            Ok(adjust) => (name, adjust),
            Err(_) => (value, 0.0),
        },
        None => (value, 0.0),
    };
    let theme = ThemeColor::from_name(name)?;
    Ok(encode_theme(theme, adjust))
}
