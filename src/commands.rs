use anyhow::Context;
use richfind_colors::{DecodedColor, NativeColor, ThemeColor, decode, encode_rgb, encode_theme};
use richfind_search::{
    FormatPredicate, HostDocument, MemoryDocument, PatternKind, Replacement, ScanMode,
    SearchQuery, SearchResults, SearchSession, TextRange,
};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

/// Query fields a command may leave out; missing ones come from the config.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueryArgs {
    pub text: String,
    pub mode: Option<ScanMode>,
    pub slop: Option<usize>,
    pub kind: Option<PatternKind>,
    pub case_sensitive: Option<bool>,
    pub format: FormatPredicate,
}

impl QueryArgs {
    pub fn resolve(self, config: &AppConfig) -> SearchQuery {
        SearchQuery {
            text: self.text,
            mode: self.mode.unwrap_or(config.scan_mode),
            slop: self.slop.unwrap_or(config.slop),
            kind: self.kind.unwrap_or(config.pattern_kind),
            case_sensitive: self.case_sensitive.unwrap_or(config.case_sensitive),
            format: self.format,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Search {
        query: QueryArgs,
    },
    ReplaceCurrent {
        query: QueryArgs,
        #[serde(default)]
        replacement: Replacement,
    },
    ReplaceAll {
        query: QueryArgs,
        #[serde(default)]
        replacement: Replacement,
    },
    SelectNext,
    SelectPrevious,
    SelectByIndex {
        index: usize,
    },
    PickUpFormatting,
    SetSelection {
        start: usize,
        end: usize,
    },
    DecodeColor {
        value: i32,
    },
    EncodeColor {
        hex: String,
    },
    EncodeThemeColor {
        theme: String,
        #[serde(default)]
        adjust: f64,
    },
    Undo,
    GetText,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search { .. } => "search",
            Self::ReplaceCurrent { .. } => "replace_current",
            Self::ReplaceAll { .. } => "replace_all",
            Self::SelectNext => "select_next",
            Self::SelectPrevious => "select_previous",
            Self::SelectByIndex { .. } => "select_by_index",
            Self::PickUpFormatting => "pick_up_formatting",
            Self::SetSelection { .. } => "set_selection",
            Self::DecodeColor { .. } => "decode_color",
            Self::EncodeColor { .. } => "encode_color",
            Self::EncodeThemeColor { .. } => "encode_theme_color",
            Self::Undo => "undo",
            Self::GetText => "get_text",
        }
    }

    /// True for commands that may change the document text.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::ReplaceCurrent { .. } | Self::ReplaceAll { .. } | Self::Undo
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub page: usize,
    pub line: usize,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "response", rename_all = "snake_case")]
pub enum Response {
    Results {
        count: usize,
        results: Vec<ResultView>,
    },
    Replaced {
        replaced: bool,
    },
    ReplacedAll {
        replaced: usize,
        skipped: usize,
    },
    Selection {
        index: Option<usize>,
        start: usize,
        end: usize,
    },
    Formatting {
        format: FormatPredicate,
    },
    Color {
        value: i32,
        automatic: bool,
        hex: Option<String>,
    },
    Undone {
        undone: bool,
    },
    Text {
        text: String,
    },
    Error {
        message: String,
    },
}

impl Response {
    fn results(results: &SearchResults) -> Self {
        Self::Results {
            count: results.count(),
            results: results
                .iter()
                .enumerate()
                .map(|(index, result)| ResultView {
                    index,
                    start: result.range.start,
                    end: result.range.end,
                    page: result.page,
                    line: result.line,
                    preview: result.snippet.preview(),
                })
                .collect(),
        }
    }

    fn color(value: NativeColor) -> anyhow::Result<Self> {
        let decoded = decode(value).with_context(|| format!("cannot decode {}", value))?;
        Ok(Self::Color {
            value: value.raw(),
            automatic: decoded == DecodedColor::Automatic,
            hex: decoded.to_hex(),
        })
    }
}

/// One open document plus the find/replace session working on it.
pub struct Bridge {
    config: AppConfig,
    document: MemoryDocument,
    session: SearchSession,
}

impl Bridge {
    pub fn new(config: AppConfig, text: &str) -> Self {
        let document = MemoryDocument::new(text).with_lines_per_page(config.lines_per_page);
        let session = SearchSession::new(config.search_config());
        Self {
            config,
            document,
            session,
        }
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.document
    }

    pub fn dispatch(&mut self, command: Command) -> Response {
        let name = command.name();
        match self.execute(command) {
            Ok(response) => response,
            Err(e) => {
                log::debug!("{} failed: {:#}", name, e);
                Response::Error {
                    message: format!("{:#}", e),
                }
            }
        }
    }

    fn execute(&mut self, command: Command) -> anyhow::Result<Response> {
        let response = match command {
            Command::Search { query } => {
                let query = query.resolve(&self.config);
                Response::results(self.session.search(&self.document, &query)?)
            }
            Command::ReplaceCurrent { query, replacement } => {
                let query = query.resolve(&self.config);
                let replaced =
                    self.session
                        .replace_current(&mut self.document, &query, &replacement)?;
                Response::Replaced { replaced }
            }
            Command::ReplaceAll { query, replacement } => {
                let query = query.resolve(&self.config);
                let summary = self
                    .session
                    .replace_all(&mut self.document, &query, &replacement)?;
                Response::ReplacedAll {
                    replaced: summary.replaced,
                    skipped: summary.skipped,
                }
            }
            Command::SelectNext => {
                let index = self.session.select_next(&mut self.document);
                self.selection(index)
            }
            Command::SelectPrevious => {
                let index = self.session.select_previous(&mut self.document);
                self.selection(index)
            }
            Command::SelectByIndex { index } => {
                let index = self.session.select_by_index(&mut self.document, index);
                self.selection(index)
            }
            Command::PickUpFormatting => Response::Formatting {
                format: self.session.current_selection_formatting(&self.document)?,
            },
            Command::SetSelection { start, end } => {
                self.document.set_selection(TextRange::new(start, end));
                self.selection(None)
            }
            Command::DecodeColor { value } => Response::color(NativeColor::from_raw(value))?,
            Command::EncodeColor { hex } => Response::color(encode_rgb(&hex)?)?,
            Command::EncodeThemeColor { theme, adjust } => {
                let theme = ThemeColor::from_name(&theme)?;
                Response::color(encode_theme(theme, adjust))?
            }
            Command::Undo => {
                let undone = self.document.undo();
                if undone {
                    self.session.clear();
                }
                Response::Undone { undone }
            }
            Command::GetText => Response::Text {
                text: self.document.as_string(),
            },
        };
        Ok(response)
    }

    fn selection(&self, index: Option<usize>) -> Response {
        let selection = self.document.selection();
        Response::Selection {
            index,
            start: selection.start,
            end: selection.end,
        }
    }
}
