use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use richfind_search::{MemoryDocument, SearchConfig, SearchEngine, SearchResults};
use serde::Serialize;

use super::query::QueryOptions;
use crate::config::SearchDefaults;

#[derive(Debug, Clone, Args)]
pub struct FindArgs {
    /// Plain text file to search
    pub file: PathBuf,

    #[command(flatten)]
    pub options: QueryOptions,

    /// Characters of context on each side of a match
    #[arg(long)]
    pub context: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct MatchLine<'a> {
    start: usize,
    end: usize,
    page: usize,
    line: usize,
    text: &'a str,
    preview: String,
}

pub fn run(args: FindArgs) -> anyhow::Result<()> {
    let defaults = SearchDefaults::load();
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let mut doc = MemoryDocument::new(&text);
    args.options.apply_selection(&mut doc);
    let engine = SearchEngine::new(SearchConfig {
        snippet_radius: args.context.unwrap_or(defaults.snippet_radius),
        ..SearchConfig::default()
    });
    let results = engine.search(&doc, &args.options.to_query(&defaults))?;

    if args.json {
        println!("{}", render_json(&results)?);
    } else {
        print!("{}", render_text(&results));
    }
    Ok(())
}

fn render_json(results: &SearchResults) -> anyhow::Result<String> {
    let lines: Vec<MatchLine<'_>> = results
        .iter()
        .map(|result| MatchLine {
            start: result.range.start,
            end: result.range.end,
            page: result.page,
            line: result.line,
            text: &result.snippet.matched,
            preview: result.snippet.preview(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&lines)?)
}

fn render_text(results: &SearchResults) -> String {
    let mut out = String::new();
    for result in results.iter() {
        out.push_str(&format!(
            "{}:{} [{}..{}] {}\n",
            result.page,
            result.line,
            result.range.start,
            result.range.end,
            result.snippet.preview()
        ));
    }
    out.push_str(&format!(
        "{} match{}\n",
        results.count(),
        if results.count() == 1 { "" } else { "es" }
    ));
    out
}
