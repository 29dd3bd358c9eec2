use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use richfind_search::{MemoryDocument, ReplaceSummary, Replacement, SearchSession};

use super::query::{QueryOptions, ReplacementFormat};
use crate::config::SearchDefaults;

#[derive(Debug, Clone, Args)]
pub struct ReplaceArgs {
    /// Plain text file to rewrite
    pub file: PathBuf,

    #[command(flatten)]
    pub options: QueryOptions,

    /// Replacement text; `$1` and `${name}` refer to regex groups
    #[arg(long = "with", default_value = "")]
    pub replacement: String,

    #[command(flatten)]
    pub format: ReplacementFormat,

    /// Write the result here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Overwrite the input file
    #[arg(long, conflicts_with = "output")]
    pub in_place: bool,
}

pub fn run(args: ReplaceArgs) -> anyhow::Result<()> {
    let defaults = SearchDefaults::load();
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let (rewritten, summary) = replace_in_text(&text, &args, &defaults)?;

    let target = if args.in_place {
        Some(args.file.clone())
    } else {
        args.output.clone()
    };
    match target {
        Some(path) => {
            std::fs::write(&path, &rewritten)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "Replaced {} of {} in {}",
                summary.replaced,
                summary.replaced + summary.skipped,
                path.display()
            );
        }
        None => print!("{}", rewritten),
    }
    Ok(())
}

fn replace_in_text(
    text: &str,
    args: &ReplaceArgs,
    defaults: &SearchDefaults,
) -> anyhow::Result<(String, ReplaceSummary)> {
    let mut doc = MemoryDocument::new(text);
    args.options.apply_selection(&mut doc);
    let mut session = SearchSession::default();
    let query = args.options.to_query(defaults);
    let replacement = Replacement {
        text: args.replacement.clone(),
        format: args.format.to_predicate(),
    };

    let summary = session.replace_all(&mut doc, &query, &replacement)?;
    log::info!("{} replaced, {} skipped", summary.replaced, summary.skipped);
    Ok((doc.as_string(), summary))
}
