//! notebook search command implementation.

use std::path::PathBuf;

use crate::book::Notebook;
use crate::error::Result;
use crate::output::{emit_plain, OutputOptions};
use crate::search::{SearchHit, SearchOutcome};

/// Text shown when nothing matched
pub const NO_MATCHES: &str = "No matches found.";

pub struct SearchOptions {
    pub keyword: String,
    pub dir: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct SearchReport<'a> {
    keyword: &'a str,
    found: bool,
    hits: &'a [SearchHit],
}

fn render(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::NoMatches => NO_MATCHES.to_string(),
        SearchOutcome::Found(hits) => hits
            .iter()
            .map(|hit| format!("{}\n{}", hit.title, hit.snippet))
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

pub fn run(options: SearchOptions) -> Result<()> {
    let book = Notebook::open(&options.dir)?;
    let outcome = book.search(&options.keyword)?;

    emit_plain(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "search",
        &SearchReport {
            keyword: options.keyword.trim(),
            found: !outcome.is_empty(),
            hits: outcome.hits(),
        },
        &render(&outcome),
    )
}
