//! Keyword search across notes.
//!
//! Matching is a case-insensitive substring test against both the title and
//! the content of every note. Hits come back in note-store order.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::notes::Notes;

/// Default number of content characters in a snippet
pub const DEFAULT_SNIPPET_CHARS: usize = 150;

/// Marker appended to truncated snippets
pub const ELLIPSIS: &str = "...";

/// One matching note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
}

/// Search result; an empty result is reported as `NoMatches`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<SearchHit>),
    NoMatches,
}

impl SearchOutcome {
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchOutcome::Found(hits) => hits,
            SearchOutcome::NoMatches => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SearchOutcome::NoMatches)
    }
}

/// Search `notes` for `keyword` using the default snippet length
pub fn search(notes: &Notes, keyword: &str) -> Result<SearchOutcome> {
    search_with(notes, keyword, DEFAULT_SNIPPET_CHARS)
}

/// Search `notes` for `keyword`, cutting snippets at `snippet_chars`
pub fn search_with(notes: &Notes, keyword: &str, snippet_chars: usize) -> Result<SearchOutcome> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return Err(Error::Validation("Enter a keyword.".to_string()));
    }

    let hits: Vec<SearchHit> = notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&keyword)
                || note.content.to_lowercase().contains(&keyword)
        })
        .map(|note| SearchHit {
            title: note.title.clone(),
            snippet: snippet(&note.content, snippet_chars),
        })
        .collect();

    tracing::debug!(keyword = %keyword, hits = hits.len(), "search finished");

    if hits.is_empty() {
        Ok(SearchOutcome::NoMatches)
    } else {
        Ok(SearchOutcome::Found(hits))
    }
}

/// First `max_chars` characters of `content` on one line, with an ellipsis
/// when anything was cut.
pub fn snippet(content: &str, max_chars: usize) -> String {
    let mut out: String = content
        .chars()
        .take(max_chars)
        .map(|ch| if ch == '\n' { ' ' } else { ch })
        .collect();
    if content.chars().nth(max_chars).is_some() {
        out.push_str(ELLIPSIS);
    }
    out
}
