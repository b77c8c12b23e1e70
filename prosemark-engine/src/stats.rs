//! Text statistics.
//!
//! Word, character and paragraph counts over plain text, the numbers an
//! editor status bar shows. Counts are Unicode-aware: characters are
//! scalar values, words are whitespace-separated runs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Counters for a piece of plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub paragraphs: usize,
}

/// Compute statistics for `text`.
///
/// Paragraphs are chunks separated by blank lines; chunks that are all
/// whitespace do not count.
pub fn text_stats(text: &str) -> TextStats {
    let words = text.trim().split_whitespace().count();
    let characters = text.chars().count();
    let characters_no_spaces = text.chars().filter(|c| !c.is_whitespace()).count();
    let paragraphs = PARAGRAPH_BREAK
        .split(text)
        .filter(|chunk| !chunk.trim().is_empty())
        .count();

    TextStats {
        words,
        characters,
        characters_no_spaces,
        paragraphs,
    }
}
