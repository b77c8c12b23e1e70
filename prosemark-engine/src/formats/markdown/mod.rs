//! Markdown format implementation
//!
//! Bidirectional conversion between the markup tree and the editor's Markdown
//! dialect. Both directions are total functions: serialization always
//! produces a string, parsing always produces a fragment, and malformed
//! input degrades to literal text instead of erroring.
//!
//! # Dialect
//!
//! This is deliberately not CommonMark. The dialect matches what the editing
//! surface produces and can re-ingest:
//!
//! | Tree element    | Markdown form        | Notes                                |
//! |-----------------|----------------------|--------------------------------------|
//! | Heading(1..=6)  | `#` .. `######`      | One line, level clamped to 6         |
//! | Bold            | `**text**`           | Non-greedy, single line              |
//! | Italic          | `*text*`             | Non-greedy, single line              |
//! | Underline       | `__text__`           | Not emphasis; `_x_` has no meaning   |
//! | InlineCode      | `` `text` ``         | Content literal, never nested        |
//! | CodeBlock       | ```` ``` ```` fences | Verbatim; guard char after close     |
//! | Blockquote      | `> ` per line        | No nesting                           |
//! | UnorderedList   | `- item`             | Flat; `-`, `*`, `+` accepted on read |
//! | OrderedList     | `1. item`            | Flat; renumbered by position         |
//! | Link            | `[text](url)`        | `href` attribute carries the target  |
//! | Paragraph       | text + blank line    | Single `\n` inside is a LineBreak    |
//!
//! Inline matching is leftmost-first and non-overlapping within a line,
//! mirroring the non-greedy regex semantics the editor always had. `***x***`
//! reads as bold wrapping italic.
//!
//! # Why hand-written
//!
//! A CommonMark engine would impose the wrong grammar here: `__x__` must stay
//! underline rather than bold, lists never nest, emphasis never spans lines,
//! and unknown constructs must fall back to plain text rather than raw HTML.
//! The grammar is small enough that a two-pass line scanner covers it.

pub mod parser;
pub mod serializer;

mod inline;

use crate::error::FormatError;
use crate::format::Format;
use crate::tree::MarkupNode;

/// Zero-width character appended right after a closing fence.
///
/// Keeps the fence from being glued to a neighbouring block by the blank-line
/// collapse; the parser consumes it so it never reaches tree text.
pub const FENCE_GUARD: char = '\u{200B}';

/// Format implementation for the Markdown dialect
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Editor Markdown dialect"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Vec<MarkupNode>, FormatError> {
        Ok(parser::parse_from_markdown(source))
    }

    fn serialize(&self, fragment: &[MarkupNode]) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(fragment))
    }
}
