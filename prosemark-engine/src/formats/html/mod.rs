//! HTML format implementation
//!
//! This module implements bidirectional conversion between markup fragments
//! and HTML5.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` ecosystem for HTML parsing
//! and serialization:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//!
//! This choice is based on:
//! - Complete solution for both parsing and serialization
//! - WHATWG HTML5 specification compliance
//! - Handles malformed HTML gracefully, which keeps the import path total
//!
//! # Element Mapping Table
//!
//! | Tree element     | HTML            | Import notes                        |
//! |------------------|-----------------|-------------------------------------|
//! | `Paragraph`      | `<p>`           | Direct mapping                      |
//! | `LineBreak`      | `<br>`          | Direct mapping                      |
//! | `Heading(n)`     | `<h1>`–`<h6>`   | Level read back from the tag        |
//! | `Bold`           | `<strong>`      | `<b>` also accepted                 |
//! | `Italic`         | `<em>`          | `<i>` also accepted                 |
//! | `Underline`      | `<u>`           | Direct mapping                      |
//! | `InlineCode`     | `<code>`        | Only outside `<pre>`                |
//! | `CodeBlock`      | `<pre><code>`   | `<pre>` with or without `<code>`    |
//! | `Blockquote`     | `<blockquote>`  | Direct mapping                      |
//! | `UnorderedList`  | `<ul>`          | Direct mapping                      |
//! | `OrderedList`    | `<ol>`          | Direct mapping                      |
//! | `ListItem`       | `<li>`          | Direct mapping                      |
//! | `Link`           | `<a>`           | Attributes carried through          |
//! | `Container`      | `<div>`         | Unknown elements are spliced        |
//!
//! Element attributes travel in both directions verbatim; this format does
//! no filtering of its own (that is the sanitizer's job).
//!
//! # Import Behavior
//!
//! Import is lenient and never errors. Foreign vocabulary degrades rather
//! than failing: unknown elements are spliced (their children lifted into
//! their place), `<script>`, `<style>` and `<template>` subtrees are dropped
//! outright, comments are discarded, and whitespace-only text between
//! block-level tags is ignored.
//!
//! # Output Format
//!
//! By default only the fragment markup itself is produced, suitable for
//! embedding. Standalone mode wraps it in a minimal HTML5 document with a
//! charset declaration and no styling.

mod parser;
mod serializer;

pub use parser::parse_from_html;
pub use serializer::serialize_to_html;

pub(crate) use serializer::tag_name;

use crate::error::FormatError;
use crate::format::Format;
use crate::tree::MarkupNode;

/// Format implementation for HTML.
pub struct HtmlFormat {
    /// Wrap serialized fragments in a complete document.
    standalone: bool,
}

impl Default for HtmlFormat {
    fn default() -> Self {
        Self::new(false)
    }
}

impl HtmlFormat {
    /// Create a new HTML format. `standalone` selects whole-document output.
    pub fn new(standalone: bool) -> Self {
        Self { standalone }
    }

    /// Create an HTML format that emits complete documents.
    pub fn with_standalone() -> Self {
        Self::new(true)
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 fragments"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Vec<MarkupNode>, FormatError> {
        Ok(parser::parse_from_html(source))
    }

    fn serialize(&self, fragment: &[MarkupNode]) -> Result<String, FormatError> {
        serializer::serialize_to_html(fragment, self.standalone)
    }
}
