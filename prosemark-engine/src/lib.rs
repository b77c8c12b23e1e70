//! Conversion and sanitation engine for editable markup fragments
//!
//!     This crate converts between a small markup tree and the text formats an
//!     editor persists and exchanges (Markdown as the stored form, HTML as the
//!     interchange form), and filters untrusted trees against an allow-list
//!     policy before they are rendered or stored.
//!
//!     TLDR for contributors:
//!         - The tree model (./tree/mod.rs) is the center of the crate. Every format
//!           adapts to and from it; no format talks to another format directly.
//!         - Conversions are total where the input is text: any string yields a tree,
//!           malformed constructs degrade to literal text instead of erroring.
//!         - The sanitizer is an orthogonal filter over the same tree model, with a
//!           library-backed primary and a self-contained fallback behind one facade.
//!         - This is a pure lib: it powers the prosemark CLI but is shell agnostic.
//!           No std printing, no env vars, no process state in here.
//!
//! Architecture
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markdown
//!     │   │   ├── parser.rs       # block pass (lines → blocks → nodes)
//!     │   │   ├── inline.rs       # inline pass (emphasis, code spans, links)
//!     │   │   ├── serializer.rs   # tree → Markdown
//!     │   │   └── mod.rs
//!     │   └── html
//!     │       ├── parser.rs       # HTML → tree (lenient)
//!     │       ├── serializer.rs   # tree → HTML via RcDom
//!     │       └── mod.rs
//!     ├── sanitize
//!     │   ├── tree.rs             # self-contained fallback backend
//!     │   ├── ammonia.rs          # library backend (feature html-sanitizer)
//!     │   └── mod.rs              # policy, trait, facade
//!     ├── stats.rs
//!     ├── tree
//!     │   └── mod.rs              # MarkupNode / Element / ElementKind
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we
//!     need to include these in the mod.
//!
//! Core Algorithms
//!
//!     Markdown parsing is two line-oriented passes: a block pass that classifies
//!     and groups lines (fences collected verbatim, everything else by regex),
//!     then an inline pass that resolves emphasis, code spans and links inside
//!     each block's text. Serialization walks the tree per kind and finishes with
//!     a fence-aware blank-line cleanup. Code blocks are the one region that both
//!     directions carry byte for byte; a zero-width guard character after each
//!     closing fence keeps the cleanup pass from eating the separation around them.
//!
//!     The sanitizer rebuilds a tree against a policy: allowed kinds are copied
//!     with filtered attributes, disallowed kinds are replaced by their flattened
//!     text. The walk uses an explicit work stack so input depth costs heap, not
//!     call stack.
//!
//! Format Selection
//!
//!     - Markdown: the persisted-state format. The dialect is the editor's own
//!       (see ./formats/markdown/mod.rs for the mapping), so the parser and
//!       serializer are hand-written rather than delegated to a CommonMark crate.
//!     - HTML: the interchange format. Editable surfaces speak HTML, and the
//!       library sanitation backend rides on it. Here we do delegate: html5ever
//!       parses and serializes, this crate only maps DOM to tree.
//!
//! Library Choices
//!
//!     Where a format has a browser-grade crate we use it (html5ever, ammonia);
//!     where fidelity to the editor dialect matters more than spec coverage we
//!     keep the logic in-crate (Markdown, the fallback sanitizer). Regexes do the
//!     line classification the same way the original editor's patterns did.

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod sanitize;
pub mod stats;
pub mod tree;

pub use error::FormatError;
pub use format::Format;
pub use registry::FormatRegistry;
pub use sanitize::{sanitize, sanitize_with_report, SanitizePolicy, SanitizeReport, Sanitizer};
pub use stats::{text_stats, TextStats};
pub use tree::{Element, ElementKind, Fragment, MarkupNode};

/// Converts Markdown source to a markup fragment.
///
/// Total: any input yields a fragment, malformed constructs degrade to
/// literal text. Whitespace-only input yields an empty fragment.
pub fn markdown_to_tree(source: &str) -> Vec<MarkupNode> {
    formats::markdown::parser::parse_from_markdown(source)
}

/// Converts a markup fragment to Markdown.
///
/// Total: every tree serializes. Unsupported shapes degrade to their text
/// content rather than failing.
pub fn tree_to_markdown(fragment: &[MarkupNode]) -> String {
    formats::markdown::serializer::serialize_to_markdown(fragment)
}

/// Converts HTML to a markup fragment, leniently.
pub fn html_to_tree(source: &str) -> Vec<MarkupNode> {
    formats::html::parse_from_html(source)
}

/// Converts a markup fragment to HTML markup (fragment form, no document
/// wrapper). Fails only on pathologically deep trees.
pub fn tree_to_html(fragment: &[MarkupNode]) -> Result<String, FormatError> {
    formats::html::serialize_to_html(fragment, false)
}
