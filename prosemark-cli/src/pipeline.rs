//! The pipelines behind the CLI commands.
//!
//! Each pipeline is a pure function from source text and configuration to
//! output, so the commands stay testable without going through argument
//! parsing or the filesystem.

use prosemark_config::ProsemarkConfig;
use prosemark_engine::formats::html::HtmlFormat;
use prosemark_engine::formats::markdown::MarkdownFormat;
use prosemark_engine::tree::{flatten_text, ElementKind, MarkupNode};
use prosemark_engine::{
    sanitize_with_report, text_stats, FormatError, FormatRegistry, SanitizePolicy, SanitizeReport,
    TextStats,
};

/// Formats the CLI can name on the command line.
pub const AVAILABLE_FORMATS: &[&str] = &["markdown", "html"];

/// Build the registry the CLI serves, with config knobs applied.
pub fn registry(config: &ProsemarkConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(MarkdownFormat);
    registry.register(HtmlFormat::new(config.convert.html.standalone));
    registry
}

/// Convert `source` from the `from` format to the `to` format.
pub fn convert(
    source: &str,
    from: &str,
    to: &str,
    config: &ProsemarkConfig,
) -> Result<String, FormatError> {
    let registry = registry(config);
    let fragment = registry.parse(source, from)?;
    registry.serialize(&fragment, to)
}

/// Result of a sanitize run: the clean document plus the backend report,
/// so the command can surface fallbacks on stderr.
#[derive(Debug)]
pub struct SanitizeOutcome {
    pub output: String,
    pub report: SanitizeReport,
}

/// Filter a document against the configured allow list and re-serialize it
/// in its own format.
pub fn sanitize_document(
    source: &str,
    format: &str,
    config: &ProsemarkConfig,
) -> Result<SanitizeOutcome, FormatError> {
    let registry = registry(config);
    let fragment = registry.parse(source, format)?;

    let policy = SanitizePolicy::from(&config.sanitize);
    let (clean, report) = sanitize_with_report(&fragment, &policy);

    let output = registry.serialize(&clean, format)?;
    Ok(SanitizeOutcome { output, report })
}

/// Compute text statistics for a document in any parseable format.
pub fn document_stats(
    source: &str,
    format: &str,
    config: &ProsemarkConfig,
) -> Result<TextStats, FormatError> {
    let registry = registry(config);
    let fragment = registry.parse(source, format)?;
    Ok(text_stats(&plain_text(&fragment)))
}

/// Render a fragment as the plain text a reader would count: one chunk per
/// root block separated by a blank line, list items one per line.
fn plain_text(fragment: &[MarkupNode]) -> String {
    let mut chunks: Vec<String> = Vec::new();

    for node in fragment {
        let chunk = match node {
            MarkupNode::Element(element)
                if matches!(
                    element.kind,
                    ElementKind::UnorderedList | ElementKind::OrderedList
                ) =>
            {
                element
                    .children
                    .iter()
                    .map(|item| flatten_text(std::slice::from_ref(item)))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            other => flatten_text(std::slice::from_ref(other)),
        };
        if !chunk.trim().is_empty() {
            chunks.push(chunk);
        }
    }

    chunks.join("\n\n")
}
