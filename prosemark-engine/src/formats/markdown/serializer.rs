//! Markdown serialization (markup tree → Markdown export)
//!
//! Walks the fragment once, emitting Markdown per kind, then runs a single
//! whole-document cleanup pass that collapses blank-line runs and trims the
//! edges. The cleanup never reaches inside fenced code regions.

use crate::formats::markdown::FENCE_GUARD;
use crate::tree::{flatten_text, Element, ElementKind, MarkupNode};

/// Serialize a fragment to Markdown.
///
/// Total: every tree renders to some string, there is no error path.
pub fn serialize_to_markdown(fragment: &[MarkupNode]) -> String {
    let rendered = render_nodes(fragment);
    collapse_blank_runs(&rendered).trim().to_string()
}

fn render_nodes(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, &mut out);
    }
    out
}

fn render_node(node: &MarkupNode, out: &mut String) {
    let element = match node {
        MarkupNode::Text(content) => {
            out.push_str(content);
            return;
        }
        MarkupNode::Element(element) => element,
    };

    match element.kind {
        ElementKind::Paragraph => {
            let content = render_nodes(&element.children);
            if content.trim().is_empty() {
                // Empty paragraphs keep vertical rhythm without doubling up
                out.push('\n');
            } else {
                out.push_str(&content);
                out.push_str("\n\n");
            }
        }

        ElementKind::LineBreak => out.push('\n'),

        ElementKind::Heading(level) => {
            let level = level.clamp(1, 6) as usize;
            out.push_str(&"#".repeat(level));
            out.push(' ');
            out.push_str(&single_line(&render_nodes(&element.children)));
            out.push_str("\n\n");
        }

        ElementKind::Bold => wrap_inline(element, "**", "**", out),
        ElementKind::Italic => wrap_inline(element, "*", "*", out),
        ElementKind::Underline => wrap_inline(element, "__", "__", out),
        ElementKind::InlineCode => wrap_inline(element, "`", "`", out),

        ElementKind::CodeBlock => {
            out.push_str("```\n");
            out.push_str(&code_text(element));
            out.push_str("\n```");
            out.push(FENCE_GUARD);
            out.push_str("\n\n");
        }

        ElementKind::Blockquote => {
            let content = render_nodes(&element.children);
            let quoted: Vec<String> = content
                .split('\n')
                .filter(|line| !line.trim().is_empty())
                .map(|line| format!("> {}", line.trim()))
                .collect();
            out.push_str(&quoted.join("\n"));
            out.push_str("\n\n");
        }

        ElementKind::UnorderedList => {
            for item in &element.children {
                out.push_str("- ");
                out.push_str(&item_text(item));
                out.push('\n');
            }
            out.push('\n');
        }

        ElementKind::OrderedList => {
            // Items are renumbered by position; upstream numbering is ignored
            for (index, item) in element.children.iter().enumerate() {
                out.push_str(&format!("{}. ", index + 1));
                out.push_str(&item_text(item));
                out.push('\n');
            }
            out.push('\n');
        }

        // A stray list item outside a list renders as its content
        ElementKind::ListItem => out.push_str(&render_nodes(&element.children)),

        ElementKind::Link => {
            out.push('[');
            out.push_str(&single_line(&render_nodes(&element.children)));
            out.push_str("](");
            out.push_str(element.attribute("href").unwrap_or(""));
            out.push(')');
        }

        ElementKind::Container => {
            let content = render_nodes(&element.children);
            out.push_str(&content);
            if !content.ends_with('\n') {
                out.push('\n');
            }
        }
    }
}

fn wrap_inline(element: &Element, open: &str, close: &str, out: &mut String) {
    out.push_str(open);
    out.push_str(&render_nodes(&element.children));
    out.push_str(close);
}

/// Verbatim payload of a code block. Line breaks are the one structural
/// element inside a code region; anything else contributes its plain text.
fn code_text(element: &Element) -> String {
    let mut text = String::new();
    for child in &element.children {
        match child {
            MarkupNode::Text(content) => text.push_str(content),
            MarkupNode::Element(el) if el.kind == ElementKind::LineBreak => text.push('\n'),
            MarkupNode::Element(el) => text.push_str(&flatten_text(&el.children)),
        }
    }
    text
}

/// One list item's text: rendered content forced onto a single line.
fn item_text(node: &MarkupNode) -> String {
    let rendered = match node {
        MarkupNode::Element(element) if element.kind == ElementKind::ListItem => {
            render_nodes(&element.children)
        }
        other => render_nodes(std::slice::from_ref(other)),
    };
    single_line(&rendered).trim().to_string()
}

fn single_line(text: &str) -> String {
    text.replace('\n', " ")
}

/// Collapse runs of three or more newlines down to two, skipping fenced code
/// regions (their blank lines are content). Fence lines in serializer output
/// are exactly ``` with an optional trailing guard character.
fn collapse_blank_runs(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut in_fence = false;
    let mut pending_blanks = 0usize;

    for line in text.split('\n') {
        if in_fence {
            lines.push(line);
            if is_fence_line(line) {
                in_fence = false;
            }
            continue;
        }

        if line.is_empty() {
            pending_blanks += 1;
            continue;
        }

        if pending_blanks > 0 {
            lines.push("");
            pending_blanks = 0;
        }
        if is_fence_line(line) {
            in_fence = true;
        }
        lines.push(line);
    }

    // Trailing blank lines are dropped; the caller trims the edges anyway
    lines.join("\n")
}

fn is_fence_line(line: &str) -> bool {
    line.trim_end_matches(FENCE_GUARD) == "```"
}
