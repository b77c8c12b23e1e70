//! Markdown parsing (Markdown → markup tree)
//!
//! Two passes over the source:
//!
//! 1. A line-oriented block pass that classifies each line (fence, heading,
//!    quote, list item, blank, prose) and groups consecutive lines of the
//!    same shape into blocks. Fenced code is collected verbatim and is never
//!    classified line by line.
//! 2. An inline pass ([`super::inline`]) that runs over the text of every
//!    non-code block and produces emphasis, code span, and link elements.
//!
//! The parser is total: any input produces a fragment. Lines that match no
//! construct become paragraph text, and an unterminated fence degrades to a
//! literal paragraph holding the buffered lines.

use once_cell::sync::Lazy;
use regex::Regex;

use super::inline::parse_inline;
use super::FENCE_GUARD;
use crate::tree::{Element, ElementKind, MarkupNode};

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>\s+(.+)$").unwrap());
static UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*+]\s+(.+)$").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\.\s+(.+)$").unwrap());

/// One grouped run of lines, produced by the block pass.
enum Block {
    /// Consecutive prose lines. `literal` suppresses the inline pass, which
    /// is how an unterminated fence keeps its content verbatim.
    Paragraph { lines: Vec<String>, literal: bool },
    Heading { level: u8, text: String },
    Quote(Vec<String>),
    List { ordered: bool, items: Vec<String> },
    Code(Vec<String>),
    /// Blank lines terminate the block being grouped. Dropped at assembly.
    Blank,
}

/// Parse Markdown source into a markup fragment.
///
/// Whitespace-only input yields an empty fragment. Everything else yields at
/// least one node; there is no error path.
pub fn parse_from_markdown(source: &str) -> Vec<MarkupNode> {
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");
    if normalized.trim().is_empty() {
        return Vec::new();
    }

    let blocks = group_blocks(&normalized);
    assemble(blocks)
}

/// Block pass: classify lines and group runs of the same shape.
fn group_blocks(source: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    // Holds the opener line while inside a fence. Content lines are buffered
    // raw into the trailing Code block until the closing fence or end of
    // input; the opener is kept so an unterminated fence can be replayed as
    // literal text.
    let mut open_fence: Option<String> = None;

    for raw_line in source.split('\n') {
        // The serializer plants a guard character after closing fences so
        // adjacent constructs survive blank-line cleanup. It carries no
        // content and is stripped before classification.
        let line: String = raw_line.chars().filter(|&c| c != FENCE_GUARD).collect();

        if open_fence.is_some() {
            if line.trim() == "```" {
                open_fence = None;
            } else if let Some(Block::Code(lines)) = blocks.last_mut() {
                // No guard stripping, no classification, no trimming.
                lines.push(raw_line.to_string());
            }
            continue;
        }

        if line.trim_start().starts_with("```") {
            open_fence = Some(line);
            blocks.push(Block::Code(Vec::new()));
            continue;
        }

        if let Some(caps) = HEADING.captures(&line) {
            let level = caps[1].len() as u8;
            blocks.push(Block::Heading {
                level,
                text: caps[2].to_string(),
            });
            continue;
        }

        if let Some(caps) = QUOTE.captures(&line) {
            let text = caps[1].trim().to_string();
            if let Some(Block::Quote(lines)) = blocks.last_mut() {
                lines.push(text);
            } else {
                blocks.push(Block::Quote(vec![text]));
            }
            continue;
        }

        if let Some(caps) = UNORDERED_ITEM.captures(&line) {
            push_list_item(&mut blocks, false, caps[1].trim().to_string());
            continue;
        }

        if let Some(caps) = ORDERED_ITEM.captures(&line) {
            // The written number is ignored; ordered lists renumber by
            // position on the way back out.
            push_list_item(&mut blocks, true, caps[1].trim().to_string());
            continue;
        }

        if line.trim().is_empty() {
            blocks.push(Block::Blank);
            continue;
        }

        let text = line.trim().to_string();
        match blocks.last_mut() {
            Some(Block::Paragraph {
                lines,
                literal: false,
            }) => lines.push(text),
            _ => blocks.push(Block::Paragraph {
                lines: vec![text],
                literal: false,
            }),
        }
    }

    // End of input with the fence still open: the construct never completed,
    // so the opener and everything buffered degrade to one literal paragraph.
    if let Some(opener) = open_fence {
        let mut lines = vec![opener.trim().to_string()];
        if let Some(Block::Code(buffered)) = blocks.last_mut() {
            lines.append(buffered);
        }
        blocks.pop();
        blocks.push(Block::Paragraph {
            lines,
            literal: true,
        });
    }

    blocks
}

/// Append an item to the trailing list block when the kind matches,
/// otherwise start a new list. A `-` item directly after a `1.` item starts
/// a fresh unordered list rather than joining the ordered one.
fn push_list_item(blocks: &mut Vec<Block>, ordered: bool, item: String) {
    if let Some(Block::List {
        ordered: current,
        items,
    }) = blocks.last_mut()
    {
        if *current == ordered {
            items.push(item);
            return;
        }
    }
    blocks.push(Block::List {
        ordered,
        items: vec![item],
    });
}

/// Assembly pass: map grouped blocks onto tree nodes.
fn assemble(blocks: Vec<Block>) -> Vec<MarkupNode> {
    let mut nodes = Vec::new();

    for block in blocks {
        match block {
            Block::Blank => {}
            Block::Paragraph { lines, literal } => {
                let children = if literal {
                    literal_lines(&lines)
                } else {
                    inline_lines(&lines)
                };
                nodes.push(
                    Element::new(ElementKind::Paragraph)
                        .with_children(children)
                        .into(),
                );
            }
            Block::Heading { level, text } => {
                nodes.push(
                    Element::new(ElementKind::Heading(level))
                        .with_children(parse_inline(text.trim()))
                        .into(),
                );
            }
            Block::Quote(lines) => {
                nodes.push(
                    Element::new(ElementKind::Blockquote)
                        .with_children(inline_lines(&lines))
                        .into(),
                );
            }
            Block::List { ordered, items } => {
                let kind = if ordered {
                    ElementKind::OrderedList
                } else {
                    ElementKind::UnorderedList
                };
                let children = items
                    .into_iter()
                    .map(|item| {
                        Element::new(ElementKind::ListItem)
                            .with_children(parse_inline(&item))
                            .into()
                    })
                    .collect();
                nodes.push(Element::new(kind).with_children(children).into());
            }
            Block::Code(lines) => {
                let text = lines.join("\n");
                nodes.push(
                    Element::new(ElementKind::CodeBlock)
                        .with_children(vec![MarkupNode::Text(text)])
                        .into(),
                );
            }
        }
    }

    nodes
}

/// Inline-parse each line and rejoin them with explicit line breaks.
fn inline_lines(lines: &[String]) -> Vec<MarkupNode> {
    let mut children = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            children.push(Element::new(ElementKind::LineBreak).into());
        }
        children.extend(parse_inline(line));
    }
    children
}

/// Like [`inline_lines`] but the text stays literal. Used for degraded
/// constructs whose content must not sprout markup.
fn literal_lines(lines: &[String]) -> Vec<MarkupNode> {
    let mut children = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            children.push(Element::new(ElementKind::LineBreak).into());
        }
        children.push(MarkupNode::text(line));
    }
    children
}
