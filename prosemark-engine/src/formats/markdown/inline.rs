//! Inline substitution pass (second parse pass)
//!
//! Rewrites one line of block payload into text and inline element nodes.
//! The scanner repeatedly takes the leftmost match of any pattern in the
//! remaining plain text; at equal start positions the earlier pattern in
//! [`PATTERNS`] order wins. Matched content is rescanned with the same rules,
//! except inline code, whose content is a raw zone and stays literal.
//!
//! Nesting cannot run away: every pattern's non-greedy content excludes its
//! own delimiter, and the exclusion carries into nested content, so a chain
//! can use each pattern at most once regardless of input size.

use crate::tree::{Element, ElementKind, MarkupNode};
use once_cell::sync::Lazy;
use regex::Regex;

/// Triple emphasis first, so `***x***` is not read as `**` + `*x` + `**`.
static TRIPLE_EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static UNDERLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.*?)__").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

#[derive(Clone, Copy)]
enum Pattern {
    TripleEmphasis,
    Bold,
    Italic,
    Underline,
    InlineCode,
    Link,
}

static PATTERNS: [(Pattern, &Lazy<Regex>); 6] = [
    (Pattern::TripleEmphasis, &TRIPLE_EMPHASIS),
    (Pattern::Bold, &BOLD),
    (Pattern::Italic, &ITALIC),
    (Pattern::Underline, &UNDERLINE),
    (Pattern::InlineCode, &INLINE_CODE),
    (Pattern::Link, &LINK),
];

/// Parse one line of payload text into inline nodes.
///
/// Total: anything that matches no pattern stays literal text.
pub(crate) fn parse_inline(text: &str) -> Vec<MarkupNode> {
    let mut nodes = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match earliest_match(rest) {
            Some((start, end, node)) => {
                if start > 0 {
                    nodes.push(MarkupNode::text(&rest[..start]));
                }
                nodes.push(node);
                rest = &rest[end..];
            }
            None => {
                nodes.push(MarkupNode::text(rest));
                break;
            }
        }
    }

    nodes
}

/// Leftmost match of any pattern; pattern order breaks ties at equal starts.
fn earliest_match(text: &str) -> Option<(usize, usize, MarkupNode)> {
    let mut winner: Option<(Pattern, regex::Captures)> = None;
    let mut winner_start = usize::MAX;

    for (pattern, regex) in PATTERNS {
        if let Some(captures) = regex.captures(text) {
            if let Some(whole) = captures.get(0) {
                if whole.start() < winner_start {
                    winner_start = whole.start();
                    winner = Some((pattern, captures));
                }
            }
        }
    }

    let (pattern, captures) = winner?;
    let whole = captures.get(0)?;
    Some((whole.start(), whole.end(), build_node(pattern, &captures)))
}

fn build_node(pattern: Pattern, captures: &regex::Captures) -> MarkupNode {
    let content = captures.get(1).map(|m| m.as_str()).unwrap_or("");

    match pattern {
        Pattern::TripleEmphasis => {
            let italic = Element::new(ElementKind::Italic).with_children(parse_inline(content));
            Element::new(ElementKind::Bold)
                .with_children(vec![italic.into()])
                .into()
        }
        Pattern::Bold => wrap(ElementKind::Bold, content),
        Pattern::Italic => wrap(ElementKind::Italic, content),
        Pattern::Underline => wrap(ElementKind::Underline, content),
        Pattern::InlineCode => {
            // Raw zone: backtick content is literal, nothing nests inside
            Element::new(ElementKind::InlineCode)
                .with_children(vec![MarkupNode::text(content)])
                .into()
        }
        Pattern::Link => {
            let href = captures.get(2).map(|m| m.as_str()).unwrap_or("");
            Element::new(ElementKind::Link)
                .with_attribute("href", href)
                .with_children(parse_inline(content))
                .into()
        }
    }
}

fn wrap(kind: ElementKind, content: &str) -> MarkupNode {
    Element::new(kind)
        .with_children(parse_inline(content))
        .into()
}
