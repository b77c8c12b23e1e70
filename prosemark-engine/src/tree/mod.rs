//! Core data structures for the markup tree.
//!
//! A tree is a fragment: a sequence of root-level [`MarkupNode`]s with no
//! mandatory document root. Elements carry a closed [`ElementKind`], an
//! ordered attribute list and child nodes. Everything the engine converts or
//! sanitizes is expressed in this vocabulary.

use serde::{Deserialize, Serialize};

/// A sequence of root-level nodes.
pub type Fragment = Vec<MarkupNode>;

/// A single node in a markup tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkupNode {
    /// A run of character data. Content is opaque: it is never re-scanned
    /// for markup once it lives in the tree.
    Text(String),
    /// A markup element.
    Element(Element),
}

/// A markup element: kind, ordered attributes, children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    /// Insertion-ordered attribute list with unique names.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
}

/// The closed set of element kinds the engine understands.
///
/// There is no "unknown" member: foreign vocabulary is either funneled to
/// [`ElementKind::Container`] or flattened to text at the HTML boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Paragraph,
    LineBreak,
    /// Heading with level 1..=6. Out-of-range levels are clamped on output.
    Heading(u8),
    Bold,
    Italic,
    Underline,
    InlineCode,
    /// Verbatim block. Canonically holds a single `Text` child whose content
    /// embeds literal newlines; serializers also accept `LineBreak` children.
    CodeBlock,
    Blockquote,
    UnorderedList,
    OrderedList,
    ListItem,
    /// Anchor; the target lives in the `href` attribute.
    Link,
    /// Generic block container with no Markdown syntax of its own.
    Container,
}

impl MarkupNode {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        MarkupNode::Text(content.into())
    }
}

impl From<Element> for MarkupNode {
    fn from(element: Element) -> Self {
        MarkupNode::Element(element)
    }
}

impl Element {
    /// Create an element with no attributes and no children.
    pub fn new(kind: ElementKind) -> Self {
        Element {
            kind,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style children assignment.
    pub fn with_children(mut self, children: Vec<MarkupNode>) -> Self {
        self.children = children;
        self
    }

    /// Builder-style attribute assignment (same semantics as [`Element::set_attribute`]).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, keeping names unique: a repeated name replaces the
    /// existing value in place (last write wins, position preserved).
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name, value)),
        }
    }
}

/// Element nesting depth past which a tree is treated as pathological.
///
/// Recursive walks (the DOM builders, the library sanitizer backend) refuse
/// trees deeper than this instead of risking the call stack; callers degrade
/// to an iterative path or report the tree as unconvertible.
pub const MAX_TREE_DEPTH: usize = 256;

/// Maximum element nesting depth across `nodes`.
///
/// A childless fragment of text nodes has depth zero; each level of element
/// nesting adds one. Walks with an explicit stack.
pub fn max_depth(nodes: &[MarkupNode]) -> usize {
    let mut deepest = 0;
    let mut stack: Vec<(&MarkupNode, usize)> = nodes.iter().map(|node| (node, 1)).collect();

    while let Some((node, depth)) = stack.pop() {
        if let MarkupNode::Element(element) = node {
            deepest = deepest.max(depth);
            stack.extend(element.children.iter().map(|child| (child, depth + 1)));
        }
    }

    deepest
}

/// Concatenated character data of a node list, in document order.
///
/// `LineBreak` contributes a newline; every other element contributes its
/// descendants' text. Walks with an explicit stack so deeply nested input
/// cannot overflow the call stack.
pub fn flatten_text(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    let mut stack: Vec<&MarkupNode> = nodes.iter().rev().collect();

    while let Some(node) = stack.pop() {
        match node {
            MarkupNode::Text(content) => out.push_str(content),
            MarkupNode::Element(element) if element.kind == ElementKind::LineBreak => {
                out.push('\n');
            }
            MarkupNode::Element(element) => {
                stack.extend(element.children.iter().rev());
            }
        }
    }

    out
}
