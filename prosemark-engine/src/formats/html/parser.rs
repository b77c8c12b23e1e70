//! HTML parsing (HTML → markup tree)
//!
//! Converts HTML5 markup to markup fragments.
//! Pipeline: HTML string → RcDom → markup tree
//!
//! The source is parsed as a full document (html5ever synthesizes the
//! `html`/`head`/`body` scaffolding) and the fragment is read back from the
//! body, the same route ammonia takes. Import is lenient: foreign
//! vocabulary degrades instead of failing, so this path never errors.

use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::tree::{Element, ElementKind, MarkupNode, MAX_TREE_DEPTH};

/// Parse HTML into a markup fragment.
///
/// Unknown elements are spliced (children lifted into their place),
/// `script`/`style`/`template` subtrees and comments are dropped, and
/// whitespace-only text that separates block-level content is ignored.
pub fn parse_from_html(source: &str) -> Vec<MarkupNode> {
    let parser = parse_document(
        RcDom::default(),
        ParseOpts {
            tree_builder: TreeBuilderOpts {
                drop_doctype: true,
                scripting_enabled: false,
                ..Default::default()
            },
            ..Default::default()
        },
    );
    let dom = parser.one(source);

    let body = find_child_element(&dom.document, "html")
        .and_then(|html| find_child_element(&html, "body"));

    match body {
        Some(body) => convert_children(&body, 0),
        None => Vec::new(),
    }
}

/// Tree element kind for an HTML tag, if the tag is one we understand.
/// `pre` is absent: it gets whole-subtree treatment before this lookup.
fn kind_for_tag(tag: &str) -> Option<ElementKind> {
    match tag {
        "p" => Some(ElementKind::Paragraph),
        "br" => Some(ElementKind::LineBreak),
        "h1" => Some(ElementKind::Heading(1)),
        "h2" => Some(ElementKind::Heading(2)),
        "h3" => Some(ElementKind::Heading(3)),
        "h4" => Some(ElementKind::Heading(4)),
        "h5" => Some(ElementKind::Heading(5)),
        "h6" => Some(ElementKind::Heading(6)),
        "strong" | "b" => Some(ElementKind::Bold),
        "em" | "i" => Some(ElementKind::Italic),
        "u" => Some(ElementKind::Underline),
        "code" => Some(ElementKind::InlineCode),
        "blockquote" => Some(ElementKind::Blockquote),
        "ul" => Some(ElementKind::UnorderedList),
        "ol" => Some(ElementKind::OrderedList),
        "li" => Some(ElementKind::ListItem),
        "a" => Some(ElementKind::Link),
        "div" => Some(ElementKind::Container),
        _ => None,
    }
}

/// Convert a DOM node's children, then prune layout whitespace.
///
/// Whitespace-only text is pruned when it sits next to block-level content
/// (it is indentation, not prose) and always inside list containers, whose
/// only meaningful children are items.
fn convert_children(parent: &Handle, depth: usize) -> Vec<MarkupNode> {
    let mut nodes = Vec::new();
    for child in parent.children.borrow().iter() {
        convert_node(child, depth, &mut nodes);
    }

    let list_parent = matches!(
        &parent.data,
        NodeData::Element { name, .. } if matches!(name.local.as_ref(), "ul" | "ol")
    );
    if list_parent || nodes.iter().any(is_block_node) {
        nodes.retain(|node| !is_layout_whitespace(node));
    }

    nodes
}

fn convert_node(node: &Handle, depth: usize, out: &mut Vec<MarkupNode>) {
    match &node.data {
        NodeData::Text { contents } => {
            out.push(MarkupNode::Text(contents.borrow().to_string()));
        }

        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.as_ref();

            // Non-content subtrees disappear entirely.
            if matches!(tag, "script" | "style" | "template") {
                return;
            }

            // Code blocks swallow their whole subtree as verbatim text.
            if tag == "pre" {
                let text = collect_text(node);
                out.push(
                    Element::new(ElementKind::CodeBlock)
                        .with_children(vec![MarkupNode::Text(text)])
                        .into(),
                );
                return;
            }

            // The conversion recurses per element level. Past the depth
            // bound the subtree degrades to its text content, collected
            // without recursion.
            if depth >= MAX_TREE_DEPTH {
                let text = collect_text(node);
                if !text.is_empty() {
                    out.push(MarkupNode::Text(text));
                }
                return;
            }

            match kind_for_tag(tag) {
                Some(kind) => {
                    let mut element = Element::new(kind);
                    for attr in attrs.borrow().iter() {
                        element.set_attribute(attr.name.local.as_ref(), &*attr.value);
                    }
                    element.children = convert_children(node, depth + 1);
                    out.push(element.into());
                }
                None => {
                    // Foreign vocabulary: splice the children into place.
                    out.extend(convert_children(node, depth + 1));
                }
            }
        }

        // Comments, doctypes and processing instructions carry no content.
        _ => {}
    }
}

/// Character data of a DOM subtree, with `br` contributing a newline and
/// non-content subtrees skipped. Walks with an explicit stack.
fn collect_text(node: &Handle) -> String {
    let mut out = String::new();
    let mut stack: Vec<Handle> = node.children.borrow().iter().rev().cloned().collect();

    while let Some(current) = stack.pop() {
        match &current.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { name, .. } => match name.local.as_ref() {
                "br" => out.push('\n'),
                "script" | "style" | "template" => {}
                _ => stack.extend(current.children.borrow().iter().rev().cloned()),
            },
            _ => {}
        }
    }

    out
}

fn find_child_element(parent: &Handle, tag: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| {
            matches!(&child.data, NodeData::Element { name, .. } if name.local.as_ref() == tag)
        })
        .cloned()
}

fn is_block_node(node: &MarkupNode) -> bool {
    match node {
        MarkupNode::Element(element) => matches!(
            element.kind,
            ElementKind::Paragraph
                | ElementKind::Heading(_)
                | ElementKind::CodeBlock
                | ElementKind::Blockquote
                | ElementKind::UnorderedList
                | ElementKind::OrderedList
                | ElementKind::ListItem
                | ElementKind::Container
        ),
        MarkupNode::Text(_) => false,
    }
}

fn is_layout_whitespace(node: &MarkupNode) -> bool {
    matches!(node, MarkupNode::Text(text) if text.trim().is_empty())
}
