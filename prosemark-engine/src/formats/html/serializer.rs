//! HTML serialization (markup tree → HTML)
//!
//! Converts fragments to HTML5 markup.
//! Pipeline: markup tree → RcDom → HTML string

use crate::error::FormatError;
use crate::tree::{self, Element, ElementKind, MarkupNode, MAX_TREE_DEPTH};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Serialize a fragment to HTML.
///
/// With `standalone` set the markup is wrapped in a minimal HTML5 document;
/// otherwise only the fragment itself is produced.
pub fn serialize_to_html(
    fragment: &[MarkupNode],
    standalone: bool,
) -> Result<String, FormatError> {
    // The DOM build recurses per nesting level; refuse pathological trees
    // instead of risking the call stack.
    if tree::max_depth(fragment) > MAX_TREE_DEPTH {
        return Err(FormatError::SerializationError(format!(
            "fragment nests deeper than {MAX_TREE_DEPTH} levels"
        )));
    }

    let dom = build_dom(fragment);
    let html = serialize_dom(&dom)?;

    if standalone {
        Ok(wrap_in_document(&html))
    } else {
        Ok(html)
    }
}

/// HTML tag emitted for an element kind.
pub(crate) fn tag_name(kind: ElementKind) -> String {
    match kind {
        ElementKind::Paragraph => "p".to_string(),
        ElementKind::LineBreak => "br".to_string(),
        ElementKind::Heading(level) => format!("h{}", level.clamp(1, 6)),
        ElementKind::Bold => "strong".to_string(),
        ElementKind::Italic => "em".to_string(),
        ElementKind::Underline => "u".to_string(),
        ElementKind::InlineCode => "code".to_string(),
        ElementKind::CodeBlock => "pre".to_string(),
        ElementKind::Blockquote => "blockquote".to_string(),
        ElementKind::UnorderedList => "ul".to_string(),
        ElementKind::OrderedList => "ol".to_string(),
        ElementKind::ListItem => "li".to_string(),
        ElementKind::Link => "a".to_string(),
        ElementKind::Container => "div".to_string(),
    }
}

/// Build an RcDom whose document children are the fragment's nodes.
fn build_dom(fragment: &[MarkupNode]) -> RcDom {
    let dom = RcDom::default();
    for node in fragment {
        dom.document.children.borrow_mut().push(build_node(node));
    }
    dom
}

fn build_node(node: &MarkupNode) -> Handle {
    match node {
        MarkupNode::Text(content) => create_text(content),
        MarkupNode::Element(element) => build_element(element),
    }
}

fn build_element(element: &Element) -> Handle {
    if element.kind == ElementKind::CodeBlock {
        // Code blocks nest a code tag under pre and take their content
        // verbatim, with line break children rendered as newlines.
        let pre = create_element("pre", &element.attributes);
        let code = create_element("code", &[]);
        let text = create_text(&tree::flatten_text(&element.children));
        code.children.borrow_mut().push(text);
        pre.children.borrow_mut().push(code);
        return pre;
    }

    let tag = tag_name(element.kind);
    let handle = create_element(&tag, &element.attributes);
    for child in &element.children {
        let built = build_node(child);
        handle.children.borrow_mut().push(built);
    }
    handle
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: &[(String, String)]) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name.as_str())),
            value: value.clone().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the DOM to an HTML string (just the fragment content)
fn serialize_dom(dom: &RcDom) -> Result<String, FormatError> {
    let mut output = Vec::new();

    // Use TraversalScope::IncludeNode to serialize each top-level node AND
    // its children.
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in dom.document.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Wrap fragment markup in a minimal standalone HTML document
fn wrap_in_document(body_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
</head>
<body>
{body_html}
</body>
</html>"#
    )
}
