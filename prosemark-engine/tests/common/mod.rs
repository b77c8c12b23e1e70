//! Shared fragment builders for the integration tests.

use prosemark_engine::tree::{Element, ElementKind, MarkupNode};

pub fn text(content: &str) -> MarkupNode {
    MarkupNode::text(content)
}

pub fn element(kind: ElementKind, children: Vec<MarkupNode>) -> MarkupNode {
    Element::new(kind).with_children(children).into()
}

pub fn paragraph(children: Vec<MarkupNode>) -> MarkupNode {
    element(ElementKind::Paragraph, children)
}

/// A fragment exercising the full editor vocabulary.
///
/// Built to survive a Markdown round trip exactly: no adjacent text nodes,
/// no markup metacharacters in plain text, links carry only `href`.
pub fn editor_fragment() -> Vec<MarkupNode> {
    vec![
        element(ElementKind::Heading(1), vec![text("Editing Basics")]),
        element(
            ElementKind::Paragraph,
            vec![
                text("Start with "),
                element(ElementKind::Bold, vec![text("strong")]),
                text(" then "),
                element(ElementKind::Italic, vec![text("soft")]),
                text(" then "),
                element(ElementKind::Underline, vec![text("steady")]),
                text(" and "),
                element(ElementKind::InlineCode, vec![text("mono")]),
                text(" words."),
            ],
        ),
        element(
            ElementKind::Paragraph,
            vec![
                text("Visit "),
                Element::new(ElementKind::Link)
                    .with_attribute("href", "https://example.com")
                    .with_children(vec![text("the site")])
                    .into(),
                text(" for more."),
            ],
        ),
        element(
            ElementKind::CodeBlock,
            vec![text("fn main() {\n    println!(\"hi\");\n}")],
        ),
        element(ElementKind::Blockquote, vec![text("Quoted wisdom")]),
        element(
            ElementKind::UnorderedList,
            vec![
                element(ElementKind::ListItem, vec![text("alpha")]),
                element(ElementKind::ListItem, vec![text("beta")]),
            ],
        ),
        element(
            ElementKind::OrderedList,
            vec![
                element(ElementKind::ListItem, vec![text("first")]),
                element(ElementKind::ListItem, vec![text("second")]),
            ],
        ),
    ]
}
