//! Export tests for Markdown (tree → Markdown)
//!
//! These tests verify that markup fragments serialize to the exact Markdown
//! the editor persists.

use insta::assert_snapshot;
use prosemark_engine::format::Format;
use prosemark_engine::formats::markdown::{MarkdownFormat, FENCE_GUARD};
use prosemark_engine::tree::{Element, ElementKind, MarkupNode};
use prosemark_engine::tree_to_markdown;

fn text(content: &str) -> MarkupNode {
    MarkupNode::text(content)
}

fn element(kind: ElementKind, children: Vec<MarkupNode>) -> MarkupNode {
    Element::new(kind).with_children(children).into()
}

#[test]
fn test_heading_paragraph_quote_document() {
    let fragment = vec![
        element(ElementKind::Heading(1), vec![text("Title")]),
        element(
            ElementKind::Paragraph,
            vec![
                text("Some "),
                element(ElementKind::Bold, vec![text("bold")]),
                text(" and "),
                element(ElementKind::Italic, vec![text("italic")]),
                text(" text."),
            ],
        ),
        element(ElementKind::Blockquote, vec![text("a quote")]),
    ];

    assert_eq!(
        tree_to_markdown(&fragment),
        "# Title\n\nSome **bold** and *italic* text.\n\n> a quote"
    );
}

#[test]
fn test_inline_markup_rendering() {
    let fragment = vec![element(
        ElementKind::Paragraph,
        vec![
            element(ElementKind::Bold, vec![text("b")]),
            text(" "),
            element(ElementKind::Italic, vec![text("i")]),
            text(" "),
            element(ElementKind::Underline, vec![text("u")]),
            text(" "),
            element(ElementKind::InlineCode, vec![text("c")]),
        ],
    )];

    assert_eq!(tree_to_markdown(&fragment), "**b** *i* __u__ `c`");
}

#[test]
fn test_link_with_href() {
    let fragment = vec![element(
        ElementKind::Paragraph,
        vec![
            text("see "),
            Element::new(ElementKind::Link)
                .with_attribute("href", "https://example.com/a?b=c")
                .with_children(vec![text("here")])
                .into(),
        ],
    )];

    assert_eq!(
        tree_to_markdown(&fragment),
        "see [here](https://example.com/a?b=c)"
    );
}

#[test]
fn test_code_block_emits_guarded_fences() {
    let fragment = vec![
        element(ElementKind::CodeBlock, vec![text("let x = 1;")]),
        element(ElementKind::Paragraph, vec![text("after")]),
    ];

    let expected = format!("```\nlet x = 1;\n```{FENCE_GUARD}\n\nafter");
    assert_eq!(tree_to_markdown(&fragment), expected);
}

#[test]
fn test_code_block_metacharacters_stay_verbatim() {
    let fragment = vec![element(
        ElementKind::CodeBlock,
        vec![text("a *b* _c_ `d` [e](f)")],
    )];

    let md = tree_to_markdown(&fragment);
    assert!(md.contains("a *b* _c_ `d` [e](f)"));
}

#[test]
fn test_ordered_list_is_renumbered_by_position() {
    let fragment = vec![element(
        ElementKind::OrderedList,
        vec![
            element(ElementKind::ListItem, vec![text("x")]),
            element(ElementKind::ListItem, vec![text("y")]),
        ],
    )];

    assert_eq!(tree_to_markdown(&fragment), "1. x\n2. y");
}

#[test]
fn test_deeply_nested_tree_serializes_without_overflow() {
    let mut node = text("leaf");
    for _ in 0..200 {
        node = element(ElementKind::Bold, vec![node]);
    }
    let fragment = vec![element(ElementKind::Paragraph, vec![node])];

    let md = tree_to_markdown(&fragment);
    assert!(md.contains("leaf"));
}

#[test]
fn test_format_trait_serialize_path() {
    let fragment = vec![element(ElementKind::Heading(2), vec![text("Hi")])];
    let md = MarkdownFormat
        .serialize(&fragment)
        .expect("markdown serialization is total");
    assert_eq!(md, "## Hi");
}

#[test]
fn test_document_snapshot() {
    let fragment = vec![
        element(ElementKind::Heading(2), vec![text("Notes")]),
        element(
            ElementKind::Paragraph,
            vec![
                text("All of "),
                element(ElementKind::Bold, vec![text("this")]),
                text(" survives."),
            ],
        ),
        element(ElementKind::Blockquote, vec![text("even quotes")]),
        element(
            ElementKind::UnorderedList,
            vec![
                element(ElementKind::ListItem, vec![text("one")]),
                element(ElementKind::ListItem, vec![text("two")]),
            ],
        ),
    ];

    assert_snapshot!(tree_to_markdown(&fragment), @r"
    ## Notes

    All of **this** survives.

    > even quotes

    - one
    - two
    ");
}
