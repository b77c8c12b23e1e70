//! Import tests for HTML (HTML → tree)
//!
//! These tests verify that pasted or interchange HTML converts to the markup
//! vocabulary, including the repair behavior inherited from the HTML parser.

use prosemark_engine::tree::{flatten_text, Element, ElementKind, MarkupNode};
use prosemark_engine::{html_to_tree, markdown_to_tree, tree_to_markdown};

fn text(content: &str) -> MarkupNode {
    MarkupNode::text(content)
}

fn element(kind: ElementKind, children: Vec<MarkupNode>) -> MarkupNode {
    Element::new(kind).with_children(children).into()
}

// ============================================================================
// STRUCTURE MAPPING
// ============================================================================

#[test]
fn test_basic_structure_import() {
    let tree = html_to_tree("<h1>Title</h1><p>Some <b>bold</b> text.</p>");

    assert_eq!(
        tree,
        vec![
            element(ElementKind::Heading(1), vec![text("Title")]),
            element(
                ElementKind::Paragraph,
                vec![
                    text("Some "),
                    element(ElementKind::Bold, vec![text("bold")]),
                    text(" text."),
                ]
            ),
        ]
    );
}

#[test]
fn test_presentational_aliases_normalize() {
    let tree = html_to_tree("<p><b>b</b> <i>i</i></p>");

    assert_eq!(
        tree,
        vec![element(
            ElementKind::Paragraph,
            vec![
                element(ElementKind::Bold, vec![text("b")]),
                text(" "),
                element(ElementKind::Italic, vec![text("i")]),
            ]
        )]
    );
}

#[test]
fn test_pre_imports_as_code_block() {
    let tree = html_to_tree("<pre><code>let a = 1;\nlet b = 2;</code></pre>");

    assert_eq!(
        tree,
        vec![element(
            ElementKind::CodeBlock,
            vec![text("let a = 1;\nlet b = 2;")]
        )]
    );
}

#[test]
fn test_unknown_wrappers_are_spliced_away() {
    let tree = html_to_tree("<p><span style=\"color:red\">hi</span> there</p>");

    assert_eq!(
        tree,
        vec![element(
            ElementKind::Paragraph,
            vec![text("hi"), text(" there")]
        )]
    );
}

#[test]
fn test_script_and_style_content_is_dropped() {
    let tree = html_to_tree("<script>alert(1)</script><p>safe</p><style>p{color:red}</style>");

    assert_eq!(tree, vec![element(ElementKind::Paragraph, vec![text("safe")])]);
}

#[test]
fn test_full_document_reads_body_only() {
    let html = "<!DOCTYPE html><html><head><title>t</title></head>\
                <body><p>content</p></body></html>";
    let tree = html_to_tree(html);

    assert_eq!(tree, vec![element(ElementKind::Paragraph, vec![text("content")])]);
}

#[test]
fn test_list_layout_whitespace_is_pruned() {
    let tree = html_to_tree("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>");

    assert_eq!(
        tree,
        vec![element(
            ElementKind::UnorderedList,
            vec![
                element(ElementKind::ListItem, vec![text("a")]),
                element(ElementKind::ListItem, vec![text("b")]),
            ]
        )]
    );
}

// ============================================================================
// REPAIR AND DEGRADE BEHAVIOR
// ============================================================================

#[test]
fn test_malformed_markup_is_repaired() {
    let tree = html_to_tree("<p>unclosed <em>emphasis");

    assert_eq!(
        tree,
        vec![element(
            ElementKind::Paragraph,
            vec![
                text("unclosed "),
                element(ElementKind::Italic, vec![text("emphasis")]),
            ]
        )]
    );
}

#[test]
fn test_empty_input_yields_empty_fragment() {
    assert_eq!(html_to_tree(""), vec![]);
}

#[test]
fn test_plain_text_input_survives() {
    let tree = html_to_tree("just words");
    assert_eq!(flatten_text(&tree), "just words");
}

// ============================================================================
// PIPELINE TESTS
// ============================================================================

#[test]
fn test_paste_pipeline_html_to_markdown() {
    let html = "<h2>Pasted</h2><p>Keep <strong>this</strong> and <em>that</em>.</p>\
                <ul><li>one</li><li>two</li></ul>";
    let md = tree_to_markdown(&html_to_tree(html));

    assert_eq!(md, "## Pasted\n\nKeep **this** and *that*.\n\n- one\n- two");
}

#[test]
fn test_paste_pipeline_is_stable_after_first_pass() {
    let html = "<div><p>boxed <u>deep</u></p></div><blockquote>said</blockquote>";
    let tree = html_to_tree(html);
    let md = tree_to_markdown(&tree);

    // Once in Markdown, load and save reach a fixed point
    let reparsed = markdown_to_tree(&md);
    assert_eq!(tree_to_markdown(&reparsed), md);
}
