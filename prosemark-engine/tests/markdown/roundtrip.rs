//! Round-trip tests (tree → Markdown → tree, and back again)
//!
//! Persisted Markdown is the storage format, so save followed by load must
//! reproduce the tree, and load followed by save must reproduce the text
//! modulo trailing-newline normalization.

use crate::common::{editor_fragment, element, text};
use prosemark_engine::formats::markdown::FENCE_GUARD;
use prosemark_engine::tree::ElementKind;
use prosemark_engine::{markdown_to_tree, tree_to_markdown};

#[test]
fn test_document_survives_text_round_trip() {
    let md = "# Title\n\nSome **bold** and *italic* text.\n\n> a quote\n";
    let back = tree_to_markdown(&markdown_to_tree(md));

    assert_eq!(back, md.trim_end());
}

#[test]
fn test_list_round_trip() {
    let back = tree_to_markdown(&markdown_to_tree("- a\n- b\n"));
    assert_eq!(back, "- a\n- b");
}

#[test]
fn test_ordered_list_round_trip_renumbers() {
    assert_eq!(tree_to_markdown(&markdown_to_tree("1. x\n2. y\n")), "1. x\n2. y");
    // Whatever numbers the source used, output numbering is positional
    assert_eq!(tree_to_markdown(&markdown_to_tree("1. x\n7. y\n")), "1. x\n2. y");
}

#[test]
fn test_editor_fragment_round_trips_structurally() {
    let fragment = editor_fragment();
    let back = markdown_to_tree(&tree_to_markdown(&fragment));

    assert_eq!(back, fragment);
}

#[test]
fn test_code_block_round_trip_is_verbatim() {
    let code = "for (i=0;i<3;i++) *p;\n\nx = a[0] * b[1];\n`tick` and _under_";
    let fragment = vec![element(ElementKind::CodeBlock, vec![text(code)])];

    let back = markdown_to_tree(&tree_to_markdown(&fragment));
    assert_eq!(back, fragment);
}

#[test]
fn test_guard_character_does_not_leak_into_trees() {
    let fragment = vec![
        element(ElementKind::CodeBlock, vec![text("code")]),
        element(ElementKind::Paragraph, vec![text("after")]),
    ];
    let md = tree_to_markdown(&fragment);
    assert!(md.contains(FENCE_GUARD));

    let back = markdown_to_tree(&md);
    assert_eq!(back, fragment);
    let json = serde_json::to_string(&back).unwrap();
    assert!(!json.contains(FENCE_GUARD));
}

#[test]
fn test_hand_typed_markdown_stabilizes_after_one_pass() {
    // Arbitrary input may normalize on the first save; after that the text
    // is a fixed point of load-then-save.
    let inputs = [
        "#No space heading\n\n\n\nlots   of blanks\n",
        "* star\n- dash\n+ plus\n",
        "> quote\nplain continuation\n",
        "```\nunterminated fence\n",
    ];

    for input in inputs {
        let once = tree_to_markdown(&markdown_to_tree(input));
        let twice = tree_to_markdown(&markdown_to_tree(&once));
        assert_eq!(twice, once, "failed to stabilize for {input:?}");
    }
}
