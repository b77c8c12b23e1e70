//! Policy enforcement through the public `sanitize` facade.
//!
//! These tests treat the sanitizer as a black box: fragment in, fragment
//! out. Which backend did the work is irrelevant here, so everything in
//! this file must pass with the `html-sanitizer` feature on or off.

use prosemark_engine::tree::{flatten_text, max_depth, Element, ElementKind, MarkupNode};
use prosemark_engine::{sanitize, SanitizePolicy};

use crate::common;

// ============================================================================
// Helpers
// ============================================================================

/// A deliberately tight policy: three kinds, no attributes at all.
fn restricted_policy() -> SanitizePolicy {
    let mut policy = SanitizePolicy::default();
    policy.allowed_kinds = [ElementKind::Paragraph, ElementKind::Bold, ElementKind::Link]
        .into_iter()
        .collect();
    policy.allowed_attributes.clear();
    policy
}

// ============================================================================
// Whitelist enforcement
// ============================================================================

#[test]
fn test_disallowed_wrapper_is_dropped_but_its_content_survives() {
    let fragment = vec![common::paragraph(vec![
        Element::new(ElementKind::Underline)
            .with_children(vec![common::text("click")])
            .into(),
    ])];

    let clean = sanitize(&fragment, &restricted_policy());

    assert_eq!(clean, vec![common::paragraph(vec![common::text("click")])]);
}

#[test]
fn test_attributes_outside_the_allow_list_are_dropped() {
    let fragment = vec![common::paragraph(vec![
        Element::new(ElementKind::Link)
            .with_attribute("href", "https://example.com")
            .with_children(vec![common::text("click")])
            .into(),
    ])];

    let clean = sanitize(&fragment, &restricted_policy());

    // The link itself is allowed, so the element survives, but the
    // restricted policy admits no attributes whatsoever.
    let expected = vec![common::paragraph(vec![
        Element::new(ElementKind::Link)
            .with_children(vec![common::text("click")])
            .into(),
    ])];
    assert_eq!(clean, expected);
}

#[test]
fn test_nested_disallowed_wrappers_unwrap_all_the_way_down() {
    let fragment = vec![common::paragraph(vec![
        Element::new(ElementKind::Italic)
            .with_children(vec![
                Element::new(ElementKind::Underline)
                    .with_children(vec![common::text("deep")])
                    .into(),
            ])
            .into(),
    ])];

    let clean = sanitize(&fragment, &restricted_policy());

    assert_eq!(clean, vec![common::paragraph(vec![common::text("deep")])]);
}

#[test]
fn test_every_editor_kind_passes_the_default_policy() {
    let fragment = common::editor_fragment();

    let clean = sanitize(&fragment, &SanitizePolicy::default());

    assert_eq!(clean, fragment);
}

#[test]
fn test_event_handler_attributes_are_always_dropped() {
    // "onclick" is refused even though the default policy is otherwise
    // generous with attributes.
    let fragment = vec![common::paragraph(vec![
        Element::new(ElementKind::Link)
            .with_attribute("href", "https://example.com")
            .with_attribute("onclick", "steal()")
            .with_children(vec![common::text("safe link")])
            .into(),
    ])];

    let clean = sanitize(&fragment, &SanitizePolicy::default());

    let expected = vec![common::paragraph(vec![
        Element::new(ElementKind::Link)
            .with_attribute("href", "https://example.com")
            .with_children(vec![common::text("safe link")])
            .into(),
    ])];
    assert_eq!(clean, expected);
}

#[test]
fn test_executable_url_schemes_are_stripped() {
    let fragment = vec![common::paragraph(vec![
        Element::new(ElementKind::Link)
            .with_attribute("href", "javascript:alert(1)")
            .with_children(vec![common::text("bad")])
            .into(),
        common::text(" and "),
        Element::new(ElementKind::Link)
            .with_attribute("href", "mailto:team@example.com")
            .with_children(vec![common::text("good")])
            .into(),
    ])];

    let clean = sanitize(&fragment, &SanitizePolicy::default());

    let expected = vec![common::paragraph(vec![
        Element::new(ElementKind::Link)
            .with_children(vec![common::text("bad")])
            .into(),
        common::text(" and "),
        Element::new(ElementKind::Link)
            .with_attribute("href", "mailto:team@example.com")
            .with_children(vec![common::text("good")])
            .into(),
    ])];
    assert_eq!(clean, expected);
}

#[test]
fn test_heading_levels_survive_within_the_allowed_range() {
    let fragment = vec![
        Element::new(ElementKind::Heading(1))
            .with_children(vec![common::text("top")])
            .into(),
        Element::new(ElementKind::Heading(6))
            .with_children(vec![common::text("fine print")])
            .into(),
    ];

    let clean = sanitize(&fragment, &SanitizePolicy::default());

    assert_eq!(clean, fragment);
}

// ============================================================================
// Totality and idempotence
// ============================================================================

#[test]
fn test_sanitize_is_idempotent_on_clean_input() {
    let policy = SanitizePolicy::default();
    let once = sanitize(&common::editor_fragment(), &policy);
    let twice = sanitize(&once, &policy);

    assert_eq!(once, twice);
}

#[test]
fn test_sanitize_is_idempotent_on_dirty_input() {
    let policy = restricted_policy();
    let fragment = vec![
        Element::new(ElementKind::Blockquote)
            .with_children(vec![common::paragraph(vec![
                Element::new(ElementKind::Link)
                    .with_attribute("href", "javascript:boom()")
                    .with_attribute("onclick", "boom()")
                    .with_children(vec![common::text("press")])
                    .into(),
            ])])
            .into(),
        common::paragraph(vec![
            Element::new(ElementKind::InlineCode)
                .with_children(vec![common::text("rm -rf")])
                .into(),
        ]),
    ];

    let once = sanitize(&fragment, &policy);
    let twice = sanitize(&once, &policy);

    assert_eq!(once, twice);
}

#[test]
fn test_the_input_fragment_is_left_untouched() {
    let fragment = common::editor_fragment();
    let before = fragment.clone();

    let _ = sanitize(&fragment, &restricted_policy());

    assert_eq!(fragment, before);
}

#[test]
fn test_adversarial_nesting_cannot_crash_the_facade() {
    let mut node: MarkupNode = common::text("leaf");
    for _ in 0..300 {
        node = Element::new(ElementKind::Bold)
            .with_children(vec![node])
            .into();
    }
    let fragment = vec![node];

    let clean = sanitize(&fragment, &SanitizePolicy::default());

    // Bold is allowed, so the tower survives intact. What matters is that
    // we got here without blowing the stack.
    assert_eq!(max_depth(&clean), 300);
    assert_eq!(flatten_text(&clean), "leaf");
}

#[test]
fn test_empty_fragment_stays_empty() {
    let clean = sanitize(&[], &SanitizePolicy::default());
    assert!(clean.is_empty());
}
