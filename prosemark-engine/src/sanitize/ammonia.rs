//! Library-backed sanitation backend.
//!
//! Applies the tree filter, then routes the result through `ammonia` as
//! HTML so the fragment also gets the library's value-level hardening
//! (attribute escaping, URL scheme vetting) before being read back.
//!
//! The round through serialized HTML normalizes the fragment the way HTML
//! does: adjacent text runs merge and layout whitespace between blocks is
//! dropped. Content and structure of the whitelisted vocabulary are
//! preserved; for that vocabulary this backend and [`TreeSanitizer`]
//! (via the facade) are interchangeable.
//!
//! [`TreeSanitizer`]: crate::sanitize::TreeSanitizer

use std::collections::{HashMap, HashSet};

use ::ammonia::Builder;

use crate::error::FormatError;
use crate::formats::html::{parse_from_html, serialize_to_html, tag_name};
use crate::sanitize::tree::sanitize_nodes;
use crate::sanitize::{SanitizePolicy, Sanitizer};
use crate::tree::{self, ElementKind, MarkupNode, MAX_TREE_DEPTH};

/// The primary backend, delegating value-level work to `ammonia`.
pub struct AmmoniaSanitizer;

impl Sanitizer for AmmoniaSanitizer {
    fn name(&self) -> &str {
        "ammonia"
    }

    fn sanitize(
        &self,
        fragment: &[MarkupNode],
        policy: &SanitizePolicy,
    ) -> Result<Vec<MarkupNode>, FormatError> {
        // The HTML leg builds a DOM recursively; hand pathological depth to
        // the fallback instead.
        if tree::max_depth(fragment) > MAX_TREE_DEPTH {
            return Err(FormatError::SerializationError(format!(
                "fragment nests deeper than {MAX_TREE_DEPTH} levels"
            )));
        }

        let filtered = sanitize_nodes(fragment, policy);
        let html = serialize_to_html(&filtered, false)?;

        let tags = allowed_tags(policy);
        let attributes: HashSet<String> = policy
            .allowed_attributes
            .iter()
            .filter(|name| policy.allows_attribute(name))
            .cloned()
            .collect();

        let mut builder = Builder::default();
        builder
            .tags(tags.iter().map(String::as_str).collect())
            // Per-tag defaults would re-admit attributes the policy never
            // listed; the generic set is the whole policy.
            .tag_attributes(HashMap::new())
            .generic_attributes(attributes.iter().map(String::as_str).collect())
            .url_schemes(
                policy
                    .allowed_url_schemes
                    .iter()
                    .map(String::as_str)
                    .collect(),
            )
            .link_rel(None);

        let clean = builder.clean(&html).to_string();
        Ok(parse_from_html(&clean))
    }
}

/// HTML tags the library may keep, derived from the allowed kinds.
fn allowed_tags(policy: &SanitizePolicy) -> HashSet<String> {
    let mut tags = HashSet::new();
    for kind in &policy.allowed_kinds {
        tags.insert(tag_name(*kind));
        // Code blocks serialize as a code tag nested under pre.
        if *kind == ElementKind::CodeBlock {
            tags.insert("code".to_string());
        }
    }
    tags
}
