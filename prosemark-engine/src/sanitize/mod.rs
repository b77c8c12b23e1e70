//! Fragment sanitation.
//!
//! Filters markup trees against an allow-list policy before they are
//! rendered or persisted. The contract is deliberately small: disallowed
//! elements lose their wrapper but keep their text ("drop wrapper, keep
//! content"), disallowed attributes disappear, text nodes pass through
//! untouched. The input is never mutated.
//!
//! Two backends implement the contract:
//!
//! - [`AmmoniaSanitizer`] (feature `html-sanitizer`, on by default) applies
//!   the tree filter and then routes the result through the `ammonia`
//!   library for value-level hardening, the way a browser-grade sanitizer
//!   would see it.
//! - [`TreeSanitizer`] is the self-contained filter with no library
//!   dependency, walking the tree with an explicit work stack.
//!
//! The [`sanitize`] facade prefers the library backend and falls back to
//! the tree backend whenever the library one is unavailable or reports an
//! error; the caller always gets a fragment back. [`sanitize_with_report`]
//! additionally says which backend ran, so callers can log fallbacks.

mod tree;

#[cfg(feature = "html-sanitizer")]
mod ammonia;

pub use self::tree::TreeSanitizer;

#[cfg(feature = "html-sanitizer")]
pub use self::ammonia::AmmoniaSanitizer;

use std::collections::HashSet;

use url::Url;

use crate::error::FormatError;
use crate::tree::{ElementKind, MarkupNode};

/// Allow-list policy: which element kinds, attribute names and link schemes
/// survive sanitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizePolicy {
    /// Element kinds preserved as elements. Anything else is flattened.
    pub allowed_kinds: HashSet<ElementKind>,
    /// Attribute names preserved on allowed elements.
    pub allowed_attributes: HashSet<String>,
    /// URL schemes an `href` value may carry. Relative references always
    /// pass; they cannot smuggle a scheme.
    pub allowed_url_schemes: HashSet<String>,
}

impl Default for SanitizePolicy {
    /// The editor whitelist: every kind the tree model knows, the four
    /// presentation-safe attributes, and non-executable link schemes.
    fn default() -> Self {
        let mut allowed_kinds: HashSet<ElementKind> = [
            ElementKind::Paragraph,
            ElementKind::LineBreak,
            ElementKind::Bold,
            ElementKind::Italic,
            ElementKind::Underline,
            ElementKind::InlineCode,
            ElementKind::CodeBlock,
            ElementKind::Blockquote,
            ElementKind::UnorderedList,
            ElementKind::OrderedList,
            ElementKind::ListItem,
            ElementKind::Link,
            ElementKind::Container,
        ]
        .into_iter()
        .collect();
        for level in 1..=6 {
            allowed_kinds.insert(ElementKind::Heading(level));
        }

        SanitizePolicy {
            allowed_kinds,
            allowed_attributes: ["href", "target", "style", "class"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            allowed_url_schemes: ["http", "https", "mailto"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl SanitizePolicy {
    /// Whether elements of `kind` survive as elements. Heading levels are
    /// clamped into 1..=6 before the lookup, mirroring serialization.
    pub fn allows_kind(&self, kind: ElementKind) -> bool {
        let canonical = match kind {
            ElementKind::Heading(level) => ElementKind::Heading(level.clamp(1, 6)),
            other => other,
        };
        self.allowed_kinds.contains(&canonical)
    }

    /// Whether an attribute named `name` survives. Event-handler names
    /// (`on*`) never pass, whatever the policy lists.
    pub fn allows_attribute(&self, name: &str) -> bool {
        if name.to_ascii_lowercase().starts_with("on") {
            return false;
        }
        self.allowed_attributes.contains(name)
    }

    /// Whether an `href` value survives. Absolute URLs must carry an
    /// allowed scheme; anything that does not parse as absolute is a
    /// relative reference and passes.
    pub fn allows_link_target(&self, value: &str) -> bool {
        match Url::parse(value) {
            Ok(url) => self.allowed_url_schemes.contains(url.scheme()),
            Err(_) => true,
        }
    }
}

/// A sanitation backend.
pub trait Sanitizer {
    /// Short backend name, used in logs.
    fn name(&self) -> &str;

    /// Produce a sanitized copy of `fragment` under `policy`.
    fn sanitize(
        &self,
        fragment: &[MarkupNode],
        policy: &SanitizePolicy,
    ) -> Result<Vec<MarkupNode>, FormatError>;
}

/// How a [`sanitize_with_report`] call was served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Name of the backend that produced the result.
    pub backend: &'static str,
    /// Why the library backend was not used, when it was not.
    pub fallback: Option<String>,
}

/// Sanitize a fragment, preferring the library backend.
///
/// Never fails: when the library backend is unavailable or errors, the
/// self-contained tree filter serves the call.
pub fn sanitize(fragment: &[MarkupNode], policy: &SanitizePolicy) -> Vec<MarkupNode> {
    sanitize_with_report(fragment, policy).0
}

/// Like [`sanitize`], but also reports which backend ran.
#[cfg(feature = "html-sanitizer")]
pub fn sanitize_with_report(
    fragment: &[MarkupNode],
    policy: &SanitizePolicy,
) -> (Vec<MarkupNode>, SanitizeReport) {
    let primary = AmmoniaSanitizer;
    match primary.sanitize(fragment, policy) {
        Ok(clean) => (
            clean,
            SanitizeReport {
                backend: "ammonia",
                fallback: None,
            },
        ),
        Err(err) => (
            tree::sanitize_nodes(fragment, policy),
            SanitizeReport {
                backend: "tree",
                fallback: Some(err.to_string()),
            },
        ),
    }
}

/// Like [`sanitize`], but also reports which backend ran.
#[cfg(not(feature = "html-sanitizer"))]
pub fn sanitize_with_report(
    fragment: &[MarkupNode],
    policy: &SanitizePolicy,
) -> (Vec<MarkupNode>, SanitizeReport) {
    (
        tree::sanitize_nodes(fragment, policy),
        SanitizeReport {
            backend: "tree",
            fallback: Some("library sanitizer not built in".to_string()),
        },
    )
}
