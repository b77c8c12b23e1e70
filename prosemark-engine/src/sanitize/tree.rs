//! Self-contained sanitation backend.
//!
//! Walks the input with an explicit work stack, so adversarially deep trees
//! cost heap instead of call stack. This is the backend of last resort: it
//! has no library dependency and cannot fail.

use crate::error::FormatError;
use crate::sanitize::{SanitizePolicy, Sanitizer};
use crate::tree::{flatten_text, Element, MarkupNode};

/// The fallback backend: a tree filter with no external dependencies.
pub struct TreeSanitizer;

impl Sanitizer for TreeSanitizer {
    fn name(&self) -> &str {
        "tree"
    }

    fn sanitize(
        &self,
        fragment: &[MarkupNode],
        policy: &SanitizePolicy,
    ) -> Result<Vec<MarkupNode>, FormatError> {
        Ok(sanitize_nodes(fragment, policy))
    }
}

/// One unit of pending work: either a node to process or the close of an
/// allowed element whose children are still being rebuilt.
enum Task<'a> {
    Node(&'a MarkupNode),
    Close,
}

/// Filter `fragment` against `policy`, producing a new tree.
///
/// Text passes through untouched. Allowed elements are rebuilt with
/// filtered attributes. Disallowed elements are replaced by their
/// descendants' flattened text, or by nothing when that text is empty.
pub(crate) fn sanitize_nodes(fragment: &[MarkupNode], policy: &SanitizePolicy) -> Vec<MarkupNode> {
    let mut result: Vec<MarkupNode> = Vec::new();
    // Elements under construction; children land in the innermost one.
    let mut open: Vec<Element> = Vec::new();
    let mut tasks: Vec<Task> = fragment.iter().rev().map(Task::Node).collect();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Node(MarkupNode::Text(text)) => {
                emit(&mut result, &mut open, MarkupNode::text(text.clone()));
            }

            Task::Node(MarkupNode::Element(element)) => {
                if policy.allows_kind(element.kind) {
                    let mut clean = Element::new(element.kind);
                    for (name, value) in &element.attributes {
                        if !policy.allows_attribute(name) {
                            continue;
                        }
                        if name == "href" && !policy.allows_link_target(value) {
                            continue;
                        }
                        clean.set_attribute(name.clone(), value.clone());
                    }

                    open.push(clean);
                    tasks.push(Task::Close);
                    tasks.extend(element.children.iter().rev().map(Task::Node));
                } else {
                    // Drop wrapper, keep content.
                    let text = flatten_text(&element.children);
                    if !text.is_empty() {
                        emit(&mut result, &mut open, MarkupNode::Text(text));
                    }
                }
            }

            Task::Close => {
                // Pairs with the push above; the stack discipline keeps one
                // open element per pending Close.
                if let Some(element) = open.pop() {
                    emit(&mut result, &mut open, element.into());
                }
            }
        }
    }

    result
}

fn emit(result: &mut Vec<MarkupNode>, open: &mut Vec<Element>, node: MarkupNode) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => result.push(node),
    }
}
