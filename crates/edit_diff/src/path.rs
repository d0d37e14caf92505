use std::fmt::Write as _;

use crate::element::ElementLike;

/// Separator placed between selector segments.
pub const SEGMENT_SEPARATOR: &str = " > ";

/// Builds a CSS-selector-like locator for `element`, walking up to the document root.
///
/// An element with a non-empty `id` anchors the path: ascent stops there and that segment
/// is the first one. Siblings sharing a tag name are told apart with a 1-based
/// `:nth-of-type(k)`. The document root itself is never part of the output, and a
/// detached element without an id yields its own segment only.
pub fn element_path<E: ElementLike>(element: &E) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut current = Some(element.clone());

    while let Some(node) = current {
        if node.is_document_root() {
            break;
        }

        let mut segment = node.tag_name().to_ascii_lowercase();
        if let Some(id) = node.id().filter(|id| !id.is_empty()) {
            segment.push('#');
            segment.push_str(id);
            segments.push(segment);
            break;
        }

        let parent = node.parent();
        if let Some(parent) = &parent {
            if let Some(position) = nth_of_type(parent, &node) {
                let _ = write!(segment, ":nth-of-type({position})");
            }
        }

        segments.push(segment);
        current = parent;
    }

    segments.reverse();
    segments.join(SEGMENT_SEPARATOR)
}

/// 1-based position of `node` among same-tag siblings, when it needs disambiguation.
fn nth_of_type<E: ElementLike>(parent: &E, node: &E) -> Option<usize> {
    let same_tag: Vec<E> = parent
        .children()
        .into_iter()
        .filter(|sibling| sibling.tag_name().eq_ignore_ascii_case(node.tag_name()))
        .collect();

    if same_tag.len() < 2 {
        return None;
    }

    same_tag
        .iter()
        .position(|sibling| sibling == node)
        .map(|index| index + 1)
}
