use crate::codec::{DecodeError, Path};
use crate::flatten::FlattenPolicy;
use crate::tree::{DocumentTree, Node, NodeId, Point, char_len};

/// Resolve a portable path against the current tree.
///
/// Walks the target block depth-first in document order, spending the char
/// offset against each text run. The policy decides what line breaks and
/// element boundaries cost along the way, so it must be the policy the
/// offset was produced under: exact for encoder output, rendered for
/// sentence-matcher output.
///
/// A text node whose size covers the remaining count is the result, with
/// the local offset clamped into `[0, size]`. If the whole block is walked
/// without a match the offset overran the block's text; the result is then
/// the element position (block, 0) rather than an error.
pub fn decode_path(
    tree: &DocumentTree,
    path: Path,
    policy: FlattenPolicy,
) -> Result<Point, DecodeError> {
    let out_of_range = DecodeError::OutOfRange {
        index: path.block_index,
        blocks: tree.block_count(),
    };
    let block = tree.block(path.block_index).ok_or(out_of_range)?;
    if !matches!(tree.node(block), Node::Element { .. }) {
        return Err(out_of_range);
    }

    let mut remaining = path.char_offset as i64;
    match descend(tree, block, &mut remaining, policy) {
        Some(point) => Ok(point),
        None => {
            tracing::debug!(
                block = path.block_index,
                char_offset = path.char_offset,
                "offset overran block text, resolving to block start"
            );
            Ok(Point::new(block, 0))
        }
    }
}

/// Walk `element`'s subtree, consuming `remaining` until a text node covers
/// it. Adjustments may drive `remaining` negative under a mismatched
/// policy; the first text node then claims the position at offset 0.
fn descend(
    tree: &DocumentTree,
    element: NodeId,
    remaining: &mut i64,
    policy: FlattenPolicy,
) -> Option<Point> {
    let children = tree.children(element);
    let sibling_count = children.len();

    for (index, &child) in children.iter().enumerate() {
        match tree.node(child) {
            Node::Text { content } => {
                let size = char_len(content) as i64;
                if *remaining <= size {
                    let local = (*remaining).clamp(0, size) as usize;
                    return Some(Point::new(child, local));
                }
                *remaining -= size;
            }
            Node::LineBreak => {
                *remaining = policy.line_break_adjustment(*remaining);
            }
            Node::Element { .. } => {
                if let Some(point) = descend(tree, child, remaining, policy) {
                    return Some(point);
                }
            }
        }
        // Boundary cost between this child and the next sibling. Identity
        // unless the policy charges for a block separator here.
        *remaining =
            policy.element_boundary_adjustment(tree, child, index, sibling_count, *remaining);
    }

    None
}
