use crate::codec::{EncodeError, Path};
use crate::flatten::FlattenPolicy;
use crate::tree::{DocumentTree, Node, NodeId, Point};

/// Reduce a live point to its portable path.
///
/// The running count starts at the point's own contribution: the char offset
/// for a text position, or the summed exact size of the first `offset`
/// children for an element position. Ascending towards the root, every
/// sibling preceding the current node adds its exact-flattened size. The
/// ancestor that is a direct root child supplies the block index.
///
/// Counting is always exact-policy: line breaks contribute nothing and no
/// separators exist, because none existed when the point was created.
pub fn encode_point(tree: &DocumentTree, point: Point) -> Result<Path, EncodeError> {
    let mut char_offset = match tree.node(point.node) {
        Node::Text { .. } => point.offset,
        Node::Element { children, .. } => children
            .iter()
            .take(point.offset)
            .map(|&child| FlattenPolicy::Exact.flat_len(tree, child))
            .sum(),
        // Line breaks host no positions.
        Node::LineBreak => return Err(EncodeError::InvalidPoint),
    };

    let mut node = point.node;
    loop {
        let Some(parent) = tree.parent(node) else {
            // Ran out of ancestors without meeting the root: the point
            // addresses the root itself or a detached subtree.
            return Err(EncodeError::InvalidPoint);
        };
        let index = tree
            .index_in_parent(node)
            .ok_or(EncodeError::InvalidPoint)?;
        if parent == tree.root() {
            return Ok(Path::new(index, char_offset));
        }
        char_offset += preceding_size(tree, parent, index);
        node = parent;
    }
}

/// Exact-flattened size of the first `index` children of `parent`.
fn preceding_size(tree: &DocumentTree, parent: NodeId, index: usize) -> usize {
    tree.children(parent)[..index]
        .iter()
        .map(|&sibling| FlattenPolicy::Exact.flat_len(tree, sibling))
        .sum()
}
