//! Text flattening policies.
//!
//! A policy defines how line breaks and element boundaries contribute to a
//! linear character count when a subtree is reduced to plain text. The two
//! variants are not interchangeable:
//!
//! - [`FlattenPolicy::Exact`] counts text content only. This is the space
//!   offsets live in when they come from the position encoder, because no
//!   separator characters ever existed at the point of editing.
//! - [`FlattenPolicy::Rendered`] counts what a reader of the flattened text
//!   would see: each line break is one character and a two-character
//!   separator follows every non-inline element that has a later sibling.
//!   This is the space the sentence matcher's corpus lives in.
//!
//! `flatten` and the two offset adjustments of a given policy are two views
//! of the same rule set. They share [`separates`] and the separator
//! constant, so a change to one cannot drift from the other.

use crate::tree::{DocumentTree, Node, NodeId, char_len};

/// Separator inserted between rendered sibling blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// How a subtree turns into a linear run of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenPolicy {
    /// Concatenated text content, nothing else.
    Exact,
    /// Text content plus one char per line break and [`BLOCK_SEPARATOR`]
    /// between sibling blocks.
    Rendered,
}

impl FlattenPolicy {
    /// Adjust a running offset for a line break encountered mid-walk.
    pub fn line_break_adjustment(self, offset: i64) -> i64 {
        match self {
            FlattenPolicy::Exact => offset,
            FlattenPolicy::Rendered => offset - 1,
        }
    }

    /// Adjust a running offset after fully visiting `child`, before moving
    /// to its next sibling.
    pub fn element_boundary_adjustment(
        self,
        tree: &DocumentTree,
        child: NodeId,
        index: usize,
        sibling_count: usize,
        offset: i64,
    ) -> i64 {
        match self {
            FlattenPolicy::Exact => offset,
            FlattenPolicy::Rendered => {
                if separates(tree, child, index, sibling_count) {
                    offset - BLOCK_SEPARATOR.len() as i64
                } else {
                    offset
                }
            }
        }
    }

    /// Flatten a subtree to a string under this policy.
    pub fn flatten(self, tree: &DocumentTree, node: NodeId) -> String {
        let mut out = String::new();
        self.write_flat(tree, node, &mut out);
        out
    }

    fn write_flat(self, tree: &DocumentTree, node: NodeId, out: &mut String) {
        match tree.node(node) {
            Node::Text { content } => out.push_str(content),
            Node::LineBreak => {
                if self == FlattenPolicy::Rendered {
                    out.push('\n');
                }
            }
            Node::Element { children, .. } => {
                let count = children.len();
                for (index, &child) in children.iter().enumerate() {
                    self.write_flat(tree, child, out);
                    if self == FlattenPolicy::Rendered && separates(tree, child, index, count) {
                        out.push_str(BLOCK_SEPARATOR);
                    }
                }
            }
        }
    }

    /// Char length of `flatten` without building the string.
    pub fn flat_len(self, tree: &DocumentTree, node: NodeId) -> usize {
        match tree.node(node) {
            Node::Text { content } => char_len(content),
            Node::LineBreak => match self {
                FlattenPolicy::Exact => 0,
                FlattenPolicy::Rendered => 1,
            },
            Node::Element { children, .. } => {
                let count = children.len();
                children
                    .iter()
                    .enumerate()
                    .map(|(index, &child)| {
                        let mut len = self.flat_len(tree, child);
                        if self == FlattenPolicy::Rendered
                            && separates(tree, child, index, count)
                        {
                            len += BLOCK_SEPARATOR.len();
                        }
                        len
                    })
                    .sum()
            }
        }
    }
}

/// A rendered separator follows `child` exactly when it is a non-inline
/// element with a later sibling. Both `flatten` and
/// `element_boundary_adjustment` go through here.
fn separates(tree: &DocumentTree, child: NodeId, index: usize, sibling_count: usize) -> bool {
    index + 1 < sibling_count
        && matches!(tree.node(child), Node::Element { inline: false, .. })
}
