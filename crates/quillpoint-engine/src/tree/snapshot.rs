//! Whole-document snapshot serialization.
//!
//! The snapshot is the tree's own wire format. Everything outside this
//! module treats it as an opaque string: the store gateway writes and reads
//! it verbatim, and only [`DocumentTree::from_snapshot`] interprets it.
//! Node ids are deliberately absent from the format; loading a snapshot
//! always mints a fresh arena.

use serde::{Deserialize, Serialize};

use crate::tree::{DocumentTree, Node, NodeId};

#[derive(Debug, Serialize, Deserialize)]
enum NodeRepr {
    Text { content: String },
    Element { children: Vec<NodeRepr>, inline: bool },
    LineBreak,
}

impl DocumentTree {
    /// Serialize the document structure (not the selection) to a snapshot
    /// string.
    pub fn to_snapshot(&self) -> anyhow::Result<String> {
        let blocks: Vec<NodeRepr> = self
            .blocks()
            .iter()
            .map(|&block| self.to_repr(block))
            .collect();
        Ok(serde_json::to_string(&blocks)?)
    }

    /// Rebuild a document from a snapshot string. The resulting tree has
    /// fresh node ids and no selection.
    pub fn from_snapshot(snapshot: &str) -> anyhow::Result<Self> {
        let blocks: Vec<NodeRepr> = serde_json::from_str(snapshot)?;
        let mut tree = DocumentTree::new();
        let root = tree.root();
        for block in &blocks {
            tree.graft(root, block);
        }
        Ok(tree)
    }

    fn to_repr(&self, id: NodeId) -> NodeRepr {
        match self.node(id) {
            Node::Text { content } => NodeRepr::Text {
                content: content.clone(),
            },
            Node::Element { children, inline } => NodeRepr::Element {
                children: children.iter().map(|&child| self.to_repr(child)).collect(),
                inline: *inline,
            },
            Node::LineBreak => NodeRepr::LineBreak,
        }
    }

    fn graft(&mut self, parent: NodeId, repr: &NodeRepr) {
        match repr {
            NodeRepr::Text { content } => {
                self.append_text(parent, content.clone());
            }
            NodeRepr::Element { children, inline } => {
                let element = self.append_element(parent, *inline);
                for child in children {
                    self.graft(element, child);
                }
            }
            NodeRepr::LineBreak => {
                self.append_line_break(parent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::{DocumentTree, Node, Point, Selection};

    fn sample_tree() -> DocumentTree {
        let mut tree = DocumentTree::new();
        let block = tree.append_element(tree.root(), false);
        tree.append_text(block, "hello ");
        let span = tree.append_element(block, true);
        tree.append_text(span, "world");
        tree.append_line_break(block);
        tree.append_text(block, "again");
        tree
    }

    #[test]
    fn test_snapshot_round_trip_preserves_structure() {
        let tree = sample_tree();
        let snapshot = tree.to_snapshot().unwrap();

        let restored = DocumentTree::from_snapshot(&snapshot).unwrap();

        // Same structure serializes to the same snapshot.
        assert_eq!(restored.to_snapshot().unwrap(), snapshot);
        assert_eq!(restored.block_count(), 1);
        let block = restored.block(0).unwrap();
        assert_eq!(restored.children(block).len(), 4);
        assert!(matches!(
            restored.node(restored.children(block)[1]),
            Node::Element { inline: true, .. }
        ));
    }

    #[test]
    fn test_snapshot_does_not_carry_selection() {
        let mut tree = sample_tree();
        let block = tree.block(0).unwrap();
        let text = tree.children(block)[0];
        tree.set_selection(Selection::caret(Point::new(text, 2)));

        let snapshot = tree.to_snapshot().unwrap();
        let restored = DocumentTree::from_snapshot(&snapshot).unwrap();

        assert_eq!(restored.selection(), None);
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        assert!(DocumentTree::from_snapshot("not json").is_err());
        assert!(DocumentTree::from_snapshot("{\"blocks\": 3}").is_err());
    }

    #[test]
    fn test_empty_document_snapshot() {
        let tree = DocumentTree::new();
        let snapshot = tree.to_snapshot().unwrap();
        let restored = DocumentTree::from_snapshot(&snapshot).unwrap();
        assert_eq!(restored.block_count(), 0);
    }
}
