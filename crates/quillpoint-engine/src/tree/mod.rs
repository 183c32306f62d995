//! Owned document tree.
//!
//! The tree is an arena: nodes live in a flat `Vec` and refer to each other
//! through [`NodeId`] indices. Ids are only meaningful for the session that
//! created them. Tearing a document down and rebuilding it from a snapshot
//! produces a fresh arena with fresh ids, which is why selections are
//! persisted as [`crate::codec::Path`] values rather than node references.

mod point;
mod snapshot;

pub use point::{Point, Selection};

/// Handle to a node inside one [`DocumentTree`]. Valid only for the tree
/// that issued it and only until that tree is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Node kinds. Every traversal in the crate matches exhaustively on this
/// enum, so adding a kind forces each site to be revisited.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Leaf text run. Size is the char length of `content`.
    Text { content: String },
    /// Container with ordered children. Blocks are non-inline elements that
    /// sit directly under the root; `inline` elements (spans, links) never
    /// contribute block separators when rendered.
    Element { children: Vec<NodeId>, inline: bool },
    /// Hard line break. Carries no text of its own; the rendered flattening
    /// counts it as one character.
    LineBreak,
}

#[derive(Debug)]
struct NodeData {
    parent: Option<NodeId>,
    kind: Node,
}

/// Arena-backed document tree with a single element root.
///
/// The root's direct children are the document's blocks, addressed by
/// ordinal index. The tree also carries the live selection, the host
/// primitive that restore-from-store writes through.
#[derive(Debug)]
pub struct DocumentTree {
    nodes: Vec<NodeData>,
    selection: Option<Selection>,
}

impl DocumentTree {
    /// Create an empty document: a root element with no blocks.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                parent: None,
                kind: Node::Element {
                    children: Vec::new(),
                    inline: false,
                },
            }],
            selection: None,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Ordered children of an element; leaves have none.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0].kind {
            Node::Element { children, .. } => children,
            Node::Text { .. } | Node::LineBreak => &[],
        }
    }

    /// Position of `id` among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.nodes[id.0].parent?;
        self.children(parent).iter().position(|&child| child == id)
    }

    /// The document's blocks: the root's direct children in order.
    pub fn blocks(&self) -> &[NodeId] {
        self.children(self.root())
    }

    pub fn block(&self, index: usize) -> Option<NodeId> {
        self.blocks().get(index).copied()
    }

    pub fn block_count(&self) -> usize {
        self.blocks().len()
    }

    /// Char length of a text node, 0 for any other kind.
    pub fn text_len(&self, id: NodeId) -> usize {
        match &self.nodes[id.0].kind {
            Node::Text { content } => char_len(content),
            Node::Element { .. } | Node::LineBreak => 0,
        }
    }

    /// Append a text run under `parent`.
    pub fn append_text(&mut self, parent: NodeId, content: impl Into<String>) -> NodeId {
        self.push(
            parent,
            Node::Text {
                content: content.into(),
            },
        )
    }

    /// Append an element under `parent`. Non-inline elements appended to the
    /// root become blocks.
    pub fn append_element(&mut self, parent: NodeId, inline: bool) -> NodeId {
        self.push(
            parent,
            Node::Element {
                children: Vec::new(),
                inline,
            },
        )
    }

    /// Append a hard line break under `parent`.
    pub fn append_line_break(&mut self, parent: NodeId) -> NodeId {
        self.push(parent, Node::LineBreak)
    }

    fn push(&mut self, parent: NodeId, kind: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent),
            kind,
        });
        match &mut self.nodes[parent.0].kind {
            Node::Element { children, .. } => children.push(id),
            Node::Text { .. } | Node::LineBreak => {
                panic!("cannot append a child to a leaf node")
            }
        }
        id
    }

    /// The live selection, if any.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Host primitive for writing the selection. Restore-from-store goes
    /// through here after decoding.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection_into_bounds(self, selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject selections whose node ids do not belong to this arena. Ids from a
/// previous session must never be written back into a rebuilt tree.
fn selection_into_bounds(tree: &DocumentTree, selection: Selection) -> Option<Selection> {
    let in_bounds = |point: Point| point.node.0 < tree.nodes.len();
    if in_bounds(selection.anchor) && in_bounds(selection.focus) {
        Some(selection)
    } else {
        None
    }
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
