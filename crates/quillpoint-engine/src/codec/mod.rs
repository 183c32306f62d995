/*!
 * # Position codec
 *
 * Converts between live tree positions ([`crate::tree::Point`]) and the
 * portable coordinates ([`Path`]) that outlive a session.
 *
 * ## Why a codec exists
 *
 * Node ids are arena indices, minted fresh every time a document is rebuilt
 * from its snapshot. A selection therefore cannot be stored as node
 * references. Instead it is reduced to the pair (block index, char offset):
 * which top-level block the position sits in, and how many characters of
 * flattened text precede it inside that block.
 *
 * ## The two offset spaces
 *
 * The encoder always counts characters under
 * [`crate::flatten::FlattenPolicy::Exact`], because a position captured
 * during editing has never seen separator characters. The decoder is
 * parameterized:
 *
 * - offsets that came from [`encode_point`] decode with the exact policy
 *   (selection save/restore),
 * - offsets that came from the sentence matcher's rendered corpus decode
 *   with [`crate::flatten::FlattenPolicy::Rendered`].
 *
 * Decoding with the wrong policy desynchronizes silently on any block that
 * contains a line break or a sibling block boundary; no error is raised.
 * Callers own the pairing of producer and policy.
 *
 * ## Degraded decode
 *
 * A char offset beyond the block's flattened size is not an error: the
 * decoder returns the element position (block, 0) as a defined fallback.
 * A block index that addresses nothing is an error ([`DecodeError`]), since
 * the document has structurally changed since the path was written.
 */

mod decode;
mod encode;

pub use decode::decode_path;
pub use encode::encode_point;

use serde::{Deserialize, Serialize};

/// Portable surrogate for a [`crate::tree::Point`].
///
/// Serializes to the store record format
/// `{"rootIndex": <n>, "textOffset": <n>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// Ordinal of the target block among the root's children.
    #[serde(rename = "rootIndex")]
    pub block_index: usize,
    /// Chars of flattened text preceding the position inside the block.
    #[serde(rename = "textOffset")]
    pub char_offset: usize,
}

impl Path {
    pub fn new(block_index: usize, char_offset: usize) -> Self {
        Self {
            block_index,
            char_offset,
        }
    }
}

/// Failure to reduce a [`Point`] to a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The point's node has no ancestor that is a direct child of the root,
    /// or is not a text/element position at all. Nothing was written.
    #[error("point is not anchored inside a root block")]
    InvalidPoint,
}

/// Failure to resolve a [`Path`] against the current tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The block index addresses no element block in this document. The
    /// caller abandons the restore; there is nothing sensible to select.
    #[error("block index {index} does not address a block (document has {blocks})")]
    OutOfRange { index: usize, blocks: usize },
}
