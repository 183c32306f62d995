//! First-match sentence lookup over the rendered corpus.
//!
//! Each block flattens to a rendered string and the target phrase is sought
//! verbatim, block by block. The resulting offsets live in rendered space,
//! so turning them back into live points goes through the decoder with
//! [`FlattenPolicy::Rendered`]; any other pairing silently lands the
//! selection in the wrong place.

use crate::codec::{DecodeError, Path, decode_path};
use crate::flatten::FlattenPolicy;
use crate::tree::{DocumentTree, Selection, char_len};

/// Where a phrase was found: rendered char offsets within one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceMatch {
    pub block_index: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Find the first block whose rendered text contains `target` verbatim.
///
/// Only the first occurrence in the first matching block counts. Literal
/// substring comparison, no pattern syntax. An empty target never matches.
pub fn find_sentence(tree: &DocumentTree, target: &str) -> Option<SentenceMatch> {
    if target.is_empty() {
        return None;
    }
    for (block_index, &block) in tree.blocks().iter().enumerate() {
        let corpus = FlattenPolicy::Rendered.flatten(tree, block);
        if let Some(byte_start) = corpus.find(target) {
            let start_offset = char_len(&corpus[..byte_start]);
            let end_offset = start_offset + char_len(target);
            tracing::debug!(block_index, start_offset, end_offset, "sentence matched");
            return Some(SentenceMatch {
                block_index,
                start_offset,
                end_offset,
            });
        }
    }
    None
}

/// Find `target` and resolve the match into a live selection.
///
/// `Ok(None)` means no block contains the phrase; the caller skips its
/// highlight action.
pub fn select_sentence(
    tree: &DocumentTree,
    target: &str,
) -> Result<Option<Selection>, DecodeError> {
    let Some(found) = find_sentence(tree, target) else {
        return Ok(None);
    };
    let anchor = decode_path(
        tree,
        Path::new(found.block_index, found.start_offset),
        FlattenPolicy::Rendered,
    )?;
    let focus = decode_path(
        tree,
        Path::new(found.block_index, found.end_offset),
        FlattenPolicy::Rendered,
    )?;
    Ok(Some(Selection::new(anchor, focus)))
}
