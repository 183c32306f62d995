//! Persistence gateway.
//!
//! Exactly three records leave the process: the anchor path, the focus
//! path, and the whole-document snapshot. Each one is a single key-value
//! entry overwritten wholesale on every save; there is no versioning and no
//! merge. Paths are stored in their JSON wire format; the snapshot string
//! passes through untouched.

use std::collections::HashMap;

use crate::codec::{DecodeError, EncodeError, Path, decode_path, encode_point};
use crate::flatten::FlattenPolicy;
use crate::tree::{DocumentTree, Selection};

/// Store key for the selection's anchor path record.
pub const ANCHOR_PATH_KEY: &str = "selection.anchor";
/// Store key for the selection's focus path record.
pub const FOCUS_PATH_KEY: &str = "selection.focus";
/// Store key for the opaque document snapshot.
pub const DOCUMENT_SNAPSHOT_KEY: &str = "document.snapshot";

/// Minimal synchronous key-value surface the gateway writes through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store, the default host implementation and the test double.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

/// Gateway failure. `Decode(OutOfRange)` is the distinguishable status for
/// a selection that no longer fits the document; callers typically drop the
/// restore on it rather than surfacing an error to the user.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("malformed path record: {0}")]
    MalformedRecord(#[from] serde_json::Error),
}

/// Encode both ends of `selection` and overwrite the stored path records.
pub fn save_selection(
    store: &mut dyn KeyValueStore,
    tree: &DocumentTree,
    selection: Selection,
) -> Result<(), StoreError> {
    let anchor = encode_point(tree, selection.anchor)?;
    let focus = encode_point(tree, selection.focus)?;
    store.set(ANCHOR_PATH_KEY, serde_json::to_string(&anchor)?);
    store.set(FOCUS_PATH_KEY, serde_json::to_string(&focus)?);
    tracing::debug!(?anchor, ?focus, "selection paths saved");
    Ok(())
}

/// Save the tree's live selection, if it has one. Returns whether anything
/// was written.
pub fn capture_selection(
    store: &mut dyn KeyValueStore,
    tree: &DocumentTree,
) -> Result<bool, StoreError> {
    match tree.selection() {
        Some(selection) => {
            save_selection(store, tree, selection)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Read the stored path records and decode them against `tree` with the
/// exact policy, the inverse of how they were written.
///
/// `Ok(None)` means no complete selection was ever persisted.
pub fn load_selection(
    store: &dyn KeyValueStore,
    tree: &DocumentTree,
) -> Result<Option<Selection>, StoreError> {
    let (Some(anchor_record), Some(focus_record)) =
        (store.get(ANCHOR_PATH_KEY), store.get(FOCUS_PATH_KEY))
    else {
        return Ok(None);
    };
    let anchor: Path = serde_json::from_str(&anchor_record)?;
    let focus: Path = serde_json::from_str(&focus_record)?;
    let anchor = decode_path(tree, anchor, FlattenPolicy::Exact)?;
    let focus = decode_path(tree, focus, FlattenPolicy::Exact)?;
    Ok(Some(Selection::new(anchor, focus)))
}

/// Load, decode and apply the persisted selection through the tree's
/// selection primitive. Returns whether a selection was applied.
pub fn restore_selection(
    store: &dyn KeyValueStore,
    tree: &mut DocumentTree,
) -> Result<bool, StoreError> {
    match load_selection(store, tree)? {
        Some(selection) => {
            tree.set_selection(selection);
            tracing::debug!("selection restored from store");
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Overwrite the stored document snapshot. The string is opaque here; only
/// [`DocumentTree::from_snapshot`] gives it meaning.
pub fn save_snapshot(store: &mut dyn KeyValueStore, snapshot: &str) {
    store.set(DOCUMENT_SNAPSHOT_KEY, snapshot.to_string());
}

/// Fetch the stored document snapshot, if any.
pub fn load_snapshot(store: &dyn KeyValueStore) -> Option<String> {
    store.get(DOCUMENT_SNAPSHOT_KEY)
}
