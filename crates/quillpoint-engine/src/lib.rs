pub mod codec;
pub mod flatten;
pub mod search;
pub mod store;
pub mod tree;

// Re-export key types for easier usage
pub use codec::{DecodeError, EncodeError, Path, decode_path, encode_point};
pub use flatten::FlattenPolicy;
pub use search::{SentenceMatch, find_sentence, select_sentence};
pub use store::{
    KeyValueStore, MemoryStore, StoreError, capture_selection, load_selection, load_snapshot,
    restore_selection, save_selection, save_snapshot,
};
pub use tree::{DocumentTree, Node, NodeId, Point, Selection};
