//! Full cross-session cycle: capture a selection, snapshot the document,
//! tear everything down, rebuild from the store and restore the selection.

use pretty_assertions::assert_eq;
use quillpoint_engine::{
    DocumentTree, FlattenPolicy, MemoryStore, Point, Selection, capture_selection, decode_path,
    encode_point, load_snapshot, restore_selection, save_snapshot, select_sentence,
};

/// Three blocks: a plain sentence paragraph, a block with two non-inline
/// children, and a paragraph with a hard line break.
fn build_document() -> DocumentTree {
    let mut tree = DocumentTree::new();
    let root = tree.root();

    let intro = tree.append_element(root, false);
    tree.append_text(intro, "Hello. Roses are red. Bye.");

    let nested = tree.append_element(root, false);
    let left = tree.append_element(nested, false);
    tree.append_text(left, "ab");
    let right = tree.append_element(nested, false);
    tree.append_text(right, "cd");

    let broken = tree.append_element(root, false);
    tree.append_text(broken, "first");
    tree.append_line_break(broken);
    tree.append_text(broken, "second");

    tree
}

#[test]
fn test_selection_survives_teardown_and_rebuild() {
    let mut store = MemoryStore::new();

    // Session one: select "con" inside "second" and persist everything.
    {
        let mut tree = build_document();
        let broken = tree.block(2).unwrap();
        let second = tree.children(broken)[2];
        tree.set_selection(Selection::new(Point::new(second, 2), Point::new(second, 5)));

        assert!(capture_selection(&mut store, &tree).unwrap());
        save_snapshot(&mut store, &tree.to_snapshot().unwrap());
        // Tree dropped here; its node ids mean nothing from now on.
    }

    // Session two: rebuild from the snapshot and restore.
    let snapshot = load_snapshot(&store).expect("snapshot was saved");
    let mut tree = DocumentTree::from_snapshot(&snapshot).unwrap();
    assert!(restore_selection(&store, &mut tree).unwrap());

    let selection = tree.selection().unwrap();
    let broken = tree.block(2).unwrap();
    let second = tree.children(broken)[2];
    assert_eq!(selection.anchor, Point::new(second, 2));
    assert_eq!(selection.focus, Point::new(second, 5));
}

#[test]
fn test_restored_points_reencode_to_the_stored_paths() {
    let tree = build_document();
    let nested = tree.block(1).unwrap();
    let right = tree.children(nested)[1];
    let cd = tree.children(right)[0];

    let original = Point::new(cd, 1);
    let path = encode_point(&tree, original).unwrap();

    // Rebuild and resolve against fresh ids.
    let rebuilt = DocumentTree::from_snapshot(&tree.to_snapshot().unwrap()).unwrap();
    let restored = decode_path(&rebuilt, path, FlattenPolicy::Exact).unwrap();

    assert_eq!(encode_point(&rebuilt, restored).unwrap(), path);
}

#[test]
fn test_search_to_selection_on_a_rebuilt_document() {
    let tree = build_document();
    let rebuilt = DocumentTree::from_snapshot(&tree.to_snapshot().unwrap()).unwrap();

    let selection = select_sentence(&rebuilt, "Roses are red.").unwrap().unwrap();

    let intro_text = rebuilt.children(rebuilt.block(0).unwrap())[0];
    assert_eq!(selection.anchor, Point::new(intro_text, 7));
    assert_eq!(selection.focus, Point::new(intro_text, 21));
}

#[test]
fn test_search_through_separator_on_nested_block() {
    let tree = build_document();

    // Block 1 renders as "ab\n\ncd"; the phrase sits past the separator.
    let selection = select_sentence(&tree, "cd").unwrap().unwrap();
    let nested = tree.block(1).unwrap();
    let right = tree.children(nested)[1];
    let cd = tree.children(right)[0];
    assert_eq!(selection.anchor, Point::new(cd, 0));
    assert_eq!(selection.focus, Point::new(cd, 2));
}
