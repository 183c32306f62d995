use criterion::{Criterion, criterion_group, criterion_main};
use quillpoint_engine::{
    DocumentTree, FlattenPolicy, Path, Point, decode_path, encode_point, find_sentence,
};

/// A document with `blocks` paragraphs, each holding a few text runs, a
/// line break and one nested element.
fn generate_document(blocks: usize) -> DocumentTree {
    let mut tree = DocumentTree::new();
    let root = tree.root();
    for i in 0..blocks {
        let block = tree.append_element(root, false);
        tree.append_text(block, format!("paragraph {i} leads with some text. "));
        tree.append_line_break(block);
        let nested = tree.append_element(block, false);
        tree.append_text(nested, "nested run of content. ");
        tree.append_text(block, "and a closing run.");
    }
    tree
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let tree = generate_document(100);
    let last_block = tree.block(99).unwrap();
    let tail = *tree.children(last_block).last().unwrap();
    let point = Point::new(tail, 10);
    let path = encode_point(&tree, point).unwrap();

    group.bench_function("encode_point", |b| {
        b.iter(|| {
            let encoded = encode_point(std::hint::black_box(&tree), point).unwrap();
            std::hint::black_box(encoded);
        });
    });

    group.bench_function("decode_path_exact", |b| {
        b.iter(|| {
            let decoded =
                decode_path(std::hint::black_box(&tree), path, FlattenPolicy::Exact).unwrap();
            std::hint::black_box(decoded);
        });
    });

    group.bench_function("decode_path_rendered", |b| {
        b.iter(|| {
            let decoded = decode_path(
                std::hint::black_box(&tree),
                Path::new(99, 40),
                FlattenPolicy::Rendered,
            )
            .unwrap();
            std::hint::black_box(decoded);
        });
    });

    group.bench_function("find_sentence_last_block", |b| {
        b.iter(|| {
            let found = find_sentence(std::hint::black_box(&tree), "paragraph 99 leads");
            std::hint::black_box(found);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
