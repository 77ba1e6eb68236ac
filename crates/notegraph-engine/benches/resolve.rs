use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use notegraph_engine::{ContainmentTree, resolve};

/// A document with the shapes the resolver has to work hardest on:
/// heading ladders, nested lists, blockquotes, and hard resets.
fn sample_document(sections: usize) -> String {
    let mut source = String::new();
    for i in 0..sections {
        source.push_str(&format!("## section {i}\n"));
        source.push_str("intro paragraph\n\n");
        source.push_str("### details\n");
        source.push_str("- item one\n  - nested\n- item two\n\n");
        source.push_str("> quoted remark\n\n");
        source.push_str("---\n\n");
    }
    source
}

fn bench_resolution(c: &mut Criterion) {
    let tree = notegraph_syntax::parse(&sample_document(200)).unwrap();

    c.bench_function("resolve_200_sections", |b| {
        b.iter(|| {
            let mut edges = 0usize;
            resolve(black_box(&tree), |_, _| edges += 1);
            edges
        })
    });

    c.bench_function("build_containment_tree_200_sections", |b| {
        b.iter(|| ContainmentTree::build(black_box(&tree)))
    });
}

criterion_group!(benches, bench_resolution);
criterion_main!(benches);
