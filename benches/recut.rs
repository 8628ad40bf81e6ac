use criterion::{black_box, criterion_group, criterion_main, Criterion};
use litmap::{cluster_keywords, ids_per_cluster, SingleLinkage, TermWeights, TreeBuilder};
use rand::prelude::*;

fn bench_recut(c: &mut Criterion) {
    let mut group = c.benchmark_group("recut");

    // Synthetic corpus: 500 documents drawn from a 40-term vocabulary.
    let mut rng = StdRng::seed_from_u64(42);
    let n = 500;
    let d = 16;
    let k = 10;

    let vocabulary: Vec<String> = (0..40).map(|t| format!("term{t}")).collect();
    let vectors: Vec<Vec<f32>> = (0..n)
        .map(|_| (0..d).map(|_| rng.random::<f32>()).collect())
        .collect();
    let token_lists: Vec<Vec<String>> = (0..n)
        .map(|_| {
            (0..12)
                .map(|_| vocabulary[rng.random_range(0..vocabulary.len())].clone())
                .collect()
        })
        .collect();

    let tree = SingleLinkage::new().build(&vectors).unwrap();
    let weights = TermWeights::from_tokens(&token_lists).unwrap();

    group.bench_function("cut_n500_k10", |b| {
        b.iter(|| black_box(&tree).cut(black_box(k)).unwrap())
    });

    group.bench_function("cut_index_label_n500_k10", |b| {
        b.iter(|| {
            let assignment = black_box(&tree).cut(k).unwrap();
            let members = ids_per_cluster(&assignment);
            cluster_keywords(black_box(&weights), &members, 5).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_recut);
criterion_main!(benches);
