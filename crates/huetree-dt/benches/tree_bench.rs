//! Criterion benchmarks for huetree-dt: tree construction and classification.

use criterion::{Criterion, criterion_group, criterion_main};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use huetree_dt::{ColorClass, DecisionTree, Sample};

fn make_samples(n_samples: usize, seed: u64) -> Vec<Sample> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n_samples)
        .map(|i| {
            let label = ColorClass::ALL[i % ColorClass::COUNT];
            Sample::with_class(label, rng.r#gen(), rng.r#gen(), rng.r#gen())
        })
        .collect()
}

fn bench_build_depth4(c: &mut Criterion) {
    let samples = make_samples(2_000, 42);

    c.bench_function("build_2000_depth4", |b| {
        b.iter(|| DecisionTree::build(&samples, 4));
    });
}

fn bench_build_depth8(c: &mut Criterion) {
    let samples = make_samples(2_000, 42);

    c.bench_function("build_2000_depth8", |b| {
        b.iter(|| DecisionTree::build(&samples, 8));
    });
}

fn bench_classify_batch(c: &mut Criterion) {
    let samples = make_samples(2_000, 42);
    let tree = DecisionTree::build(&samples, 6);
    let probes = make_samples(20_000, 7);

    c.bench_function("classify_batch_20000_depth6", |b| {
        b.iter(|| tree.classify_batch(&probes));
    });
}

criterion_group!(benches, bench_build_depth4, bench_build_depth8, bench_classify_batch);
criterion_main!(benches);
