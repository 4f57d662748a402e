//! Enumeration throughput benchmarks
//!
//! Measures the depth-first walk alone; no model copies are made.
//!
//! Run with: cargo bench --bench enumeration

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use expauto::enumerator::{Factor, VariationEnumerator};
use expauto::experiment::{Variation, VariationKind};
use expauto::provider::ValueProviderSpec;

/// `factors` factors with `levels` linear levels each.
fn grid(factors: usize, levels: i64) -> Vec<Variation> {
    (0..factors)
        .map(|i| {
            Variation::new(
                format!("f{i}"),
                format!("target-{i}"),
                VariationKind::LoopIteration,
                ValueProviderSpec::Linear { start: 1, step: 1 },
            )
            .with_range(1, levels)
        })
        .collect()
}

/// Benchmark visiting every combination without touching it
fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumeration_walk");

    for (factors, levels) in [(2, 100), (4, 10), (6, 5)] {
        let variations = grid(factors, levels);
        let built = Factor::from_variations(&variations).unwrap();
        group.bench_with_input(
            BenchmarkId::new(format!("{factors}_factors"), levels),
            &built,
            |b, built| {
                b.iter(|| {
                    VariationEnumerator::new(black_box(built))
                        .for_each_combination(|combination| {
                            black_box(combination.len());
                            Ok::<(), ()>(())
                        })
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark building folder fragments for every combination
fn bench_fragments(c: &mut Criterion) {
    let variations = grid(4, 10);
    let built = Factor::from_variations(&variations).unwrap();

    c.bench_function("enumeration_fragments_4x10", |b| {
        b.iter(|| {
            let mut bytes = 0usize;
            VariationEnumerator::new(&built)
                .for_each_combination(|combination| {
                    bytes += combination.fragment().len();
                    Ok::<(), ()>(())
                })
                .unwrap();
            black_box(bytes)
        });
    });
}

criterion_group!(benches, bench_walk, bench_fragments);
criterion_main!(benches);
