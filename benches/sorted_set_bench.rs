//! ImmutableSortedSet construction and lookup benchmark.
//!
//! Compares `with_elements` (sort + dedup) against `from_sorted` on already
//! sorted input, and `contains` (binary search) against `index_of` (linear
//! scan) on the same probes.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sorted_batch::ordering::OrderingPolicy;
use sorted_batch::persistent::ImmutableSortedSet;
use std::hint::black_box;

const SIZES: [i32; 4] = [100, 1000, 10000, 100000];

/// Returns the appropriate BatchSize based on input size.
fn batch_size_for(size: i32) -> BatchSize {
    if size < 1000 {
        BatchSize::SmallInput
    } else {
        BatchSize::LargeInput
    }
}

fn benchmark_construction(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sorted_set_construction");

    for size in SIZES {
        let sorted: Vec<i32> = (0..size).collect();
        let shuffled: Vec<i32> = (0..size).map(|index| (index * 7919) % size).collect();

        group.bench_with_input(
            BenchmarkId::new("with_elements_shuffled", size),
            &size,
            |bencher, &size| {
                bencher.iter_batched(
                    || shuffled.clone(),
                    |elements| black_box(ImmutableSortedSet::with_elements(black_box(elements))),
                    batch_size_for(size),
                );
            },
        );

        group.bench_with_input(
            BenchmarkId::new("from_sorted", size),
            &size,
            |bencher, &size| {
                bencher.iter_batched(
                    || sorted.clone(),
                    |elements| {
                        black_box(ImmutableSortedSet::from_sorted(
                            OrderingPolicy::natural(),
                            black_box(elements),
                        ))
                    },
                    batch_size_for(size),
                );
            },
        );
    }

    group.finish();
}

fn benchmark_lookup(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sorted_set_lookup");

    for size in SIZES {
        let set: ImmutableSortedSet<i32> = (0..size).collect();
        let probe = size - 1;

        group.bench_with_input(BenchmarkId::new("contains", size), &probe, |bencher, probe| {
            bencher.iter(|| black_box(set.contains(black_box(probe))));
        });

        group.bench_with_input(BenchmarkId::new("index_of", size), &probe, |bencher, probe| {
            bencher.iter(|| black_box(set.index_of(black_box(probe))));
        });
    }

    group.finish();
}

fn benchmark_union(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sorted_set_union");

    for size in SIZES {
        let evens: ImmutableSortedSet<i32> = (0..size).map(|element| element * 2).collect();
        let odds: ImmutableSortedSet<i32> = (0..size).map(|element| element * 2 + 1).collect();

        group.bench_with_input(BenchmarkId::new("interleaved", size), &size, |bencher, _| {
            bencher.iter(|| black_box(evens.union(black_box(&odds))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_construction, benchmark_lookup, benchmark_union);

criterion_main!(benches);
