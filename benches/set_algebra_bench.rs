//! Set operator benchmark.
//!
//! Measures closed-form list operators against list sizes, and membership
//! cost of composite sets against nesting depth.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use setview::sets::{MultiSubtract, Range, Set};
use std::hint::black_box;

const SIZES: [i32; 4] = [8, 64, 1000, 10000];

fn evens(size: i32) -> Set<i32> {
    Set::inclusive((0..size).map(|value| value * 2))
}

fn thirds(size: i32) -> Set<i32> {
    Set::inclusive((0..size).map(|value| value * 3))
}

fn benchmark_inclusive_operators(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("inclusive_operators");

    for size in SIZES {
        let left = evens(size);
        let right = thirds(size);

        group.bench_with_input(BenchmarkId::new("union", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.union(black_box(&right))));
        });
        group.bench_with_input(BenchmarkId::new("intersect", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.intersect(black_box(&right))));
        });
        group.bench_with_input(BenchmarkId::new("subtract", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.subtract(black_box(&right))));
        });
    }

    group.finish();
}

fn benchmark_range_subtract(criterion: &mut Criterion) {
    let whole = Set::range(Range::closed(0, 1_000_000).unwrap());
    let middle = Set::range(Range::open(250_000, 750_000).unwrap());

    criterion.bench_function("range_subtract_multi", |bencher| {
        bencher.iter(|| black_box(whole.subtract_multi(black_box(&middle))));
    });
}

fn benchmark_composite_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("composite_contains");

    for depth in [1, 4, 16] {
        let composite = (0..depth).fold(Set::empty(), |set: Set<i32>, step| {
            let lower = step * 10;
            set.union(&Set::range(Range::closed(lower, lower + 5).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("contains", depth), &depth, |bencher, _| {
            bencher.iter(|| {
                (0..depth * 10)
                    .filter(|value| composite.contains(black_box(value)))
                    .count()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_inclusive_operators,
    benchmark_range_subtract,
    benchmark_composite_contains
);
criterion_main!(benches);
