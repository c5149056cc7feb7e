//! Benchmarks for gridstore matrix operations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridstore::Matrix;

const DIMENSION: usize = 256;

/// The naive integer-summation loop
///
/// Routed through `black_box` so the optimizer cannot delete the loop and
/// report near-zero time.
fn sum_reduction(c: &mut Criterion) {
    c.bench_function("sum_reduction", |b| {
        b.iter(|| {
            let n = black_box(1_000_000i64);
            let mut sum = 0i64;
            for j in 0..n {
                sum += j;
            }
            black_box(sum)
        })
    });
}

/// Fill cost by layout
fn fill_by_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill");

    let mut contiguous = Matrix::contiguous(DIMENSION).unwrap();
    group.bench_function("contiguous", |b| {
        b.iter(|| {
            contiguous.fill(|i, j| (i * j) as i64);
            black_box(contiguous.get(DIMENSION - 1, DIMENSION - 1))
        })
    });

    let mut scattered = Matrix::scattered(DIMENSION).unwrap();
    group.bench_function("scattered", |b| {
        b.iter(|| {
            scattered.fill(|i, j| (i * j) as i64);
            black_box(scattered.get(DIMENSION - 1, DIMENSION - 1))
        })
    });

    group.finish();
}

/// Row-major full-matrix reduction by layout
fn traverse_by_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("traverse");

    let mut contiguous = Matrix::contiguous(DIMENSION).unwrap();
    contiguous.fill(|i, j| (i * j) as i64);
    group.bench_function("contiguous", |b| b.iter(|| sum_elements(&contiguous)));

    let mut scattered = Matrix::scattered(DIMENSION).unwrap();
    scattered.fill(|i, j| (i * j) as i64);
    group.bench_function("scattered", |b| b.iter(|| sum_elements(&scattered)));

    group.finish();
}

fn sum_elements(matrix: &Matrix) -> i64 {
    let mut sum = 0i64;
    for i in 0..matrix.dimension() {
        for &value in matrix.row(i) {
            sum += value;
        }
    }
    black_box(sum)
}

criterion_group!(
    benches,
    sum_reduction,
    fill_by_layout,
    traverse_by_layout
);
criterion_main!(benches);
