//! Benchmarks for lane operations across species shapes
//!
//! # Benchmark Methodology
//!
//! - Covers every fixed shape from 64 to 1024 bits plus the platform's
//!   widest shape
//! - Measures throughput in lanes per second so that shapes are comparable
//! - Masked variants use a half-set mask to exercise both lane paths

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use trueno_lanes::{BinaryOp, Mask, ReductionOp, Shape, Shuffle, Species, Vector};

const SHAPES: [Shape; 6] = [
    Shape::S64,
    Shape::S128,
    Shape::S256,
    Shape::S512,
    Shape::S1024,
    Shape::Max,
];

/// Generate a data slice covering `blocks` vectors of `species`
fn generate_test_data(species: Species<f32>, blocks: usize) -> Vec<f32> {
    (0..species.length() * blocks)
        .map(|i| (i as f32) * 0.5)
        .collect()
}

/// Benchmark lane-wise addition, masked and unmasked
fn bench_lanewise_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("lanewise_add");

    for shape in SHAPES {
        let species = Species::<f32>::new(shape).unwrap();
        group.throughput(Throughput::Elements(species.length() as u64));
        let a = species.iota(0.0, 1.0, false).unwrap();
        let b = species.broadcast(2.5);
        let half = Mask::from_fn(species, |i| i % 2 == 0);

        group.bench_with_input(BenchmarkId::new("unmasked", shape), &shape, |bencher, _| {
            bencher.iter(|| black_box(a.lanewise(BinaryOp::Add, &b).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("masked", shape), &shape, |bencher, _| {
            bencher.iter(|| black_box(a.lanewise_masked(BinaryOp::Add, &b, &half).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark cross-lane reductions
fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce_lanes");

    for shape in SHAPES {
        let species = Species::<i32>::new(shape).unwrap();
        group.throughput(Throughput::Elements(species.length() as u64));
        let v = species.iota(1, 3, true).unwrap();

        group.bench_with_input(BenchmarkId::new("add", shape), &shape, |bencher, _| {
            bencher.iter(|| black_box(v.reduce_lanes(ReductionOp::Add).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("widening_add", shape), &shape, |bencher, _| {
            bencher.iter(|| black_box(v.reduce_add_widening(None).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark single- and two-vector permutations
fn bench_rearrange(c: &mut Criterion) {
    let mut group = c.benchmark_group("rearrange");

    for shape in SHAPES {
        let species = Species::<i16>::new(shape).unwrap();
        group.throughput(Throughput::Elements(species.length() as u64));
        let a = species.iota(0, 1, true).unwrap();
        let b = species.broadcast(-1);
        let n = species.length() as i64;
        let reverse = Shuffle::from_fn(species, |i| n - 1 - i as i64);
        let zip = Shuffle::make_zip(species, 0).unwrap();

        group.bench_with_input(BenchmarkId::new("reverse", shape), &shape, |bencher, _| {
            bencher.iter(|| black_box(a.rearrange(&reverse).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("zip", shape), &shape, |bencher, _| {
            bencher.iter(|| black_box(a.rearrange_with(&zip, &b).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("slice", shape), &shape, |bencher, _| {
            bencher.iter(|| black_box(a.slice(1, Some(&b)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark a full load/compute/store pass over a slice
fn bench_memory_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory_loop");

    for shape in SHAPES {
        let species = Species::<f32>::new(shape).unwrap();
        let data = generate_test_data(species, 64);
        group.throughput(Throughput::Elements(data.len() as u64));

        group.bench_with_input(BenchmarkId::new("scale", shape), &shape, |bencher, _| {
            let mut out = vec![0.0f32; data.len()];
            bencher.iter(|| {
                let mut i = 0;
                while i < data.len() {
                    let v = Vector::from_array(species, &data, i as isize).unwrap();
                    v.lanewise_scalar(BinaryOp::Mul, 3.0)
                        .unwrap()
                        .into_array(&mut out, i as isize)
                        .unwrap();
                    i += species.length();
                }
                black_box(&out);
            });
        });

        let map: Vec<isize> = (0..species.length() as isize).rev().collect();
        group.bench_with_input(BenchmarkId::new("gather", shape), &shape, |bencher, _| {
            bencher.iter(|| {
                black_box(Vector::from_array_indexed(species, &data, 0, &map, 0).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_lanewise_add,
    bench_reduce,
    bench_rearrange,
    bench_memory_loop
);
criterion_main!(benches);
