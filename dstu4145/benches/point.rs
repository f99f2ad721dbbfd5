//! M163 point benchmarks

use core::hint::black_box;
use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use dstu4145::{AffinePoint, Scalar};
use hex_literal::hex;
use rand_core::OsRng;

fn test_scalar() -> Scalar {
    Scalar::from_bytes(&hex!("0183F60FDF7951FF47D67193F8D073790C1C9B5A3E")).unwrap()
}

fn bench_point_add<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let p = AffinePoint::GENERATOR;
    let q = p.double();
    group.bench_function("add", |b| b.iter(|| black_box(p) + black_box(q)));
}

fn bench_point_double<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let p = AffinePoint::GENERATOR;
    group.bench_function("double", |b| b.iter(|| black_box(p).double()));
}

fn bench_point_mul<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let p = AffinePoint::GENERATOR;
    let k = test_scalar();
    group.bench_function("mul", |b| b.iter(|| black_box(p) * black_box(&k)));
}

fn bench_point_random<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.bench_function("random", |b| b.iter(|| AffinePoint::random(&mut OsRng)));
}

fn bench_point_decompress<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let encoded = AffinePoint::GENERATOR.to_encoded_point(true);
    group.bench_function("decompress", |b| {
        b.iter(|| AffinePoint::from_encoded_point(black_box(&encoded)))
    });
}

fn bench_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("point operations");
    bench_point_add(&mut group);
    bench_point_double(&mut group);
    bench_point_mul(&mut group);
    bench_point_random(&mut group);
    bench_point_decompress(&mut group);
    group.finish();
}

criterion_group!(benches, bench_point);
criterion_main!(benches);
