//! DSTU 4145 signature benchmarks

use core::hint::black_box;
use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use dstu4145::dsa::{
    Signature, SigningKey,
    signature::{Signer, Verifier},
};
use hex_literal::hex;

const SIGNING_KEY_BYTES: [u8; 21] = hex!("0183F60FDF7951FF47D67193F8D073790C1C9B5A3E");

fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&SIGNING_KEY_BYTES).unwrap()
}

fn bench_sign<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let sk = black_box(signing_key());
    let msg = black_box(b"example message");
    group.bench_function("sign", |b| {
        b.iter(|| {
            let sig: Signature = sk.sign(msg);
            black_box(sig)
        })
    });
}

fn bench_verify<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let sk = black_box(signing_key());
    let vk = black_box(sk.verifying_key());
    let msg = black_box(b"example message");
    let sig: Signature = black_box(sk.sign(msg));
    group.bench_function("verify", |b| b.iter(|| vk.verify(msg, &sig)));
}

fn bench_dsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("DSTU4145");
    bench_sign(&mut group);
    bench_verify(&mut group);
    group.finish();
}

criterion_group!(benches, bench_dsa);
criterion_main!(benches);
