//! Benchmarks for QFT and phase estimation construction.
//!
//! Run with: cargo bench -p hhl-algo

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hhl_algo::{HhlConfig, approximate_qft, build_hhl4x4, exact_qft};
use hhl_ir::Circuit;

/// Benchmark exact and approximate transforms over growing registers.
fn bench_qft(c: &mut Criterion) {
    let mut group = c.benchmark_group("qft");

    for n in &[4, 16, 64] {
        let mut circuit = Circuit::new("bench");
        let q = circuit.add_qreg("q", *n);

        group.bench_with_input(BenchmarkId::new("exact", n), &q, |b, q| {
            b.iter(|| exact_qft(&circuit, black_box(q)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("approximate", n), &q, |b, q| {
            b.iter(|| approximate_qft(&circuit, black_box(q), None).unwrap());
        });
    }

    group.finish();
}

/// Benchmark assembling the full HHL 4x4 circuit.
fn bench_hhl(c: &mut Criterion) {
    let config = HhlConfig::default();
    c.bench_function("hhl4x4", |b| {
        b.iter(|| build_hhl4x4(black_box(&config)).unwrap());
    });
}

criterion_group!(benches, bench_qft, bench_hhl);
criterion_main!(benches);
