//! Benchmarks for xofhash.
//!
//! Run with:
//!     cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use xofhash::{HasherSession, OutputConfig, OutputPool};

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for size in [1024, 64 * 1024, 1024 * 1024] {
        // Deterministic pseudo-random data
        let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut session = HasherSession::standard();
                session.update(black_box(data)).unwrap();
                black_box(session.finalize(None).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_finalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("finalize");
    let mut session = HasherSession::standard();
    session.update(b"benchmark input").unwrap();

    // Pooled small output (the common case)
    group.bench_function("digest_32", |b| {
        b.iter(|| black_box(session.finalize(black_box(None)).unwrap()));
    });

    // Zero-copy callback over a large output
    group.throughput(Throughput::Bytes(32 * 1024));
    group.bench_function("callback_32k", |b| {
        b.iter(|| {
            session
                .finalize_with(0, 32 * 1024, |out| black_box(out[out.len() - 1]))
                .unwrap()
        });
    });

    // Caller-owned pool
    let mut pool = OutputPool::new(&OutputConfig::default());
    group.bench_function("caller_pool_32k", |b| {
        b.iter(|| {
            session
                .finalize_in(&mut pool, black_box(4096), 32 * 1024, |out| black_box(out[0]))
                .unwrap()
        });
    });

    group.finish();
}

fn bench_hex(c: &mut Criterion) {
    let mut group = c.benchmark_group("hex");
    let session = HasherSession::standard();

    for len in [32, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| black_box(session.finalize_hex(Some(len), Default::default()).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update, bench_finalize, bench_hex);
criterion_main!(benches);
