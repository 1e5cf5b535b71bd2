//! Benchmarks for the typed binary file accessor.
//!
//! Measures the three access shapes with distinct cost profiles:
//! - Single-value put/get (one seek per operation)
//! - Bulk runs (one seek, one read pass, per-element decode)
//! - Iterator traversal (weak-handle validation on every step)

extern crate binfile;

use binfile::{BinFile, BinHandle, ByteOrder};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const ELEMENTS: u64 = 1024;

fn prepared(dir: &tempfile::TempDir, name: &str) -> BinFile {
    let mut bin = BinFile::open(dir.path().join(name), true, ByteOrder::Little).unwrap();
    let values: Vec<u32> = (0..ELEMENTS as u32).collect();
    bin.put_many(&values).unwrap();
    bin
}

/// Benchmark writing one u32 at a fixed offset, seek included.
fn bench_put_single(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let mut bin = prepared(&dir, "put_single.bin");

    c.bench_function("put_single_u32", |b| {
        b.iter(|| {
            bin.put_at(black_box(0xDEADBEEFu32), black_box(128)).unwrap();
        });
    });
}

/// Benchmark reading one u32 at a fixed offset, seek included.
fn bench_get_single(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let mut bin = prepared(&dir, "get_single.bin");

    c.bench_function("get_single_u32", |b| {
        b.iter(|| {
            let value: u32 = bin.get_at(black_box(128)).unwrap();
            black_box(value)
        });
    });
}

/// Benchmark reading the whole file as one bulk run.
fn bench_get_many(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let mut bin = prepared(&dir, "get_many.bin");

    c.bench_function("get_many_u32_1k", |b| {
        b.iter(|| {
            let values = bin.get_many_at::<u32>(ELEMENTS, 0).unwrap();
            black_box(values)
        });
    });
}

/// Benchmark a full iterator walk, paying the per-step revalidation.
fn bench_iter_walk(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let handle = BinHandle::new(prepared(&dir, "walk.bin"));

    c.bench_function("iter_walk_u32_1k", |b| {
        b.iter(|| {
            let mut it = handle.begin::<u32>();
            let end = handle.end::<u32>().unwrap();
            let mut sum = 0u64;
            while !it.try_eq(&end).unwrap() {
                sum += u64::from(it.read().unwrap());
                it.advance().unwrap();
            }
            black_box(sum)
        });
    });
}

criterion_group!(
    benches,
    bench_put_single,
    bench_get_single,
    bench_get_many,
    bench_iter_walk
);
criterion_main!(benches);
