//! Paged Bloom filter benchmarks
//!
//! # Test Scenarios
//!
//! 1. **Hash**: `hash128` throughput across key lengths (every tail path)
//! 2. **Set by size**: insert latency as the filter grows past cache sizes
//! 3. **Test by way**: lookup latency for each fixed-way specialization
//! 4. **Fixed vs dynamic**: cost of the runtime way dispatch
//! 5. **Shared**: lock overhead and multi-threaded lookups
//! 6. **Planning**: `plan` itself, which runs once per filter
#![allow(unused_imports)]
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pagebloom::core::{BloomFilter, SharedBloomFilter};
use pagebloom::filters::{DynPageBloomFilter, PageBloomFilter};
use pagebloom::hash::hash128;
use pagebloom::{plan, SharedPageBloomFilter};
use std::sync::Arc;
use std::thread;

mod common;
use common::*;

// BENCHMARK 1: Hash Throughput

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash128");

    for &len in KEY_LENGTHS {
        let data: Vec<u8> = random_string(len).into_bytes();
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &data, |b, data| {
            b.iter(|| hash128(black_box(data)));
        });
    }

    group.finish();
}

// BENCHMARK 2: Set by Filter Size

fn bench_set_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_by_size");

    for &size in SIZES {
        let keys = generate_u64_keys(size);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut filter = DynPageBloomFilter::with_rate(size, 0.01).unwrap();
            let mut idx = 0;
            b.iter(|| {
                filter.set(black_box(&keys[idx % keys.len()]));
                idx += 1;
            });
        });
    }

    group.finish();
}

// BENCHMARK 3: Test by Way

fn bench_test_way<const W: usize>(c: &mut Criterion) {
    let size = 100_000;
    let params = plan(size, 0.01).unwrap();
    let level = params
        .page_level
        .max(pagebloom::core::params::min_page_level(W));
    let pages = ((params.data_len() >> level).max(1)) as u32;

    let mut filter = PageBloomFilter::<W>::new(level, pages).unwrap();
    let present = generate_u64_keys(size);
    for key in &present {
        filter.set(key);
    }
    let absent = generate_u64_keys(size);

    let mut group = c.benchmark_group(format!("test_way{}", W));
    group.throughput(Throughput::Elements(1));

    group.bench_function("hit", |b| {
        let mut idx = 0;
        b.iter(|| {
            let hit = filter.test(black_box(&present[idx % present.len()]));
            idx += 1;
            hit
        });
    });

    group.bench_function("miss", |b| {
        let mut idx = 0;
        b.iter(|| {
            let hit = filter.test(black_box(&absent[idx % absent.len()]));
            idx += 1;
            hit
        });
    });

    group.finish();

    let results: Vec<bool> = absent.iter().map(|key| filter.test(key)).collect();
    println!("way {}: measured fpr {:.4}", W, measure_fpr(&results));
}

fn bench_test_by_way(c: &mut Criterion) {
    bench_test_way::<4>(c);
    bench_test_way::<5>(c);
    bench_test_way::<6>(c);
    bench_test_way::<7>(c);
    bench_test_way::<8>(c);
}

// BENCHMARK 4: Fixed vs Dynamic Dispatch

fn bench_fixed_vs_dynamic(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_vs_dynamic");
    let keys = generate_u64_keys(10_000);

    let mut fixed = PageBloomFilter::<7>::new(10, 16).unwrap();
    let mut dynamic = DynPageBloomFilter::from(PageBloomFilter::<7>::new(10, 16).unwrap());
    for key in &keys {
        fixed.set(key);
        dynamic.set(key);
    }

    group.bench_function("fixed", |b| {
        let mut idx = 0;
        b.iter(|| {
            let hit = fixed.test(black_box(&keys[idx % keys.len()]));
            idx += 1;
            hit
        });
    });

    group.bench_function("dynamic", |b| {
        let mut idx = 0;
        b.iter(|| {
            let hit = dynamic.test(black_box(&keys[idx % keys.len()]));
            idx += 1;
            hit
        });
    });

    group.finish();
}

// BENCHMARK 5: Shared Filter

fn bench_shared(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_test");
    let keys = Arc::new(generate_u64_keys(10_000));
    let filter = Arc::new(SharedPageBloomFilter::with_rate(10_000, 0.01).unwrap());
    filter.set_batch(keys.iter().map(|k| &k[..]));

    for &threads in THREAD_COUNTS {
        group.throughput(Throughput::Elements((threads * keys.len()) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let handles: Vec<_> = (0..threads)
                        .map(|_| {
                            let filter = Arc::clone(&filter);
                            let keys = Arc::clone(&keys);
                            thread::spawn(move || {
                                keys.iter().filter(|key| filter.test(&key[..])).count()
                            })
                        })
                        .collect();
                    for handle in handles {
                        black_box(handle.join().unwrap());
                    }
                });
            },
        );
    }

    group.finish();
}

// BENCHMARK 6: Planning

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");

    for &fp_rate in FP_RATES {
        group.bench_with_input(
            BenchmarkId::from_parameter(fp_rate),
            &fp_rate,
            |b, &fp_rate| {
                b.iter(|| plan(black_box(1_000_000), black_box(fp_rate)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_hash,
    bench_set_by_size,
    bench_test_by_way,
    bench_fixed_vs_dynamic,
    bench_shared,
    bench_plan,
);

criterion_main!(benches);
