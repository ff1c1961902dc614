//! Benchmarks for sorting, ranking and the wire codecs.
//!
//! Run with: cargo bench --package primitive-array
//! Or: cargo bench --package primitive-array --bench array_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use primitive_array::{CharArray, DoubleArray, IntArray, UIntArray};
use test_utils::{create_pseudo_random_f64, create_pseudo_random_i32, create_pseudo_random_words};

const SIZES: [usize; 3] = [1_000, 100_000, 1_000_000];
const SEED: u64 = 42;

// =============================================================================
// SORT BENCHMARKS
// =============================================================================

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        let ints = IntArray::from_values(create_pseudo_random_i32(size, i32::MIN, i32::MAX, SEED))
            .unwrap();
        group.bench_with_input(BenchmarkId::new("int", size), &ints, |b, ints| {
            b.iter(|| {
                let mut array = ints.clone();
                array.sort();
                black_box(array)
            })
        });

        // Unsigned kinds sort raw words then rotate the upper half.
        let uints = UIntArray::from_words(create_pseudo_random_words(size, SEED)).unwrap();
        group.bench_with_input(BenchmarkId::new("uint", size), &uints, |b, uints| {
            b.iter(|| {
                let mut array = uints.clone();
                array.sort();
                black_box(array)
            })
        });

        let doubles =
            DoubleArray::from_values(create_pseudo_random_f64(size, -1e6, 1e6, SEED)).unwrap();
        group.bench_with_input(BenchmarkId::new("double", size), &doubles, |b, doubles| {
            b.iter(|| {
                let mut array = doubles.clone();
                array.sort();
                black_box(array)
            })
        });
    }

    group.finish();
}

// =============================================================================
// RANKING BENCHMARKS
// =============================================================================

fn bench_make_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_indices");

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        // Few distinct values, the common case for categorical columns.
        let array = IntArray::from_values(create_pseudo_random_i32(size, 0, 100, SEED)).unwrap();
        group.bench_with_input(BenchmarkId::new("int_100_distinct", size), &array, |b, array| {
            let mut ranks = Vec::with_capacity(size);
            b.iter(|| black_box(array.make_indices(&mut ranks).len()))
        });

        let mut sorted = array.clone();
        sorted.sort();
        let mut ranks = Vec::new();
        let distinct = sorted.make_indices(&mut ranks).into_owned();
        group.bench_with_input(BenchmarkId::new("already_distinct", size), &distinct, |b, d| {
            let mut ranks = Vec::with_capacity(size);
            b.iter(|| black_box(d.make_indices(&mut ranks).len()))
        });
    }

    group.finish();
}

// =============================================================================
// CODEC BENCHMARKS
// =============================================================================

fn bench_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("codecs");
    let size = 100_000;
    group.throughput(Throughput::Elements(size as u64));

    let doubles =
        DoubleArray::from_values(create_pseudo_random_f64(size, -1e6, 1e6, SEED)).unwrap();
    group.bench_function("double_dap_encode", |b| {
        b.iter(|| black_box(doubles.to_dap_bytes().unwrap()))
    });

    let encoded = doubles.to_dap_bytes().unwrap();
    group.bench_function("double_dap_decode", |b| {
        b.iter(|| {
            let mut array = DoubleArray::new();
            array.internalize_dap(&mut encoded.clone()).unwrap();
            black_box(array)
        })
    });

    group.bench_function("double_stream_encode", |b| {
        b.iter(|| black_box(doubles.to_stream_bytes().unwrap()))
    });

    let chars = CharArray::from_words(
        create_pseudo_random_i32(size, 0x20, 0x7F, SEED)
            .into_iter()
            .map(|c| c as u16)
            .collect(),
    )
    .unwrap();
    group.bench_function("char_dap_encode", |b| {
        b.iter(|| black_box(chars.to_dap_bytes().unwrap()))
    });

    group.bench_function("double_json_csv", |b| {
        b.iter(|| black_box(doubles.to_json_csv_string()))
    });

    group.finish();
}

criterion_group!(benches, bench_sort, bench_make_indices, bench_codecs);
criterion_main!(benches);
