//! Performance benchmarks for FMX
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fmx::bench::linear_count;
use fmx::index::suffix_array::build_suffix_array;
use fmx::index::{CancelToken, ConstructionStrategy, FmIndex, IndexBuilder, IndexReader, IndexWriter, Text};
use fmx::signal::Quantizer;

/// Deterministic random-walk track, quantized with the default settings
fn synthetic_symbols(len: usize) -> Vec<u8> {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    let mut value = 0.0f64;
    let samples: Vec<f64> = (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            value += ((state % 5) as f64 - 2.0) * 0.1;
            value = value.clamp(-5.0, 5.0);
            value
        })
        .collect();
    Quantizer::default().encode(&samples).symbols
}

fn build_index(data: &[u8]) -> FmIndex {
    let text = Text::new(data.to_vec()).expect("Failed to create text");
    IndexBuilder::with_defaults()
        .build(&text)
        .expect("Failed to build index")
        .index
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("suffix_array");
    group.sample_size(10);

    for len in [1_000, 10_000] {
        let text = Text::new(synthetic_symbols(len)).expect("Failed to create text");
        group.throughput(Throughput::Elements(len as u64));

        for strategy in [ConstructionStrategy::Naive, ConstructionStrategy::PrefixDoubling] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), len),
                &text,
                |b, text| {
                    b.iter(|| build_suffix_array(black_box(text), strategy, &CancelToken::new()))
                },
            );
        }
    }
    group.finish();
}

fn bench_count(c: &mut Criterion) {
    let data = synthetic_symbols(100_000);
    let index = build_index(&data);
    let quantizer = Quantizer::default();

    let targets: Vec<Vec<u8>> = [vec![0.5], vec![1.0, 1.1], vec![0.0, 0.1, 0.2, 0.1]]
        .iter()
        .map(|values| quantizer.encode_pattern(values).expect("Failed to encode target"))
        .collect();

    let mut group = c.benchmark_group("count");
    for (i, pattern) in targets.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("fm_index", i), pattern, |b, p| {
            b.iter(|| index.count(black_box(p)))
        });
        group.bench_with_input(BenchmarkId::new("linear_scan", i), pattern, |b, p| {
            b.iter(|| linear_count(black_box(&data), black_box(p)))
        });
    }
    group.finish();
}

fn bench_persistence(c: &mut Criterion) {
    let index = build_index(&synthetic_symbols(20_000));
    let bytes = IndexWriter::to_bytes(&index);

    let mut group = c.benchmark_group("persistence");
    group.sample_size(20);
    group.bench_function("write", |b| b.iter(|| IndexWriter::to_bytes(black_box(&index))));
    group.bench_function("read", |b| b.iter(|| IndexReader::from_bytes(black_box(&bytes))));
    group.finish();
}

criterion_group!(benches, bench_construction, bench_count, bench_persistence);
criterion_main!(benches);
