use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kulid::{MonotonicUlidGenerator, SimpleUlidGenerator, Ulid, UlidGenerator};
use std::hint::black_box;
use std::sync::Arc;

pub fn batch_size_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch Size Comparison");

    // Larger batches amortise one lock acquisition over more ULIDs
    for &count in &[1usize, 16, 256, 4096] {
        let monotonic = MonotonicUlidGenerator::new();
        group.bench_with_input(BenchmarkId::new("monotonic", count), &count, |b, &count| {
            b.iter(|| black_box(monotonic.generate(count).unwrap()));
        });

        let simple = SimpleUlidGenerator::new();
        group.bench_with_input(BenchmarkId::new("simple", count), &count, |b, &count| {
            b.iter(|| black_box(simple.generate(count).unwrap()));
        });
    }

    group.finish();
}

pub fn text_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Text Form");
    let generator = MonotonicUlidGenerator::new();
    let ulid = generator.generate(1).unwrap()[0];
    let text = ulid.to_string();

    group.bench_function("render", |b| {
        b.iter(|| black_box(black_box(ulid).to_string()));
    });

    group.bench_function("render_array", |b| {
        b.iter(|| black_box(black_box(ulid).encode_array()));
    });

    group.bench_function("parse", |b| {
        b.iter(|| black_box(Ulid::parse(black_box(&text)).unwrap()));
    });

    group.finish();
}

pub fn concurrent_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent");

    for &thread_count in &[2, 4, 8] {
        group.bench_function(format!("threads/{}", thread_count), |b| {
            b.iter(|| {
                let generator = Arc::new(MonotonicUlidGenerator::new());
                let mut handles = Vec::with_capacity(thread_count);

                for _ in 0..thread_count {
                    let gen = Arc::clone(&generator);
                    handles.push(std::thread::spawn(move || {
                        black_box(gen.generate(64).unwrap());
                    }));
                }

                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    batch_size_comparison,
    text_benchmarks,
    concurrent_benchmarks
);
criterion_main!(benches);
