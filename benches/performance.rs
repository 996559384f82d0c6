//! Performance benchmarks for the statistics and reporting path

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;
use urlstat::{
    client::HttpFetcher,
    output::{OutputFormatterFactory, JsonReport},
    percentile, BatchReport, Dispatcher, FetchErrorKind, FetchOutcome, FetchResult, LatencyStats, Summary,
};

/// Deterministic pseudo-latencies in seconds
fn create_sample_latencies(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 0.010 + ((i * 7919) % 1000) as f64 / 1000.0)
        .collect()
}

/// Results with a 10% failure rate
fn create_sample_results(count: usize) -> Vec<FetchResult> {
    (0..count)
        .map(|i| {
            let outcome = if i % 10 == 0 {
                FetchOutcome::failure(FetchErrorKind::Timeout)
            } else {
                FetchOutcome::success(200, Duration::from_millis(10 + (i as u64 * 37) % 990))
            };
            FetchResult::new(format!("https://host-{}.example.com/", i), outcome)
        })
        .collect()
}

fn benchmark_percentile(c: &mut Criterion) {
    let mut group = c.benchmark_group("percentile");

    for size in [10, 100, 1_000, 10_000].iter() {
        let samples = create_sample_latencies(*size);

        group.bench_with_input(BenchmarkId::new("p90", size), size, |b, _| {
            b.iter(|| black_box(percentile(black_box(&samples), 0.9)));
        });

        group.bench_with_input(BenchmarkId::new("latency_stats", size), size, |b, _| {
            b.iter(|| black_box(LatencyStats::from_samples(black_box(&samples))));
        });
    }

    group.finish();
}

fn benchmark_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");

    for size in [100, 1_000, 10_000].iter() {
        let results = create_sample_results(*size);

        group.bench_with_input(BenchmarkId::new("from_results", size), size, |b, _| {
            b.iter(|| black_box(Summary::from_results(black_box(&results), Duration::from_secs(3))));
        });
    }

    group.finish();
}

fn benchmark_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let results = create_sample_results(1_000);
    let report = BatchReport::new(results.clone(), Duration::from_secs(3));
    let formatter = OutputFormatterFactory::create_plain_formatter();

    group.bench_function("format_lines", |b| {
        b.iter(|| {
            for result in &results {
                black_box(formatter.format_result(result));
            }
        });
    });

    group.bench_function("json_report", |b| {
        b.iter(|| black_box(JsonReport::new(&report).to_json_pretty()));
    });

    group.finish();
}

/// Answers immediately, isolating dispatcher overhead
struct InstantFetcher;

#[async_trait::async_trait]
impl HttpFetcher for InstantFetcher {
    async fn fetch(&self, _url: &str) -> FetchOutcome {
        FetchOutcome::success(200, Duration::from_millis(1))
    }
}

fn benchmark_dispatcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatcher");
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();

    for size in [100, 1_000].iter() {
        let urls: Vec<String> = (0..*size).map(|i| format!("https://host-{}.example.com/", i)).collect();
        let dispatcher = Dispatcher::new(Arc::new(InstantFetcher), 300);

        group.bench_with_input(BenchmarkId::new("run", size), size, |b, _| {
            b.iter(|| runtime.block_on(dispatcher.run(urls.clone(), |r| {
                black_box(r);
            })));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_percentile,
    benchmark_summary,
    benchmark_output,
    benchmark_dispatcher
);
criterion_main!(benches);
