//! Extractor and pipeline throughput benchmarks.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `extract` | Single-threaded lines/s for request lines and for noise |
//! | `pipeline` | End-to-end lines/s through source, workers and sink at 1, 8 and 64 workers |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench pipeline_bench
//! open target/criterion/report/index.html
//! ```

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kal_core::{Extractor, LatencyFormat, Pipeline, PipelineSettings};
use std::hint::black_box;
use std::sync::Arc;

const REQUEST: &str = "I0101 10:20:30.123456 1234 wrap.go:47] LIST /api/v1/namespaces/default/pods?limit=500: (12.345ms) 200 [kubectl/v1.13.4 (linux/amd64) 10.0.0.7:51234]";
const NOISE: &str = "I0101 10:20:30.000000 1234 controller.go:102] Starting endpoint controller";

fn extractor() -> Extractor {
    Extractor::new(NaiveDate::from_ymd_opt(2019, 1, 1).expect("valid date"))
}

/// Four request lines per noise line, roughly what a busy apiserver logs.
fn corpus(lines: usize) -> String {
    let mut text = String::with_capacity(lines * REQUEST.len());
    for i in 0..lines {
        text.push_str(if i % 5 == 4 { NOISE } else { REQUEST });
        text.push('\n');
    }
    text
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

fn extract_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let ex = extractor();
    group.throughput(Throughput::Elements(1));

    group.bench_function("request_line", |b| {
        b.iter(|| ex.extract(black_box(REQUEST)).map(|r| r.to_csv(LatencyFormat::Text)))
    });
    group.bench_function("noise_line", |b| b.iter(|| ex.extract(black_box(NOISE))));

    group.finish();
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

fn pipeline_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let lines = 50_000usize;
    let input = corpus(lines);
    group.throughput(Throughput::Elements(lines as u64));
    group.sample_size(20);

    for workers in [1usize, 8, 64] {
        let pipeline = Pipeline::new(
            Arc::new(extractor()),
            PipelineSettings { workers, ..PipelineSettings::default() },
        );
        group.bench_with_input(BenchmarkId::new("workers", workers), &pipeline, |b, pipeline| {
            b.to_async(&runtime).iter(|| async {
                let (summary, _) = pipeline
                    .run(input.as_bytes(), tokio::io::sink())
                    .await
                    .expect("in-memory run");
                summary
            })
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion registration
// ---------------------------------------------------------------------------

criterion_group!(pipeline_benches, extract_bench, pipeline_bench);
criterion_main!(pipeline_benches);
