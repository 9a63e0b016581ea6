//! Benchmarks for normalization and the end-to-end pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use demand_forecast::loader::ModelArtifact;
use demand_forecast::prelude::*;
use demand_forecast::GrowthMetrics;

fn generate_raw(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 60.0 + 80.0 * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin())
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for periods in [24, 120, 1200].iter() {
        let normalizer = demand_forecast::Normalizer::new(*periods);
        let short = generate_raw(*periods / 2);
        let long = generate_raw(*periods * 2);

        group.bench_with_input(BenchmarkId::new("pad", periods), periods, |b, _| {
            b.iter(|| normalizer.normalize(black_box(RawForecast::Sequence(short.clone()))))
        });

        group.bench_with_input(BenchmarkId::new("truncate", periods), periods, |b, _| {
            b.iter(|| normalizer.normalize(black_box(RawForecast::Sequence(long.clone()))))
        });
    }

    group.finish();
}

fn bench_growth(c: &mut Criterion) {
    let values: Vec<f64> = generate_raw(24).into_iter().map(f64::abs).collect();
    c.bench_function("growth_metrics", |b| {
        b.iter(|| GrowthMetrics::compute(black_box(&values)))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let key = ModelKey::new("Technology", "Entry-level");
    let source = InMemorySource::new().with(
        key.clone(),
        ModelArtifact::from_json(
            r#"{"kind":"arima","order":{"p":2,"d":1,"q":1},"ar":[0.5,-0.2],"ma":[0.3],
                "intercept":0.2,"history":[58.0,60.5,59.8,61.2,62.0],"residuals":[0.4,-0.1]}"#,
        )
        .unwrap(),
    );
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();

    c.bench_function("predict_arima", |b| {
        b.iter(|| pipeline.respond(&source, black_box(&key)))
    });
}

criterion_group!(benches, bench_normalize, bench_growth, bench_pipeline);

criterion_main!(benches);
