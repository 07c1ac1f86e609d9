//! Benchmarks for the analysis pipeline on growing series.

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use energy_trends::core::{ForecastMethod, TimeSeriesPoint};
use energy_trends::detection::{detect_anomalies, find_cyclical_patterns, CycleConfig};
use energy_trends::models::forecast;
use energy_trends::seasonality::{decompose_time_series, DecompositionConfig};
use energy_trends::transform::{gaussian_smooth, simple_moving_average};
use energy_trends::weather::{calculate_temperature_sensitivity, SensitivityConfig};

/// Hourly load with daily and weekly cycles.
fn generate_load(n: usize) -> Vec<TimeSeriesPoint> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let t = i as f64;
            let value = 100.0
                + 20.0 * (2.0 * std::f64::consts::PI * t / 24.0).sin()
                + 10.0 * (2.0 * std::f64::consts::PI * t / 168.0).sin()
                + 0.01 * t;
            TimeSeriesPoint::new(base + Duration::hours(i as i64), value)
        })
        .collect()
}

fn generate_temperatures(n: usize) -> Vec<TimeSeriesPoint> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let t = 60.0 - 25.0 * (2.0 * std::f64::consts::PI * i as f64 / 365.0).cos();
            TimeSeriesPoint::new(base + Duration::days(i as i64), t)
        })
        .collect()
}

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");

    for size in [256, 1024, 4096].iter() {
        let series = generate_load(*size);

        group.bench_with_input(BenchmarkId::new("sma_24", size), size, |b, _| {
            b.iter(|| simple_moving_average(black_box(&series), 24))
        });

        group.bench_with_input(BenchmarkId::new("gaussian_9", size), size, |b, _| {
            b.iter(|| gaussian_smooth(black_box(&series), 2.0, 9))
        });
    }

    group.finish();
}

fn bench_decomposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("decomposition");
    let config = DecompositionConfig::default().with_periodicity(24);

    for size in [256, 1024, 4096].iter() {
        let series = generate_load(*size);
        group.bench_with_input(BenchmarkId::new("hourly", size), size, |b, _| {
            b.iter(|| decompose_time_series(black_box(&series), &config))
        });
    }

    group.finish();
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection");

    for size in [256, 1024].iter() {
        let series = generate_load(*size);
        let config = CycleConfig::default().with_max_period(200);

        group.bench_with_input(BenchmarkId::new("cycles", size), size, |b, _| {
            b.iter(|| find_cyclical_patterns(black_box(&series), &config))
        });

        group.bench_with_input(BenchmarkId::new("anomalies", size), size, |b, _| {
            b.iter(|| detect_anomalies(black_box(&series), 2.0))
        });
    }

    group.finish();
}

fn bench_weather_and_forecast(c: &mut Criterion) {
    let temps = generate_temperatures(365);
    let energy: Vec<TimeSeriesPoint> = temps
        .iter()
        .map(|t| {
            let hdd = (65.0 - t.value).max(0.0);
            let cdd = (t.value - 65.0).max(0.0);
            TimeSeriesPoint::new(t.date, 300.0 + 3.0 * hdd + 5.0 * cdd)
        })
        .collect();

    c.bench_function("temperature_sensitivity_365", |b| {
        b.iter(|| {
            calculate_temperature_sensitivity(
                black_box(&energy),
                black_box(&temps),
                &SensitivityConfig::default(),
            )
        })
    });

    c.bench_function("linear_forecast_365", |b| {
        b.iter(|| forecast(black_box(&energy), ForecastMethod::Linear, 30, Duration::days(1)))
    });
}

criterion_group!(
    benches,
    bench_smoothing,
    bench_decomposition,
    bench_detection,
    bench_weather_and_forecast
);
criterion_main!(benches);
