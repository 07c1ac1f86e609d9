//! Property-based tests for the analysis functions.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated consumption series.

use chrono::{Duration, TimeZone, Utc};
use energy_trends::core::{ForecastMethod, TimeSeriesPoint};
use energy_trends::detection::{calculate_autocorrelation, calculate_z_scores, detect_anomalies};
use energy_trends::error::AnalysisError;
use energy_trends::models::forecast;
use energy_trends::seasonality::{decompose_time_series, DecompositionConfig, SeasonalMethod};
use energy_trends::transform::{
    exponential_moving_average, simple_moving_average, weighted_moving_average,
    WEIGHT_SUM_TOLERANCE,
};
use energy_trends::weather::calculate_degree_days;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Daily series starting 2024-01-01.
fn make_series(values: &[f64]) -> Vec<TimeSeriesPoint> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| TimeSeriesPoint::new(base + Duration::days(i as i64), v))
        .collect()
}

fn shuffled(series: &[TimeSeriesPoint], seed: u64) -> Vec<TimeSeriesPoint> {
    let mut out = series.to_vec();
    out.shuffle(&mut StdRng::seed_from_u64(seed));
    out
}

/// Strategy for realistic consumption values.
fn consumption_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..max_len)
}

// =============================================================================
// Property: results do not depend on input order
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn sma_ignores_input_order(
        values in consumption_strategy(5, 60),
        window in 1usize..5,
        seed in any::<u64>()
    ) {
        let series = make_series(&values);
        let expected = simple_moving_average(&series, window).unwrap();
        let actual = simple_moving_average(&shuffled(&series, seed), window).unwrap();
        prop_assert_eq!(actual.len(), values.len() - window + 1);
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn z_scores_ignore_input_order(
        values in consumption_strategy(2, 60),
        seed in any::<u64>()
    ) {
        let series = make_series(&values);
        prop_assert_eq!(
            calculate_z_scores(&shuffled(&series, seed)).unwrap(),
            calculate_z_scores(&series).unwrap()
        );
    }
}

// =============================================================================
// Property: smoother parameter validation and seeding
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn wma_rejects_iff_weights_do_not_sum_to_one(
        values in consumption_strategy(10, 30),
        weights in prop::collection::vec(0.0..1.0_f64, 1..5)
    ) {
        let series = make_series(&values);
        let total: f64 = weights.iter().sum();
        let result = weighted_moving_average(&series, &weights);
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            prop_assert!(matches!(result, Err(AnalysisError::Validation(_))));
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn normalized_wma_stays_within_window_range(
        values in consumption_strategy(10, 30),
        raw in prop::collection::vec(0.1..1.0_f64, 1..5)
    ) {
        let total: f64 = raw.iter().sum();
        let weights: Vec<f64> = raw.iter().map(|w| w / total).collect();
        let series = make_series(&values);
        let wma = weighted_moving_average(&series, &weights).unwrap();

        prop_assert_eq!(wma.len(), values.len() - weights.len() + 1);
        for (i, p) in wma.iter().enumerate() {
            let window = &values[i..i + weights.len()];
            let lo = window.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(p.value >= lo - 1e-9 && p.value <= hi + 1e-9);
        }
    }

    #[test]
    fn ema_starts_at_first_observation(
        values in consumption_strategy(2, 50),
        alpha in 0.01..0.99_f64
    ) {
        let series = make_series(&values);
        let ema = exponential_moving_average(&series, alpha).unwrap();
        prop_assert_eq!(ema.len(), values.len());
        prop_assert_eq!(ema[0].value, values[0]);
    }
}

// =============================================================================
// Property: decomposition and detection invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn additive_components_reconstruct_series(
        values in consumption_strategy(24, 120),
        periodicity in prop::sample::select(vec![4usize, 7, 12])
    ) {
        let series = make_series(&values);
        let config = DecompositionConfig::default()
            .with_method(SeasonalMethod::Additive)
            .with_periodicity(periodicity);
        let result = decompose_time_series(&series, &config).unwrap();

        prop_assert_eq!(result.len(), values.len());
        for (rebuilt, original) in result.reconstruct().iter().zip(&values) {
            prop_assert!((rebuilt - original).abs() < 1e-6);
        }
        prop_assert!((0.0..=1.0).contains(&result.seasonal_strength));
    }

    #[test]
    fn constant_series_has_zero_autocorrelation(
        level in -500.0..500.0_f64,
        len in 5usize..50,
        lag in 1usize..4
    ) {
        let series = make_series(&vec![level; len]);
        prop_assert_eq!(calculate_autocorrelation(&series, lag).unwrap(), 0.0);
    }

    #[test]
    fn no_anomalies_above_max_z(values in consumption_strategy(2, 60)) {
        let series = make_series(&values);
        let max_z = calculate_z_scores(&series)
            .unwrap()
            .iter()
            .map(|p| p.z_score.abs())
            .fold(0.0, f64::max);
        prop_assert!(detect_anomalies(&series, max_z).unwrap().is_empty());
    }

    #[test]
    fn degree_days_never_both_positive(
        temps in prop::collection::vec(-20.0..110.0_f64, 1..60),
        base in 50.0..75.0_f64
    ) {
        let series = make_series(&temps);
        let dd = calculate_degree_days(&series, base, base).unwrap();
        for d in &dd.daily {
            prop_assert!(d.hdd >= 0.0 && d.cdd >= 0.0);
            prop_assert!(d.hdd == 0.0 || d.cdd == 0.0);
        }
    }
}

// =============================================================================
// Property: forecasts
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn forecast_length_matches_horizon(
        values in consumption_strategy(3, 60),
        periods in 0usize..20,
        linear in any::<bool>()
    ) {
        let method = if linear { ForecastMethod::Linear } else { ForecastMethod::Simple };
        let series = make_series(&values);
        let f = forecast(&series, method, periods, Duration::days(1)).unwrap();
        prop_assert_eq!(f.horizon(), periods);
        prop_assert_eq!(f.method(), method);
        for v in f.values() {
            prop_assert!(v.is_finite());
        }
    }

    #[test]
    fn linear_intervals_bracket_point_forecast(
        values in consumption_strategy(3, 60),
        periods in 1usize..20
    ) {
        let series = make_series(&values);
        let f = forecast(&series, ForecastMethod::Linear, periods, Duration::days(1)).unwrap();
        let lower = f.lower().unwrap();
        let upper = f.upper().unwrap();
        for ((l, u), p) in lower.iter().zip(upper).zip(f.values()) {
            prop_assert!(*l <= p && p <= *u);
        }
    }
}

// =============================================================================
// Property: short input is rejected, never panics
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn short_series_is_insufficient_data(values in consumption_strategy(0, 24)) {
        let series = make_series(&values);
        let got = values.len();
        prop_assert_eq!(
            decompose_time_series(&series, &DecompositionConfig::default()).unwrap_err(),
            AnalysisError::InsufficientData { needed: 24, got }
        );
        if got < 3 {
            prop_assert_eq!(
                forecast(&series, ForecastMethod::Simple, 1, Duration::days(1)).unwrap_err(),
                AnalysisError::InsufficientData { needed: 3, got }
            );
        }
    }
}
