//! Moving-average smoothers.
//!
//! The dated smoothers (`simple_`, `weighted_`, `exponential_moving_average`)
//! use trailing windows: each output is stamped with the last date of its
//! window. [`centered_moving_average`] backs trend extraction and works on
//! raw values.

use crate::core::{prepare, TimeSeriesPoint};
use crate::error::{AnalysisError, Result};

/// Tolerance allowed when checking that weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-5;

/// Trailing simple moving average.
///
/// Output length is `len - window + 1`.
///
/// # Example
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use energy_trends::core::TimeSeriesPoint;
/// use energy_trends::transform::simple_moving_average;
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let series: Vec<_> = (0..5)
///     .map(|i| TimeSeriesPoint::new(start + Duration::days(i), (i + 1) as f64))
///     .collect();
/// let sma = simple_moving_average(&series, 3).unwrap();
/// let values: Vec<f64> = sma.iter().map(|p| p.value).collect();
/// assert_eq!(values, vec![2.0, 3.0, 4.0]);
/// assert_eq!(sma[0].date, series[2].date);
/// ```
pub fn simple_moving_average(
    series: &[TimeSeriesPoint],
    window: usize,
) -> Result<Vec<TimeSeriesPoint>> {
    if window == 0 {
        return Err(AnalysisError::validation("window must be at least 1"));
    }
    let sorted = prepare(series, window)?;

    Ok(sorted
        .windows(window)
        .map(|w| {
            let sum: f64 = w.iter().map(|p| p.value).sum();
            TimeSeriesPoint::new(w[window - 1].date, sum / window as f64)
        })
        .collect())
}

/// Trailing weighted moving average.
///
/// `weights[0]` applies to the most recent point of each window,
/// `weights[1]` to the one before it, and so on.
pub fn weighted_moving_average(
    series: &[TimeSeriesPoint],
    weights: &[f64],
) -> Result<Vec<TimeSeriesPoint>> {
    if weights.is_empty() {
        return Err(AnalysisError::validation("weights must not be empty"));
    }
    let total: f64 = weights.iter().sum();
    if !((total - 1.0).abs() <= WEIGHT_SUM_TOLERANCE) {
        return Err(AnalysisError::validation(format!(
            "weights must sum to 1, got {total}"
        )));
    }
    let sorted = prepare(series, weights.len())?;
    let last = weights.len() - 1;

    Ok(sorted
        .windows(weights.len())
        .map(|w| {
            let value: f64 = weights
                .iter()
                .enumerate()
                .map(|(j, weight)| weight * w[last - j].value)
                .sum();
            TimeSeriesPoint::new(w[last].date, value)
        })
        .collect())
}

/// Exponential moving average seeded with the first observation.
pub fn exponential_moving_average(
    series: &[TimeSeriesPoint],
    alpha: f64,
) -> Result<Vec<TimeSeriesPoint>> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(AnalysisError::validation(format!(
            "alpha must be in (0, 1), got {alpha}"
        )));
    }
    let sorted = prepare(series, 2)?;

    let mut result = Vec::with_capacity(sorted.len());
    let mut ema = sorted[0].value;
    result.push(TimeSeriesPoint::new(sorted[0].date, ema));
    for p in &sorted[1..] {
        ema = alpha * p.value + (1.0 - alpha) * ema;
        result.push(TimeSeriesPoint::new(p.date, ema));
    }

    Ok(result)
}

/// Centered moving average with edge holding.
///
/// Position `i` averages `values[i - window/2 .. i - window/2 + window]`.
/// Positions without a full window take the nearest computed value, so the
/// output has the input length and contains no NaN.
pub fn centered_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let window = window.clamp(1, n.max(1));
    if n == 0 {
        return Vec::new();
    }

    let half = window / 2;
    let first = half;
    let last = n - (window - half);

    let mut result = vec![0.0; n];
    let mut sum: f64 = values[..window].iter().sum();
    result[first] = sum / window as f64;
    for i in first + 1..=last {
        sum += values[i - half + window - 1] - values[i - half - 1];
        result[i] = sum / window as f64;
    }

    let (head, tail) = (result[first], result[last]);
    result[..first].fill(head);
    result[last + 1..].fill(tail);
    result
}
