//! Short-horizon forward projection.
//!
//! Two explicit methods, chosen by the caller:
//! - simple: the last 3-point moving average held flat
//! - linear: least-squares trend on observation index, extrapolated

use crate::core::{prepare, values, Forecast, ForecastMethod, TimeSeriesPoint};
use crate::error::{AnalysisError, Result};
use crate::transform::simple_moving_average;
use crate::utils::index_regression;
use chrono::{DateTime, Duration, Utc};
use statrs::distribution::{ContinuousCDF, Normal};

/// Window of the moving average behind [`generate_simple_forecast`].
pub const SIMPLE_FORECAST_WINDOW: usize = 3;

/// Default prediction interval coverage for linear forecasts.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Slope of the least-squares line through `(index, value)` after sorting.
pub fn calculate_linear_regression_slope(series: &[TimeSeriesPoint]) -> Result<f64> {
    let sorted = prepare(series, 2)?;
    Ok(index_regression(&values(&sorted)).slope)
}

/// Project the last 3-point moving average flat over `periods` steps.
pub fn generate_simple_forecast(
    series: &[TimeSeriesPoint],
    periods: usize,
    interval: Duration,
) -> Result<Forecast> {
    validate_interval(interval)?;
    let sma = simple_moving_average(series, SIMPLE_FORECAST_WINDOW)?;
    // The SMA's last point carries the last observed date.
    let last = sma[sma.len() - 1];

    let points = future_dates(last.date, periods, interval)?
        .into_iter()
        .map(|date| TimeSeriesPoint::new(date, last.value))
        .collect();
    Ok(Forecast::new(ForecastMethod::Simple, points))
}

/// Extrapolate the least-squares trend over `periods` steps with 95%
/// prediction intervals.
pub fn generate_linear_forecast(
    series: &[TimeSeriesPoint],
    periods: usize,
    interval: Duration,
) -> Result<Forecast> {
    generate_linear_forecast_with_level(series, periods, interval, DEFAULT_CONFIDENCE_LEVEL)
}

/// [`generate_linear_forecast`] with an explicit interval coverage.
///
/// Step `k` (0-based) is `intercept + slope * (n + k)`. Intervals need at
/// least three observations; with two the forecast has points only.
pub fn generate_linear_forecast_with_level(
    series: &[TimeSeriesPoint],
    periods: usize,
    interval: Duration,
    level: f64,
) -> Result<Forecast> {
    validate_interval(interval)?;
    if !(level > 0.0 && level < 1.0) {
        return Err(AnalysisError::validation(format!(
            "confidence level must be in (0, 1), got {level}"
        )));
    }
    let sorted = prepare(series, 2)?;
    let y = values(&sorted);
    let n = y.len();
    let fit = index_regression(&y);
    let last_date = sorted[n - 1].date;

    let positions: Vec<f64> = (0..periods).map(|k| (n + k) as f64).collect();
    let points: Vec<TimeSeriesPoint> = future_dates(last_date, periods, interval)?
        .into_iter()
        .zip(&positions)
        .map(|(date, &x)| TimeSeriesPoint::new(date, fit.predict(x)))
        .collect();

    let forecast = Forecast::new(ForecastMethod::Linear, points);
    if n < 3 {
        return Ok(forecast);
    }

    let ss_res: f64 = y
        .iter()
        .enumerate()
        .map(|(i, v)| (v - fit.predict(i as f64)).powi(2))
        .sum();
    let std_err = (ss_res / (n - 2) as f64).sqrt();
    let mean_x = (n - 1) as f64 / 2.0;
    let sxx: f64 = (0..n).map(|i| (i as f64 - mean_x).powi(2)).sum();
    let z = Normal::new(0.0, 1.0)
        .map_err(|e| AnalysisError::validation(e.to_string()))?
        .inverse_cdf(0.5 + level / 2.0);

    let (lower, upper): (Vec<f64>, Vec<f64>) = forecast
        .points()
        .iter()
        .zip(&positions)
        .map(|(p, &x)| {
            let half_width =
                z * std_err * (1.0 + 1.0 / n as f64 + (x - mean_x).powi(2) / sxx).sqrt();
            (p.value - half_width, p.value + half_width)
        })
        .unzip();

    Ok(forecast.with_intervals(lower, upper))
}

/// Dispatch to the requested method.
pub fn forecast(
    series: &[TimeSeriesPoint],
    method: ForecastMethod,
    periods: usize,
    interval: Duration,
) -> Result<Forecast> {
    match method {
        ForecastMethod::Simple => generate_simple_forecast(series, periods, interval),
        ForecastMethod::Linear => generate_linear_forecast(series, periods, interval),
    }
}

fn validate_interval(interval: Duration) -> Result<()> {
    if interval <= Duration::zero() {
        return Err(AnalysisError::validation("forecast interval must be positive"));
    }
    Ok(())
}

/// Dates `last + interval * k` for `k = 1..=periods`.
///
/// Fails with `Validation` when a step leaves chrono's representable range.
fn future_dates(
    last: DateTime<Utc>,
    periods: usize,
    interval: Duration,
) -> Result<Vec<DateTime<Utc>>> {
    (1..=periods)
        .map(|k| {
            i32::try_from(k)
                .ok()
                .and_then(|k| interval.checked_mul(k))
                .and_then(|offset| last.checked_add_signed(offset))
                .ok_or_else(|| {
                    AnalysisError::validation(format!(
                        "forecast step {k} of {interval} past {last} is out of range"
                    ))
                })
        })
        .collect()
}
