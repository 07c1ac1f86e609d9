//! Autocorrelation-based cycle and seasonality detection.

use crate::core::{prepare, values, TimeSeriesPoint};
use crate::error::{AnalysisError, Result};
use crate::utils::{autocorrelation, pearson_correlation};

/// Minimum series length for [`find_cyclical_patterns`].
pub const MIN_CYCLE_POINTS: usize = 4;

/// Minimum series length for [`detect_seasonal_periods`].
pub const MIN_SEASONAL_POINTS: usize = 24;

/// Periods that are always checked by [`detect_seasonal_periods`].
pub const COMMON_PERIODS: [usize; 5] = [12, 24, 7, 30, 365];

const SEASONAL_LAG_THRESHOLD: f64 = 0.3;
const COMMON_PERIOD_THRESHOLD: f64 = 0.2;

/// A significant repeating pattern found by [`find_cyclical_patterns`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CyclicalPattern {
    /// Cycle length in observations.
    pub period: usize,
    /// Autocorrelation at `period`, in [-1, 1].
    pub strength: f64,
    /// Position within the cycle (0-based) where the folded mean peaks.
    pub phase: usize,
    pub description: String,
}

/// A lag retained by [`detect_seasonal_periods`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonalPeriod {
    pub period: usize,
    pub autocorrelation: f64,
}

/// Configuration for cyclical pattern scanning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleConfig {
    /// Largest period to scan. Defaults to half the series length.
    pub max_period: Option<usize>,
    /// Minimum absolute autocorrelation to report a period.
    pub threshold: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            max_period: None,
            threshold: 0.3,
        }
    }
}

impl CycleConfig {
    /// Set maximum period.
    pub fn with_max_period(mut self, max: usize) -> Self {
        self.max_period = Some(max);
        self
    }

    /// Set detection threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

/// Autocorrelation of the series at `lag`.
///
/// Returns exactly 0 for a zero-variance series.
pub fn calculate_autocorrelation(series: &[TimeSeriesPoint], lag: usize) -> Result<f64> {
    let sorted = prepare(series, lag + 1)?;
    Ok(autocorrelation(&values(&sorted), lag))
}

/// Scan periods `2..=max_period` for significant autocorrelation.
///
/// A period is reported when its absolute autocorrelation reaches the
/// threshold and is not exceeded by either neighbouring period. Results are
/// sorted by descending absolute strength.
pub fn find_cyclical_patterns(
    series: &[TimeSeriesPoint],
    config: &CycleConfig,
) -> Result<Vec<CyclicalPattern>> {
    let sorted = prepare(series, MIN_CYCLE_POINTS)?;
    let values = values(&sorted);
    let n = values.len();

    let max_period = config.max_period.unwrap_or(n / 2).min(n - 1);
    if max_period < 2 {
        return Ok(Vec::new());
    }

    let upper = (max_period + 1).min(n - 1);
    let acf: Vec<f64> = (0..=upper).map(|lag| autocorrelation(&values, lag)).collect();

    let mut patterns = Vec::new();
    for period in 2..=max_period {
        let strength = acf[period];
        let magnitude = strength.abs();
        if magnitude < config.threshold {
            continue;
        }

        let prev = acf[period - 1].abs();
        let next = if period < upper { acf[period + 1].abs() } else { 0.0 };
        if prev > magnitude || next > magnitude {
            continue;
        }

        patterns.push(CyclicalPattern {
            period,
            strength,
            phase: cycle_phase(&values, period),
            description: describe_period(period),
        });
    }

    patterns.sort_by(|a, b| {
        b.strength
            .abs()
            .partial_cmp(&a.strength.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.period.cmp(&b.period))
    });

    Ok(patterns)
}

/// Find seasonal lags in a series of at least 24 observations.
///
/// Lags `2..=len/3` above 0.3 are kept. The common periods
/// (12, 24, 7, 30, 365) are additionally checked against 0.2 when the series
/// covers at least two full cycles.
pub fn detect_seasonal_periods(series: &[TimeSeriesPoint]) -> Result<Vec<SeasonalPeriod>> {
    let sorted = prepare(series, MIN_SEASONAL_POINTS)?;
    let values = values(&sorted);
    let n = values.len();

    let mut periods: Vec<SeasonalPeriod> = (2..=n / 3)
        .map(|lag| SeasonalPeriod {
            period: lag,
            autocorrelation: autocorrelation(&values, lag),
        })
        .filter(|p| p.autocorrelation > SEASONAL_LAG_THRESHOLD)
        .collect();

    for period in COMMON_PERIODS {
        if period * 2 > n || periods.iter().any(|p| p.period == period) {
            continue;
        }
        let acf = autocorrelation(&values, period);
        if acf > COMMON_PERIOD_THRESHOLD {
            periods.push(SeasonalPeriod {
                period,
                autocorrelation: acf,
            });
        }
    }

    periods.sort_by(|a, b| {
        b.autocorrelation
            .partial_cmp(&a.autocorrelation)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.period.cmp(&b.period))
    });

    Ok(periods)
}

/// Pearson correlation between the series and itself shifted by `period`.
pub fn check_seasonality(series: &[TimeSeriesPoint], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(AnalysisError::validation("period must be at least 1"));
    }
    let sorted = prepare(series, 2 * period)?;
    let values = values(&sorted);
    let n = values.len();

    Ok(pearson_correlation(&values[..n - period], &values[period..]))
}

/// Human-readable label for a cycle length.
pub fn describe_period(period: usize) -> String {
    match period {
        1 => "Daily cycle".to_string(),
        7 => "Weekly cycle".to_string(),
        28..=31 => "Monthly cycle".to_string(),
        364..=366 => "Annual cycle".to_string(),
        n => format!("{n}-day cycle"),
    }
}

/// Position within the cycle with the highest folded mean.
fn cycle_phase(values: &[f64], period: usize) -> usize {
    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, v) in values.iter().enumerate() {
        sums[i % period] += v;
        counts[i % period] += 1;
    }

    let mut best = 0;
    let mut best_mean = f64::NEG_INFINITY;
    for (pos, (sum, count)) in sums.iter().zip(&counts).enumerate() {
        if *count == 0 {
            continue;
        }
        let m = sum / *count as f64;
        if m > best_mean {
            best_mean = m;
            best = pos;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone, Utc};

    fn make_series(values: &[f64]) -> Vec<TimeSeriesPoint> {
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| TimeSeriesPoint::new(base + Duration::days(i as i64), v))
            .collect()
    }

    fn generate_seasonal_series(n: usize, period: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 10.0 * (2.0 * std::f64::consts::PI * i as f64 / period as f64).sin())
            .collect()
    }

    #[test]
    fn autocorrelation_zero_for_constant() {
        let series = make_series(&[4.2; 12]);
        assert_eq!(calculate_autocorrelation(&series, 3).unwrap(), 0.0);
    }

    #[test]
    fn autocorrelation_requires_more_points_than_lag() {
        let series = make_series(&[1.0, 2.0, 3.0]);
        assert_eq!(
            calculate_autocorrelation(&series, 3),
            Err(AnalysisError::InsufficientData { needed: 4, got: 3 })
        );
        assert!(calculate_autocorrelation(&series, 2).is_ok());
    }

    #[test]
    fn autocorrelation_at_seasonal_lag_is_high() {
        let series = make_series(&generate_seasonal_series(120, 12));
        let acf = calculate_autocorrelation(&series, 12).unwrap();
        assert_relative_eq!(acf, 108.0 / 120.0, epsilon = 1e-6);
    }

    #[test]
    fn cyclical_patterns_find_weekly_cycle() {
        let series = make_series(&generate_seasonal_series(140, 7));
        let patterns = find_cyclical_patterns(&series, &CycleConfig::default()).unwrap();

        let weekly = patterns.iter().find(|p| p.period == 7).unwrap();
        assert!(weekly.strength > 0.8);
        assert_eq!(weekly.description, "Weekly cycle");
        // sin peaks at i = 7/4, i.e. folded position 2
        assert_eq!(weekly.phase, 2);

        for pair in patterns.windows(2) {
            assert!(pair[0].strength.abs() >= pair[1].strength.abs());
        }
    }

    #[test]
    fn cyclical_patterns_skip_neighbours() {
        let series = make_series(&generate_seasonal_series(120, 12));
        let patterns = find_cyclical_patterns(&series, &CycleConfig::default()).unwrap();
        assert!(patterns.iter().any(|p| p.period == 12));
        assert!(!patterns.iter().any(|p| p.period == 11 || p.period == 13));
    }

    #[test]
    fn cyclical_patterns_respect_max_period() {
        let series = make_series(&generate_seasonal_series(120, 12));
        let config = CycleConfig::default().with_max_period(10);
        let patterns = find_cyclical_patterns(&series, &config).unwrap();
        assert!(patterns.iter().all(|p| p.period <= 10));
    }

    #[test]
    fn cyclical_patterns_none_for_constant() {
        let series = make_series(&[1.0; 30]);
        assert!(find_cyclical_patterns(&series, &CycleConfig::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn describe_known_periods() {
        assert_eq!(describe_period(365), "Annual cycle");
        assert_eq!(describe_period(30), "Monthly cycle");
        assert_eq!(describe_period(7), "Weekly cycle");
        assert_eq!(describe_period(1), "Daily cycle");
        assert_eq!(describe_period(12), "12-day cycle");
    }

    #[test]
    fn seasonal_periods_include_common_period() {
        let series = make_series(&generate_seasonal_series(96, 12));
        let periods = detect_seasonal_periods(&series).unwrap();
        assert!(periods.iter().any(|p| p.period == 12));
        for pair in periods.windows(2) {
            assert!(pair[0].autocorrelation >= pair[1].autocorrelation);
        }
    }

    #[test]
    fn common_period_beyond_scan_range_is_force_checked() {
        // 12 > 30 / 3, so only the common-period pass can report it
        let series = make_series(&generate_seasonal_series(30, 12));
        let periods = detect_seasonal_periods(&series).unwrap();

        let annual = periods.iter().find(|p| p.period == 12).unwrap();
        assert!(annual.autocorrelation > COMMON_PERIOD_THRESHOLD);
        assert!(periods.iter().all(|p| p.period <= 10 || p.period == 12));
        // 24 and 30 do not fit twice into 30 points
        assert!(!periods.iter().any(|p| p.period == 24 || p.period == 30));
    }

    #[test]
    fn weak_common_period_uses_lower_bar() {
        // Period-24 component pulls the lag-12 autocorrelation down to ~0.25
        let values: Vec<f64> = (0..120)
            .map(|i| {
                let t = 2.0 * std::f64::consts::PI * i as f64;
                10.0 * (t / 12.0).sin() + 7.5 * (t / 24.0).sin()
            })
            .collect();
        let series = make_series(&values);
        let acf = |lag| calculate_autocorrelation(&series, lag).unwrap();
        assert!(acf(12) > COMMON_PERIOD_THRESHOLD && acf(12) <= SEASONAL_LAG_THRESHOLD);
        // Lags 3 and 27 sit in the same band but are not common periods
        for lag in [3, 27] {
            assert!(acf(lag) > COMMON_PERIOD_THRESHOLD && acf(lag) <= SEASONAL_LAG_THRESHOLD);
        }

        let periods = detect_seasonal_periods(&series).unwrap();
        let found: Vec<usize> = periods.iter().map(|p| p.period).collect();
        assert!(found.contains(&12));
        assert!(found.contains(&24));
        assert!(!found.contains(&3));
        assert!(!found.contains(&27));
        assert!(periods
            .iter()
            .filter(|p| p.period != 12)
            .all(|p| p.autocorrelation > SEASONAL_LAG_THRESHOLD));
    }

    #[test]
    fn seasonal_periods_require_24_points() {
        let series = make_series(&generate_seasonal_series(23, 12));
        assert_eq!(
            detect_seasonal_periods(&series),
            Err(AnalysisError::InsufficientData { needed: 24, got: 23 })
        );
    }

    #[test]
    fn check_seasonality_correlates_shifted_series() {
        let series = make_series(&generate_seasonal_series(48, 12));
        assert_relative_eq!(check_seasonality(&series, 12).unwrap(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(check_seasonality(&series, 6).unwrap(), -1.0, epsilon = 1e-9);

        assert_eq!(
            check_seasonality(&series[..20], 12),
            Err(AnalysisError::InsufficientData { needed: 24, got: 20 })
        );
        assert!(matches!(
            check_seasonality(&series, 0),
            Err(AnalysisError::Validation(_))
        ));
    }
}
