//! Classical trend/seasonal/residual decomposition.
//!
//! The trend is a centered moving average held constant at the edges. The
//! seasonal component averages the detrended values per calendar position
//! (month, day of week or hour, or plain `index % periodicity` for other
//! periodicities). The residual is what remains.

use crate::core::{prepare, values, CalendarUnit, TimeSeriesPoint};
use crate::error::{AnalysisError, Result};
use crate::transform::centered_moving_average;
use crate::utils::{mean, population_variance, safe_divide};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Minimum series length for decomposition and seasonal indices.
pub const MIN_DECOMPOSITION_POINTS: usize = 24;

/// How seasonal effects combine with the trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeasonalMethod {
    /// `value = trend + seasonal + residual`
    Additive,
    /// `value = trend * seasonal * residual`
    #[default]
    Multiplicative,
}

impl SeasonalMethod {
    /// Remove `effect` from `value`. A zero multiplicative effect passes the
    /// value through unchanged.
    pub fn remove(self, value: f64, effect: f64) -> f64 {
        match self {
            SeasonalMethod::Additive => value - effect,
            SeasonalMethod::Multiplicative => safe_divide(value, effect, value),
        }
    }
}

/// Configuration for [`decompose_time_series`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecompositionConfig {
    pub method: SeasonalMethod,
    /// Observations per seasonal cycle. 12, 7 and 24 group by month, day of
    /// week and hour respectively.
    pub periodicity: usize,
    /// Trend window. Defaults to `max(periodicity, len / 8)`.
    pub smoothing_window_size: Option<usize>,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            method: SeasonalMethod::Multiplicative,
            periodicity: 12,
            smoothing_window_size: None,
        }
    }
}

impl DecompositionConfig {
    pub fn with_method(mut self, method: SeasonalMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_periodicity(mut self, periodicity: usize) -> Self {
        self.periodicity = periodicity;
        self
    }

    pub fn with_smoothing_window(mut self, window: usize) -> Self {
        self.smoothing_window_size = Some(window);
        self
    }
}

/// Result of a decomposition. All arrays run parallel to `dates`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecompositionResult {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
    /// Share of seasonal variance in seasonal-plus-residual variance, in [0, 1].
    pub seasonal_strength: f64,
    pub dates: Vec<DateTime<Utc>>,
    pub method: SeasonalMethod,
}

impl DecompositionResult {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Recombine the components.
    pub fn reconstruct(&self) -> Vec<f64> {
        self.trend
            .iter()
            .zip(&self.seasonal)
            .zip(&self.residual)
            .map(|((t, s), r)| match self.method {
                SeasonalMethod::Additive => t + s + r,
                SeasonalMethod::Multiplicative => t * s * r,
            })
            .collect()
    }

    /// Trend combined with residual, i.e. the series with seasonality removed.
    pub fn seasonally_adjusted(&self) -> Vec<f64> {
        self.trend
            .iter()
            .zip(&self.residual)
            .map(|(t, r)| match self.method {
                SeasonalMethod::Additive => t + r,
                SeasonalMethod::Multiplicative => t * r,
            })
            .collect()
    }
}

/// Decompose a series of at least 24 observations into trend, seasonal and
/// residual components.
pub fn decompose_time_series(
    series: &[TimeSeriesPoint],
    config: &DecompositionConfig,
) -> Result<DecompositionResult> {
    if config.periodicity == 0 {
        return Err(AnalysisError::validation("periodicity must be at least 1"));
    }
    if config.smoothing_window_size == Some(0) {
        return Err(AnalysisError::validation(
            "smoothing window size must be at least 1",
        ));
    }
    let sorted = prepare(series, MIN_DECOMPOSITION_POINTS)?;
    let values = values(&sorted);
    let n = values.len();
    let method = config.method;

    let window = config
        .smoothing_window_size
        .unwrap_or_else(|| config.periodicity.max(n / 8))
        .min(n);
    let trend = centered_moving_average(&values, window);

    let detrended: Vec<f64> = values
        .iter()
        .zip(&trend)
        .map(|(&v, &t)| method.remove(v, t))
        .collect();

    let keys = seasonal_keys(&sorted, config.periodicity);
    let factors = seasonal_factors(&keys, &detrended, method);
    let seasonal: Vec<f64> = keys.iter().map(|k| factors[k]).collect();

    let residual: Vec<f64> = values
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((&v, &t), &s)| match method {
            SeasonalMethod::Additive => v - (t + s),
            SeasonalMethod::Multiplicative => safe_divide(v, t * s, 1.0),
        })
        .collect();

    let seasonal_strength = seasonal_strength(&seasonal, &residual);

    Ok(DecompositionResult {
        trend,
        seasonal,
        residual,
        seasonal_strength,
        dates: sorted.iter().map(|p| p.date).collect(),
        method,
    })
}

/// `var(seasonal) / (var(seasonal) + var(residual))`, clamped to [0, 1].
pub fn seasonal_strength(seasonal: &[f64], residual: &[f64]) -> f64 {
    let var_s = population_variance(seasonal);
    let var_r = population_variance(residual);
    safe_divide(var_s, var_s + var_r, 0.0).clamp(0.0, 1.0)
}

fn seasonal_keys(sorted: &[TimeSeriesPoint], periodicity: usize) -> Vec<u32> {
    match CalendarUnit::from_periodicity(periodicity) {
        Some(unit) => sorted.iter().map(|p| unit.key(p)).collect(),
        None => (0..sorted.len()).map(|i| (i % periodicity) as u32).collect(),
    }
}

/// Average detrended values per key, then normalize: additive factors sum to
/// zero, multiplicative factors average to one.
fn seasonal_factors(keys: &[u32], detrended: &[f64], method: SeasonalMethod) -> BTreeMap<u32, f64> {
    let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for (&k, &d) in keys.iter().zip(detrended) {
        groups.entry(k).or_default().push(d);
    }

    let raw: BTreeMap<u32, f64> = groups.into_iter().map(|(k, v)| (k, mean(&v))).collect();
    let overall = mean(&raw.values().copied().collect::<Vec<_>>());

    raw.into_iter()
        .map(|(k, f)| {
            let normalized = match method {
                SeasonalMethod::Additive => f - overall,
                SeasonalMethod::Multiplicative => safe_divide(f, overall, f),
            };
            (k, normalized)
        })
        .collect()
}
