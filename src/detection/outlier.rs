//! Z-score anomaly detection.

use crate::core::{prepare, values, TimeSeriesPoint};
use crate::error::{AnalysisError, Result};
use crate::utils::{mean, safe_divide, std_dev};
use chrono::{DateTime, Utc};

/// Default |z| above which an observation is flagged.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.0;

/// An observation annotated with its z-score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZScorePoint {
    pub date: DateTime<Utc>,
    pub value: f64,
    pub z_score: f64,
}

/// Z-score of every observation, in date order.
///
/// Uses the population standard deviation; a constant series scores 0
/// everywhere.
pub fn calculate_z_scores(series: &[TimeSeriesPoint]) -> Result<Vec<ZScorePoint>> {
    let sorted = prepare(series, 2)?;
    let values = values(&sorted);
    let m = mean(&values);
    let sd = std_dev(&values);

    Ok(sorted
        .iter()
        .map(|p| ZScorePoint {
            date: p.date,
            value: p.value,
            z_score: safe_divide(p.value - m, sd, 0.0),
        })
        .collect())
}

/// Observations whose |z-score| is strictly greater than `threshold`.
pub fn detect_anomalies(series: &[TimeSeriesPoint], threshold: f64) -> Result<Vec<ZScorePoint>> {
    if !(threshold >= 0.0 && threshold.is_finite()) {
        return Err(AnalysisError::validation(format!(
            "anomaly threshold must be finite and non-negative, got {threshold}"
        )));
    }

    Ok(calculate_z_scores(series)?
        .into_iter()
        .filter(|p| p.z_score.abs() > threshold)
        .collect())
}
