//! Forecast result structure for holding projected observations.

use super::time_series::TimeSeriesPoint;

/// Projection method used to produce a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForecastMethod {
    /// Last 3-point moving average held constant.
    Simple,
    /// Ordinary least squares on index vs. value, extrapolated.
    Linear,
}

/// A forecast: dated point projections with optional prediction intervals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Forecast {
    method: ForecastMethod,
    points: Vec<TimeSeriesPoint>,
    lower: Option<Vec<f64>>,
    upper: Option<Vec<f64>>,
}

impl Forecast {
    /// Create a forecast from point projections.
    pub fn new(method: ForecastMethod, points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            method,
            points,
            lower: None,
            upper: None,
        }
    }

    /// Attach prediction interval bounds.
    ///
    /// Bounds must have the same length as the point projections.
    pub fn with_intervals(mut self, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        debug_assert_eq!(lower.len(), self.points.len());
        debug_assert_eq!(upper.len(), self.points.len());
        self.lower = Some(lower);
        self.upper = Some(upper);
        self
    }

    pub fn method(&self) -> ForecastMethod {
        self.method
    }

    /// Number of projected steps.
    pub fn horizon(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Projected observations.
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    /// Projected values without dates.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn forecast_exposes_points_and_intervals() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let forecast = Forecast::new(
            ForecastMethod::Linear,
            vec![TimeSeriesPoint::new(date, 2.0)],
        );
        assert_eq!(forecast.horizon(), 1);
        assert!(!forecast.has_intervals());
        assert!(forecast.lower().is_none());

        let forecast = forecast.with_intervals(vec![1.0], vec![3.0]);
        assert!(forecast.has_intervals());
        assert_eq!(forecast.values(), vec![2.0]);
        assert_eq!(forecast.lower(), Some(&[1.0][..]));
        assert_eq!(forecast.upper(), Some(&[3.0][..]));
        assert_eq!(forecast.method(), ForecastMethod::Linear);
    }

    #[test]
    fn empty_forecast() {
        let forecast = Forecast::new(ForecastMethod::Simple, Vec::new());
        assert!(forecast.is_empty());
        assert_eq!(forecast.horizon(), 0);
    }
}
