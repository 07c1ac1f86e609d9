//! Weather normalization of consumption data.
//!
//! Monthly adjustment factors express how weather-driven each month is
//! relative to the annual average, and divide it back out of consumption.
//! When no measured degree days exist for a location, climate-zone
//! estimates stand in.

use super::degree_days::MonthlyDegreeDays;
use crate::core::{sorted_by_date, TimeSeriesPoint};
use crate::error::{AnalysisError, Result};
use crate::utils::safe_divide;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Lower clamp for monthly adjustment factors.
pub const MIN_ADJUSTMENT_FACTOR: f64 = 0.6;
/// Upper clamp for monthly adjustment factors.
pub const MAX_ADJUSTMENT_FACTOR: f64 = 1.8;

/// Coarse latitude-based climate zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClimateZone {
    /// Hot/tropical, below 27°.
    Tropical,
    /// Hot/warm, 27° to 34°.
    Warm,
    /// Mixed/moderate, 34° to 40°.
    Moderate,
    /// Mixed/cold, 40° to 45°.
    MixedCold,
    /// Cold, 45° and above.
    Cold,
}

impl ClimateZone {
    /// Classify by absolute latitude.
    pub fn from_latitude(latitude: f64) -> Self {
        let lat = latitude.abs();
        if lat < 27.0 {
            ClimateZone::Tropical
        } else if lat < 34.0 {
            ClimateZone::Warm
        } else if lat < 40.0 {
            ClimateZone::Moderate
        } else if lat < 45.0 {
            ClimateZone::MixedCold
        } else {
            ClimateZone::Cold
        }
    }

    /// Typical daily `(hdd, cdd)` for the zone.
    pub fn daily_degree_days(self) -> (f64, f64) {
        match self {
            ClimateZone::Tropical => (0.5, 8.0),
            ClimateZone::Warm => (2.0, 5.0),
            ClimateZone::Moderate => (5.0, 3.0),
            ClimateZone::MixedCold => (8.0, 1.0),
            ClimateZone::Cold => (12.0, 0.5),
        }
    }
}

/// Daily `(hdd, cdd)` used when no zone is known.
pub const GENERIC_DAILY_DEGREE_DAYS: (f64, f64) = (5.0, 3.0);

/// Source of a [`DegreeDayEstimate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EstimationMethod {
    ClimateZone,
    Generic,
}

/// Estimated degree days over a period without measured weather.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeDayEstimate {
    pub total_hdd: f64,
    pub total_cdd: f64,
    pub avg_hdd: f64,
    pub avg_cdd: f64,
    pub days: u32,
    pub method: EstimationMethod,
}

/// Estimate degree days for `days` days from a climate zone, or from the
/// generic estimate when the zone is unknown.
pub fn estimate_degree_days(zone: Option<ClimateZone>, days: u32) -> Result<DegreeDayEstimate> {
    if days == 0 {
        return Err(AnalysisError::validation("estimation period must cover at least one day"));
    }
    let ((avg_hdd, avg_cdd), method) = match zone {
        Some(z) => (z.daily_degree_days(), EstimationMethod::ClimateZone),
        None => (GENERIC_DAILY_DEGREE_DAYS, EstimationMethod::Generic),
    };

    Ok(DegreeDayEstimate {
        total_hdd: avg_hdd * days as f64,
        total_cdd: avg_cdd * days as f64,
        avg_hdd,
        avg_cdd,
        days,
        method,
    })
}

/// Northern-hemisphere monthly degree days used to fill gaps.
fn default_month(month: u32) -> MonthlyDegreeDays {
    match month {
        12 | 1 | 2 => MonthlyDegreeDays::new(20.0, 0.0),
        6..=8 => MonthlyDegreeDays::new(0.0, 20.0),
        _ => MonthlyDegreeDays::new(10.0, 5.0),
    }
}

/// Monthly weather adjustment factors from monthly degree days.
///
/// Months missing from `monthly` take seasonal defaults. Each factor is the
/// month's combined degree days over the 12-month mean, clamped to
/// [`MIN_ADJUSTMENT_FACTOR`, `MAX_ADJUSTMENT_FACTOR`]; all factors are 1 when
/// the mean is zero.
pub fn seasonal_adjustment_factors(monthly: &BTreeMap<u32, MonthlyDegreeDays>) -> BTreeMap<u32, f64> {
    let combined: Vec<(u32, f64)> = (1..=12)
        .map(|m| {
            let dd = monthly.get(&m).copied().unwrap_or_else(|| default_month(m));
            (m, dd.combined())
        })
        .collect();
    let average = combined.iter().map(|(_, c)| c).sum::<f64>() / 12.0;

    combined
        .into_iter()
        .map(|(m, c)| {
            let factor = safe_divide(c, average, 1.0).clamp(MIN_ADJUSTMENT_FACTOR, MAX_ADJUSTMENT_FACTOR);
            (m, factor)
        })
        .collect()
}

/// A consumption observation with its weather adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
    pub weather_factor: f64,
    pub normalized_value: f64,
}

/// Divide each observation by its month's adjustment factor.
///
/// Months without a factor use 1.
pub fn weather_normalize(
    series: &[TimeSeriesPoint],
    factors: &BTreeMap<u32, f64>,
) -> Vec<NormalizedPoint> {
    sorted_by_date(series)
        .into_iter()
        .map(|p| {
            let weather_factor = factors.get(&p.month()).copied().unwrap_or(1.0);
            NormalizedPoint {
                date: p.date,
                value: p.value,
                weather_factor,
                normalized_value: safe_divide(p.value, weather_factor, p.value),
            }
        })
        .collect()
}
