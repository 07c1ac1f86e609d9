//! Heating and cooling degree days.

use crate::core::{sorted_by_date, TimeSeriesPoint};
use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Standard degree-day base temperature (°F).
pub const DEFAULT_BASE_TEMPERATURE_F: f64 = 65.0;

/// Base temperatures for degree-day computation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeDayConfig {
    pub base_heating_temp: f64,
    pub base_cooling_temp: f64,
}

impl Default for DegreeDayConfig {
    fn default() -> Self {
        Self {
            base_heating_temp: DEFAULT_BASE_TEMPERATURE_F,
            base_cooling_temp: DEFAULT_BASE_TEMPERATURE_F,
        }
    }
}

impl DegreeDayConfig {
    pub fn with_base_heating_temp(mut self, temp: f64) -> Self {
        self.base_heating_temp = temp;
        self
    }

    pub fn with_base_cooling_temp(mut self, temp: f64) -> Self {
        self.base_cooling_temp = temp;
        self
    }
}

/// Degree days for a single temperature observation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeDayPoint {
    pub date: DateTime<Utc>,
    pub temperature: f64,
    pub hdd: f64,
    pub cdd: f64,
}

/// Degree-day totals for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthlyDegreeDays {
    pub hdd: f64,
    pub cdd: f64,
}

impl MonthlyDegreeDays {
    pub fn new(hdd: f64, cdd: f64) -> Self {
        Self { hdd, cdd }
    }

    pub fn combined(&self) -> f64 {
        self.hdd + self.cdd
    }
}

/// Degree days per observation plus monthly and overall totals.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeDays {
    /// One entry per observation, in date order.
    pub daily: Vec<DegreeDayPoint>,
    /// Totals keyed by calendar month (1-12), pooled across years.
    pub monthly: BTreeMap<u32, MonthlyDegreeDays>,
    pub total_hdd: f64,
    pub total_cdd: f64,
}

impl DegreeDays {
    /// Summary flags and rough energy impact from the overall totals.
    pub fn climate_indicators(&self) -> ClimateIndicators {
        ClimateIndicators::from_totals(self.total_hdd, self.total_cdd)
    }
}

/// kWh attributed to each heating degree day in the impact estimate.
pub const HEATING_KWH_PER_DEGREE_DAY: f64 = 0.5;

/// kWh attributed to each cooling degree day in the impact estimate.
pub const COOLING_KWH_PER_DEGREE_DAY: f64 = 0.7;

/// Whether heating or cooling dominates, and a coarse energy impact.
///
/// The two flags are both false when the totals are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClimateIndicators {
    pub heating_dominated: bool,
    pub cooling_dominated: bool,
    /// `(hdd * 0.5 + cdd * 0.7) / 1000`, in MWh.
    pub estimated_annual_energy_impact: f64,
}

impl ClimateIndicators {
    pub fn from_totals(total_hdd: f64, total_cdd: f64) -> Self {
        Self {
            heating_dominated: total_hdd > total_cdd,
            cooling_dominated: total_cdd > total_hdd,
            estimated_annual_energy_impact: (total_hdd * HEATING_KWH_PER_DEGREE_DAY
                + total_cdd * COOLING_KWH_PER_DEGREE_DAY)
                / 1000.0,
        }
    }
}

/// Compute degree days for a temperature series.
///
/// `hdd = max(0, base_heating - t)` and `cdd = max(0, t - base_cooling)`.
pub fn calculate_degree_days(
    temperatures: &[TimeSeriesPoint],
    base_heating_temp: f64,
    base_cooling_temp: f64,
) -> Result<DegreeDays> {
    if !base_heating_temp.is_finite() || !base_cooling_temp.is_finite() {
        return Err(AnalysisError::validation(
            "degree-day base temperatures must be finite",
        ));
    }

    let mut result = DegreeDays::default();
    for p in sorted_by_date(temperatures) {
        let hdd = (base_heating_temp - p.value).max(0.0);
        let cdd = (p.value - base_cooling_temp).max(0.0);

        let month = result.monthly.entry(p.month()).or_default();
        month.hdd += hdd;
        month.cdd += cdd;
        result.total_hdd += hdd;
        result.total_cdd += cdd;

        result.daily.push(DegreeDayPoint {
            date: p.date,
            temperature: p.value,
            hdd,
            cdd,
        });
    }

    Ok(result)
}

/// [`calculate_degree_days`] with bases taken from `config`.
pub fn degree_days_with_config(
    temperatures: &[TimeSeriesPoint],
    config: &DegreeDayConfig,
) -> Result<DegreeDays> {
    calculate_degree_days(temperatures, config.base_heating_temp, config.base_cooling_temp)
}
