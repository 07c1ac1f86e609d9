//! Temperature sensitivity of energy use.
//!
//! Fits `energy = baseload + β_h·HDD + β_c·CDD` (or a single combined
//! degree-day slope) after joining energy observations to degree days by
//! calendar date.
//!
//! Energy observations on dates absent from the temperature series are
//! joined with `HDD = CDD = 0`. This is a known precision limitation, not an
//! error; [`TemperatureSensitivity::matched_observations`] reports how many
//! observations actually had weather data.

use super::degree_days::{calculate_degree_days, DEFAULT_BASE_TEMPERATURE_F};
use crate::core::{ensure_min_len, sorted_by_date, TimeSeriesPoint};
use crate::error::Result;
use crate::utils::{mean, simple_linear_regression, two_variable_regression};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

/// Minimum observations in both the energy and temperature series.
pub const MIN_SENSITIVITY_POINTS: usize = 10;

/// r² reported when the split model falls back to independent fits.
pub const FALLBACK_R_SQUARED: f64 = 0.5;

/// Configuration for [`calculate_temperature_sensitivity`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityConfig {
    pub base_heating_temp: f64,
    pub base_cooling_temp: f64,
    /// Fit separate heating and cooling slopes.
    pub split_heating_cooling: bool,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            base_heating_temp: DEFAULT_BASE_TEMPERATURE_F,
            base_cooling_temp: DEFAULT_BASE_TEMPERATURE_F,
            split_heating_cooling: true,
        }
    }
}

impl SensitivityConfig {
    pub fn with_base_temps(mut self, heating: f64, cooling: f64) -> Self {
        self.base_heating_temp = heating;
        self.base_cooling_temp = cooling;
        self
    }

    pub fn with_split_heating_cooling(mut self, split: bool) -> Self {
        self.split_heating_cooling = split;
        self
    }
}

/// Which regression produced a [`TemperatureSensitivity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensitivityFit {
    /// Joint two-predictor least squares.
    Split,
    /// Near-singular HDD/CDD system; two single-predictor fits. The r² is
    /// the [`FALLBACK_R_SQUARED`] placeholder.
    IndependentFallback,
    /// Single regression on `HDD + CDD`; both slopes carry its coefficient.
    Combined,
}

/// Fitted weather response of an energy series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureSensitivity {
    /// Energy use at zero degree days.
    pub baseload: f64,
    /// Energy per heating degree day.
    pub heating_slope: f64,
    /// Energy per cooling degree day.
    pub cooling_slope: f64,
    pub r_squared: f64,
    pub fit: SensitivityFit,
    /// Energy observations used.
    pub observations: usize,
    /// Energy observations whose date had temperature data.
    pub matched_observations: usize,
}

impl TemperatureSensitivity {
    /// Expected energy use for the given degree days.
    pub fn predict(&self, hdd: f64, cdd: f64) -> f64 {
        self.baseload + self.heating_slope * hdd + self.cooling_slope * cdd
    }
}

/// Regress energy use on heating and cooling degree days.
///
/// Both series need at least [`MIN_SENSITIVITY_POINTS`] observations.
pub fn calculate_temperature_sensitivity(
    energy: &[TimeSeriesPoint],
    temperature: &[TimeSeriesPoint],
    config: &SensitivityConfig,
) -> Result<TemperatureSensitivity> {
    ensure_min_len(energy, MIN_SENSITIVITY_POINTS)?;
    ensure_min_len(temperature, MIN_SENSITIVITY_POINTS)?;

    let degree_days = calculate_degree_days(
        temperature,
        config.base_heating_temp,
        config.base_cooling_temp,
    )?;
    // Later observations on the same date replace earlier ones
    let by_date: HashMap<NaiveDate, (f64, f64)> = degree_days
        .daily
        .iter()
        .map(|d| (d.date.date_naive(), (d.hdd, d.cdd)))
        .collect();

    let energy = sorted_by_date(energy);
    let mut y = Vec::with_capacity(energy.len());
    let mut hdd = Vec::with_capacity(energy.len());
    let mut cdd = Vec::with_capacity(energy.len());
    let mut matched = 0;
    for p in &energy {
        let (h, c) = match by_date.get(&p.date.date_naive()) {
            Some(&dd) => {
                matched += 1;
                dd
            }
            None => (0.0, 0.0),
        };
        y.push(p.value);
        hdd.push(h);
        cdd.push(c);
    }

    let (baseload, heating_slope, cooling_slope, r_squared, fit) = if config.split_heating_cooling
    {
        match two_variable_regression(&hdd, &cdd, &y) {
            Some(f) => (f.intercept, f.b1, f.b2, f.r_squared, SensitivityFit::Split),
            None => {
                debug!(
                    observations = y.len(),
                    "HDD/CDD system near-singular, fitting slopes independently"
                );
                let heat = simple_linear_regression(&hdd, &y);
                let cool = simple_linear_regression(&cdd, &y);
                let baseload = mean(&y) - heat.slope * mean(&hdd) - cool.slope * mean(&cdd);
                (
                    baseload,
                    heat.slope,
                    cool.slope,
                    FALLBACK_R_SQUARED,
                    SensitivityFit::IndependentFallback,
                )
            }
        }
    } else {
        let combined: Vec<f64> = hdd.iter().zip(&cdd).map(|(h, c)| h + c).collect();
        let f = simple_linear_regression(&combined, &y);
        (f.intercept, f.slope, f.slope, f.r_squared, SensitivityFit::Combined)
    };

    Ok(TemperatureSensitivity {
        baseload,
        heating_slope,
        cooling_slope,
        r_squared,
        fit,
        observations: y.len(),
        matched_observations: matched,
    })
}
