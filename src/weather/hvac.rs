//! Rule-of-thumb HVAC energy and savings estimates from degree days.

use crate::error::{AnalysisError, Result};
use crate::finance::{calculate_roi, RoiResult};

/// BTU per kWh.
pub const BTU_PER_KWH: f64 = 3412.0;

/// Efficiency factor used when the stated system efficiency is not positive.
const FALLBACK_EFFICIENCY_FACTOR: f64 = 1.25;

/// Efficiency gain assumed for an upgrade, capped at [`MAX_UPGRADED_EFFICIENCY`].
pub const UPGRADE_EFFICIENCY_GAIN: f64 = 0.2;
pub const MAX_UPGRADED_EFFICIENCY: f64 = 0.95;

/// Building and tariff assumptions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HvacProfile {
    /// Current system efficiency, 0-1.
    pub system_efficiency: f64,
    pub square_footage: f64,
    /// $ per kWh.
    pub electricity_rate: f64,
    /// BTU per square foot per heating degree day.
    pub heating_factor: f64,
    /// BTU per square foot per cooling degree day.
    pub cooling_factor: f64,
}

impl Default for HvacProfile {
    fn default() -> Self {
        Self {
            system_efficiency: 0.8,
            square_footage: 2000.0,
            electricity_rate: 0.14,
            heating_factor: 1.5,
            cooling_factor: 2.0,
        }
    }
}

impl HvacProfile {
    pub fn with_system_efficiency(mut self, efficiency: f64) -> Self {
        self.system_efficiency = efficiency;
        self
    }

    pub fn with_square_footage(mut self, square_footage: f64) -> Self {
        self.square_footage = square_footage;
        self
    }

    pub fn with_electricity_rate(mut self, rate: f64) -> Self {
        self.electricity_rate = rate;
        self
    }
}

/// Estimated HVAC consumption and upgrade savings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HvacImpact {
    pub heating_kwh: f64,
    pub cooling_kwh: f64,
    pub total_kwh: f64,
    pub estimated_cost: f64,
    pub improved_efficiency: f64,
    /// Cost avoided per period by upgrading to `improved_efficiency`.
    pub potential_savings: f64,
}

impl HvacImpact {
    /// Return on an upgrade that realizes `potential_savings` every year.
    pub fn roi(&self, implementation_cost: f64, years: u32, discount_rate: f64) -> Result<RoiResult> {
        calculate_roi(implementation_cost, self.potential_savings, years, discount_rate)
    }
}

/// Estimate HVAC energy use over a period with the given degree-day totals.
pub fn estimate_hvac_impact(
    total_hdd: f64,
    total_cdd: f64,
    profile: &HvacProfile,
) -> Result<HvacImpact> {
    if total_hdd < 0.0 || total_cdd < 0.0 || !total_hdd.is_finite() || !total_cdd.is_finite() {
        return Err(AnalysisError::validation(
            "degree-day totals must be finite and non-negative",
        ));
    }
    if !(profile.square_footage >= 0.0) || !(profile.electricity_rate >= 0.0) {
        return Err(AnalysisError::validation(
            "square footage and electricity rate must be non-negative",
        ));
    }

    let heating_btu = total_hdd * profile.square_footage * profile.heating_factor;
    let cooling_btu = total_cdd * profile.square_footage * profile.cooling_factor;

    let efficiency_factor = if profile.system_efficiency > 0.0 {
        1.0 / profile.system_efficiency
    } else {
        FALLBACK_EFFICIENCY_FACTOR
    };
    let improved_efficiency =
        (profile.system_efficiency + UPGRADE_EFFICIENCY_GAIN).min(MAX_UPGRADED_EFFICIENCY);
    let improved_factor = 1.0 / improved_efficiency;

    let heating_kwh = heating_btu / BTU_PER_KWH * efficiency_factor;
    let cooling_kwh = cooling_btu / BTU_PER_KWH * efficiency_factor;
    let total_kwh = heating_kwh + cooling_kwh;
    let improved_kwh = (heating_btu + cooling_btu) / BTU_PER_KWH * improved_factor;

    Ok(HvacImpact {
        heating_kwh,
        cooling_kwh,
        total_kwh,
        estimated_cost: total_kwh * profile.electricity_rate,
        improved_efficiency,
        potential_savings: (total_kwh - improved_kwh) * profile.electricity_rate,
    })
}
