//! Weather-driven analysis of energy consumption.
//!
//! - Heating and cooling degree days
//! - Temperature sensitivity regression
//! - Monthly weather normalization and climate-zone estimates
//! - HVAC energy and upgrade savings estimates

mod degree_days;
mod hvac;
mod normalization;
mod sensitivity;

pub use degree_days::{
    calculate_degree_days, degree_days_with_config, ClimateIndicators, DegreeDayConfig,
    DegreeDayPoint, DegreeDays, MonthlyDegreeDays, COOLING_KWH_PER_DEGREE_DAY,
    DEFAULT_BASE_TEMPERATURE_F, HEATING_KWH_PER_DEGREE_DAY,
};
pub use hvac::{estimate_hvac_impact, HvacImpact, HvacProfile, BTU_PER_KWH};
pub use normalization::{
    estimate_degree_days, seasonal_adjustment_factors, weather_normalize, ClimateZone,
    DegreeDayEstimate, EstimationMethod, NormalizedPoint, GENERIC_DAILY_DEGREE_DAYS,
    MAX_ADJUSTMENT_FACTOR, MIN_ADJUSTMENT_FACTOR,
};
pub use sensitivity::{
    calculate_temperature_sensitivity, SensitivityConfig, SensitivityFit, TemperatureSensitivity,
    FALLBACK_R_SQUARED, MIN_SENSITIVITY_POINTS,
};
