//! Detection utilities for time series analysis.
//!
//! This module provides tools for detecting:
//! - Cycles and seasonal lags via autocorrelation
//! - Anomalous observations via z-scores

mod outlier;
mod seasonality;

pub use outlier::{calculate_z_scores, detect_anomalies, ZScorePoint, DEFAULT_ANOMALY_THRESHOLD};
pub use seasonality::{
    calculate_autocorrelation, check_seasonality, describe_period, detect_seasonal_periods,
    find_cyclical_patterns, CycleConfig, CyclicalPattern, SeasonalPeriod, COMMON_PERIODS,
    MIN_CYCLE_POINTS, MIN_SEASONAL_POINTS,
};
