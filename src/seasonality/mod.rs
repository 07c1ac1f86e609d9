//! Seasonal decomposition and calendar indices.
//!
//! This module provides tools for analyzing seasonal patterns in time series:
//! - Classical decomposition into trend, seasonal and residual components
//! - Monthly, day-of-week, day-of-month and hourly seasonal indices
//! - Seasonal adjustment using those indices

mod decomposition;
mod indices;

pub use decomposition::{
    decompose_time_series, seasonal_strength, DecompositionConfig, DecompositionResult,
    SeasonalMethod, MIN_DECOMPOSITION_POINTS,
};
pub use indices::{
    apply_seasonal_adjustment, calculate_seasonal_indices, AdjustmentConfig, IndexMap,
    SeasonalIndexConfig, SeasonalIndices,
};
