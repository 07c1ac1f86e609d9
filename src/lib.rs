//! # energy-trends
//!
//! Time series analysis for energy consumption data.
//!
//! Provides moving-average and kernel smoothing, classical seasonal
//! decomposition and calendar indices, cycle and anomaly detection,
//! weather correlation (degree days, temperature sensitivity,
//! normalization), short-horizon forecasting and upgrade ROI.
//!
//! All operations are pure functions over `&[TimeSeriesPoint]`; inputs are
//! never mutated and results are fresh values.

pub mod core;
pub mod detection;
pub mod error;
pub mod finance;
pub mod models;
pub mod seasonality;
pub mod transform;
pub mod utils;
pub mod weather;

pub use error::{AnalysisError, Result};

pub mod prelude {
    pub use crate::core::{CalendarUnit, Forecast, ForecastMethod, TimeSeriesPoint};
    pub use crate::error::{AnalysisError, Result};
    pub use crate::finance::{calculate_roi, RoiResult};
    pub use crate::models::forecast;
    pub use crate::seasonality::{decompose_time_series, DecompositionConfig, SeasonalMethod};
}
