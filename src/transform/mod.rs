//! Smoothing transformations for time series.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use energy_trends::core::TimeSeriesPoint;
//! use energy_trends::transform::{exponential_moving_average, gaussian_smooth};
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let series: Vec<_> = [3.0, 5.0, 4.0, 6.0, 5.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &v)| TimeSeriesPoint::new(start + Duration::days(i as i64), v))
//!     .collect();
//!
//! let ema = exponential_moving_average(&series, 0.3).unwrap();
//! assert_eq!(ema[0].value, 3.0);
//!
//! let smooth = gaussian_smooth(&series, 1.0, 3).unwrap();
//! assert_eq!(smooth.len(), 3);
//! ```

pub mod kernel;
pub mod window;

pub use kernel::{gaussian_kernel, gaussian_smooth};
pub use window::{
    centered_moving_average, exponential_moving_average, simple_moving_average,
    weighted_moving_average, WEIGHT_SUM_TOLERANCE,
};
