//! Core data structures for time series analysis.

mod forecast;
mod time_series;

pub use forecast::{Forecast, ForecastMethod};
pub use time_series::{
    dates, ensure_min_len, has_sub_daily_sampling, sorted_by_date, values, CalendarUnit,
    TimeSeriesPoint,
};

pub(crate) use time_series::prepare;
