//! Time-stamped observations and the shared helpers every component uses.

use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};

/// A single `(date, value)` observation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSeriesPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(date: DateTime<Utc>, value: f64) -> Self {
        Self { date, value }
    }

    /// Calendar month, 1-12.
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Day of week, 0 = Sunday through 6 = Saturday.
    pub fn day_of_week(&self) -> u32 {
        self.date.weekday().num_days_from_sunday()
    }

    /// Day of month, 1-31.
    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    /// Hour of day, 0-23.
    pub fn hour(&self) -> u32 {
        self.date.hour()
    }
}

/// Calendar position used to group observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalendarUnit {
    Month,
    DayOfWeek,
    DayOfMonth,
    Hour,
}

impl CalendarUnit {
    /// Key of `point` for this unit.
    pub fn key(self, point: &TimeSeriesPoint) -> u32 {
        match self {
            CalendarUnit::Month => point.month(),
            CalendarUnit::DayOfWeek => point.day_of_week(),
            CalendarUnit::DayOfMonth => point.day_of_month(),
            CalendarUnit::Hour => point.hour(),
        }
    }

    /// Calendar unit implied by a seasonal periodicity, if any.
    pub fn from_periodicity(periodicity: usize) -> Option<Self> {
        match periodicity {
            12 => Some(CalendarUnit::Month),
            7 => Some(CalendarUnit::DayOfWeek),
            24 => Some(CalendarUnit::Hour),
            _ => None,
        }
    }
}

/// Return a copy of `series` sorted by date ascending.
///
/// The sort is stable: observations sharing a date keep their input order
/// and are never merged.
pub fn sorted_by_date(series: &[TimeSeriesPoint]) -> Vec<TimeSeriesPoint> {
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|p| p.date);
    sorted
}

/// Fail with [`AnalysisError::InsufficientData`] when `series` is too short.
pub fn ensure_min_len(series: &[TimeSeriesPoint], needed: usize) -> Result<()> {
    if series.len() < needed {
        return Err(AnalysisError::InsufficientData {
            needed,
            got: series.len(),
        });
    }
    Ok(())
}

/// Sort a copy of `series` after checking its length.
pub(crate) fn prepare(series: &[TimeSeriesPoint], needed: usize) -> Result<Vec<TimeSeriesPoint>> {
    ensure_min_len(series, needed)?;
    Ok(sorted_by_date(series))
}

/// Extract the values of a series, in slice order.
pub fn values(series: &[TimeSeriesPoint]) -> Vec<f64> {
    series.iter().map(|p| p.value).collect()
}

/// Extract the dates of a series, in slice order.
pub fn dates(series: &[TimeSeriesPoint]) -> Vec<DateTime<Utc>> {
    series.iter().map(|p| p.date).collect()
}

/// Whether any two consecutive (sorted) observations are less than a day apart.
pub fn has_sub_daily_sampling(sorted: &[TimeSeriesPoint]) -> bool {
    sorted
        .windows(2)
        .map(|w| w[1].date - w[0].date)
        .any(|gap| gap > chrono::Duration::zero() && gap < chrono::Duration::days(1))
}
