//! Calendar seasonal indices and seasonal adjustment.

use super::decomposition::{SeasonalMethod, MIN_DECOMPOSITION_POINTS};
use crate::core::{has_sub_daily_sampling, prepare, sorted_by_date, values, CalendarUnit, TimeSeriesPoint};
use crate::error::Result;
use crate::utils::{mean, safe_divide};
use std::collections::BTreeMap;
use tracing::warn;

/// Index per calendar position.
pub type IndexMap = BTreeMap<u32, f64>;

/// Which seasonal indices to compute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonalIndexConfig {
    pub method: SeasonalMethod,
    pub monthly: bool,
    pub day_of_week: bool,
    pub day_of_month: bool,
    pub hourly: bool,
}

impl Default for SeasonalIndexConfig {
    fn default() -> Self {
        Self {
            method: SeasonalMethod::Multiplicative,
            monthly: true,
            day_of_week: true,
            day_of_month: false,
            hourly: false,
        }
    }
}

impl SeasonalIndexConfig {
    pub fn with_method(mut self, method: SeasonalMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_monthly(mut self, enabled: bool) -> Self {
        self.monthly = enabled;
        self
    }

    pub fn with_day_of_week(mut self, enabled: bool) -> Self {
        self.day_of_week = enabled;
        self
    }

    pub fn with_day_of_month(mut self, enabled: bool) -> Self {
        self.day_of_month = enabled;
        self
    }

    pub fn with_hourly(mut self, enabled: bool) -> Self {
        self.hourly = enabled;
        self
    }

    fn enabled(&self, unit: CalendarUnit) -> bool {
        match unit {
            CalendarUnit::Month => self.monthly,
            CalendarUnit::DayOfWeek => self.day_of_week,
            CalendarUnit::DayOfMonth => self.day_of_month,
            CalendarUnit::Hour => self.hourly,
        }
    }
}

/// Seasonal indices by calendar unit. Each map is independently optional.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonalIndices {
    pub method: SeasonalMethod,
    /// Month 1-12.
    pub monthly: Option<IndexMap>,
    /// Day of week, 0 = Sunday.
    pub day_of_week: Option<IndexMap>,
    /// Day of month 1-31.
    pub day_of_month: Option<IndexMap>,
    /// Hour 0-23.
    pub hourly: Option<IndexMap>,
    /// Non-fatal data quality notes.
    pub warnings: Vec<String>,
}

impl SeasonalIndices {
    /// Index map for `unit`, if computed.
    pub fn get(&self, unit: CalendarUnit) -> Option<&IndexMap> {
        match unit {
            CalendarUnit::Month => self.monthly.as_ref(),
            CalendarUnit::DayOfWeek => self.day_of_week.as_ref(),
            CalendarUnit::DayOfMonth => self.day_of_month.as_ref(),
            CalendarUnit::Hour => self.hourly.as_ref(),
        }
    }

    fn slot(&mut self, unit: CalendarUnit) -> &mut Option<IndexMap> {
        match unit {
            CalendarUnit::Month => &mut self.monthly,
            CalendarUnit::DayOfWeek => &mut self.day_of_week,
            CalendarUnit::DayOfMonth => &mut self.day_of_month,
            CalendarUnit::Hour => &mut self.hourly,
        }
    }
}

/// Which index maps [`apply_seasonal_adjustment`] uses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjustmentConfig {
    pub method: SeasonalMethod,
    pub monthly: bool,
    pub day_of_week: bool,
    pub day_of_month: bool,
    pub hourly: bool,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            method: SeasonalMethod::Multiplicative,
            monthly: true,
            day_of_week: true,
            day_of_month: true,
            hourly: true,
        }
    }
}

impl AdjustmentConfig {
    /// Adjust with only the given units.
    pub fn only(method: SeasonalMethod, units: &[CalendarUnit]) -> Self {
        Self {
            method,
            monthly: units.contains(&CalendarUnit::Month),
            day_of_week: units.contains(&CalendarUnit::DayOfWeek),
            day_of_month: units.contains(&CalendarUnit::DayOfMonth),
            hourly: units.contains(&CalendarUnit::Hour),
        }
    }

    pub fn with_method(mut self, method: SeasonalMethod) -> Self {
        self.method = method;
        self
    }

    fn enabled(&self, unit: CalendarUnit) -> bool {
        match unit {
            CalendarUnit::Month => self.monthly,
            CalendarUnit::DayOfWeek => self.day_of_week,
            CalendarUnit::DayOfMonth => self.day_of_month,
            CalendarUnit::Hour => self.hourly,
        }
    }
}

const UNITS: [CalendarUnit; 4] = [
    CalendarUnit::Month,
    CalendarUnit::DayOfWeek,
    CalendarUnit::DayOfMonth,
    CalendarUnit::Hour,
];

/// Compute the enabled calendar indices for a series of at least 24 points.
///
/// Each index compares a calendar group's mean with the overall mean:
/// a ratio for multiplicative indices (1 when the overall mean is 0), a
/// difference for additive ones.
pub fn calculate_seasonal_indices(
    series: &[TimeSeriesPoint],
    config: &SeasonalIndexConfig,
) -> Result<SeasonalIndices> {
    let sorted = prepare(series, MIN_DECOMPOSITION_POINTS)?;
    let overall = mean(&values(&sorted));

    let mut indices = SeasonalIndices {
        method: config.method,
        ..Default::default()
    };

    if config.hourly && !has_sub_daily_sampling(&sorted) {
        let message = "hourly indices requested but the series has no sub-daily sampling";
        warn!(points = sorted.len(), "{message}");
        indices.warnings.push(message.to_string());
    }

    for unit in UNITS {
        if !config.enabled(unit) {
            continue;
        }
        let map = group_indices(&sorted, unit, overall, config.method);
        *indices.slot(unit) = Some(map);
    }

    Ok(indices)
}

fn group_indices(
    sorted: &[TimeSeriesPoint],
    unit: CalendarUnit,
    overall: f64,
    method: SeasonalMethod,
) -> IndexMap {
    let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for p in sorted {
        groups.entry(unit.key(p)).or_default().push(p.value);
    }

    groups
        .into_iter()
        .map(|(key, vals)| {
            let group_mean = mean(&vals);
            let index = match method {
                SeasonalMethod::Additive => group_mean - overall,
                SeasonalMethod::Multiplicative => safe_divide(group_mean, overall, 1.0),
            };
            (key, index)
        })
        .collect()
}

/// Remove seasonal effects from a sorted copy of `series`.
///
/// Each enabled, present index map is applied in turn. Calendar positions
/// missing from a map, and zero multiplicative indices, leave the value
/// untouched.
pub fn apply_seasonal_adjustment(
    series: &[TimeSeriesPoint],
    indices: &SeasonalIndices,
    config: &AdjustmentConfig,
) -> Vec<TimeSeriesPoint> {
    let mut adjusted = sorted_by_date(series);

    for unit in UNITS {
        if !config.enabled(unit) {
            continue;
        }
        let Some(map) = indices.get(unit) else {
            continue;
        };
        for p in adjusted.iter_mut() {
            if let Some(&index) = map.get(&unit.key(p)) {
                p.value = config.method.remove(p.value, index);
            }
        }
    }

    adjusted
}
