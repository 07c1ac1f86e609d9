//! Payback, ROI, NPV and IRR for efficiency upgrades.
//!
//! An upgrade is modelled as a single up-front cost followed by a constant
//! annual saving for a whole number of years.

use crate::error::{AnalysisError, Result};
use tracing::debug;

/// Default annual discount rate.
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.03;

/// Lower end of the IRR search bracket.
pub const IRR_LOWER_BOUND: f64 = -0.999;
/// Upper end of the IRR search bracket.
pub const IRR_UPPER_BOUND: f64 = 1.0;
/// NPV magnitude accepted as a root.
pub const IRR_TOLERANCE: f64 = 1e-4;
/// Bisection iteration cap.
pub const IRR_MAX_ITERATIONS: usize = 1000;

/// Financial return of an upgrade.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoiResult {
    /// Years to recover the cost; infinite when savings are not positive.
    pub simple_payback_period: f64,
    /// `(total savings - cost) / cost`.
    pub roi: f64,
    pub npv: f64,
    /// `None` when no rate in the search bracket zeroes the NPV.
    pub irr: Option<f64>,
}

/// Compute payback, ROI, NPV and IRR.
///
/// # Example
/// ```
/// use energy_trends::finance::calculate_roi;
///
/// let result = calculate_roi(1000.0, 500.0, 2, 0.0).unwrap();
/// assert_eq!(result.simple_payback_period, 2.0);
/// assert_eq!(result.npv, 0.0);
/// assert_eq!(result.roi, 0.0);
/// ```
pub fn calculate_roi(
    implementation_cost: f64,
    annual_savings: f64,
    years_of_operation: u32,
    discount_rate: f64,
) -> Result<RoiResult> {
    if !(implementation_cost > 0.0 && implementation_cost.is_finite()) {
        return Err(AnalysisError::validation(format!(
            "implementation cost must be positive, got {implementation_cost}"
        )));
    }
    if years_of_operation == 0 {
        return Err(AnalysisError::validation("years of operation must be positive"));
    }
    if !(discount_rate >= 0.0 && discount_rate.is_finite()) {
        return Err(AnalysisError::validation(format!(
            "discount rate must be non-negative, got {discount_rate}"
        )));
    }
    if !annual_savings.is_finite() {
        return Err(AnalysisError::validation("annual savings must be finite"));
    }

    let simple_payback_period = if annual_savings > 0.0 {
        implementation_cost / annual_savings
    } else {
        f64::INFINITY
    };
    let roi = (annual_savings * years_of_operation as f64 - implementation_cost)
        / implementation_cost;

    Ok(RoiResult {
        simple_payback_period,
        roi,
        npv: net_present_value(
            implementation_cost,
            annual_savings,
            years_of_operation,
            discount_rate,
        ),
        irr: internal_rate_of_return(implementation_cost, annual_savings, years_of_operation),
    })
}

/// `-cost + Σ_{t=1..years} savings / (1 + rate)^t`.
///
/// Evaluated as the closed-form annuity `savings * (1 - (1+rate)^-years) / rate`,
/// with `ln_1p`/`exp_m1` keeping rates near zero accurate. `rate` must be
/// greater than -1.
pub fn net_present_value(cost: f64, annual_savings: f64, years: u32, rate: f64) -> f64 {
    let years = f64::from(years);
    let annuity_factor = if rate == 0.0 {
        years
    } else {
        -(-years * rate.ln_1p()).exp_m1() / rate
    };
    annual_savings * annuity_factor - cost
}

/// Rate in (`IRR_LOWER_BOUND`, `IRR_UPPER_BOUND`) where the NPV is zero,
/// found by bisection.
///
/// Returns `None` when savings are not positive, or when the NPV keeps one
/// sign over the whole bracket.
pub fn internal_rate_of_return(cost: f64, annual_savings: f64, years: u32) -> Option<f64> {
    if annual_savings <= 0.0 {
        return None;
    }

    let npv = |rate: f64| net_present_value(cost, annual_savings, years, rate);
    let mut low = IRR_LOWER_BOUND;
    let mut high = IRR_UPPER_BOUND;
    let mut npv_low = npv(low);
    let npv_high = npv(high);

    if npv_low.signum() == npv_high.signum() {
        debug!(cost, annual_savings, years, "NPV does not change sign over the IRR bracket");
        return None;
    }

    let mut mid = (low + high) / 2.0;
    for _ in 0..IRR_MAX_ITERATIONS {
        mid = (low + high) / 2.0;
        let npv_mid = npv(mid);
        if npv_mid.abs() < IRR_TOLERANCE {
            return Some(mid);
        }
        if npv_mid.signum() == npv_low.signum() {
            low = mid;
            npv_low = npv_mid;
        } else {
            high = mid;
        }
    }

    debug!(rate = mid, "IRR bisection reached its iteration cap");
    Some(mid)
}
