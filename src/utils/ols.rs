//! Ordinary Least Squares (OLS) regression utilities.
//!
//! Single-predictor fits back the trend slope and linear forecast; the
//! two-predictor fit backs the heating/cooling degree-day sensitivity model.
//! Both work on centered sums for conditioning.

use super::stats::{mean, safe_divide};

/// Determinant magnitude below which the two-predictor system is singular.
pub const SINGULAR_DETERMINANT: f64 = 1e-10;

/// Fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fitted plane `y = intercept + b1 * x1 + b2 * x2`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoVariableFit {
    pub intercept: f64,
    pub b1: f64,
    pub b2: f64,
    pub r_squared: f64,
}

/// Fit `y` on `x` by least squares.
///
/// Degenerate `x` (zero variance) gives slope 0 and intercept `mean(y)`.
/// Slices must have equal length and at least one element.
pub fn simple_linear_regression(x: &[f64], y: &[f64]) -> LinearFit {
    debug_assert_eq!(x.len(), y.len());
    let mx = mean(x);
    let my = mean(y);

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (a, b) in x.iter().zip(y) {
        sxx += (a - mx).powi(2);
        sxy += (a - mx) * (b - my);
    }

    let slope = safe_divide(sxy, sxx, 0.0);
    let intercept = my - slope * mx;
    let r_squared = r_squared(y, x.iter().map(|&xi| intercept + slope * xi));

    LinearFit {
        slope,
        intercept,
        r_squared,
    }
}

/// Fit `y` on the observation index `0..n`.
pub fn index_regression(y: &[f64]) -> LinearFit {
    let x: Vec<f64> = (0..y.len()).map(|i| i as f64).collect();
    simple_linear_regression(&x, y)
}

/// Solve the centered two-predictor normal equations.
///
/// Returns `None` when `|det| < SINGULAR_DETERMINANT`; callers decide on a
/// fallback.
pub fn two_variable_regression(x1: &[f64], x2: &[f64], y: &[f64]) -> Option<TwoVariableFit> {
    debug_assert!(x1.len() == y.len() && x2.len() == y.len());
    let m1 = mean(x1);
    let m2 = mean(x2);
    let my = mean(y);

    let (mut s11, mut s22, mut s12, mut s1y, mut s2y) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for ((a, b), c) in x1.iter().zip(x2).zip(y) {
        let (d1, d2, dy) = (a - m1, b - m2, c - my);
        s11 += d1 * d1;
        s22 += d2 * d2;
        s12 += d1 * d2;
        s1y += d1 * dy;
        s2y += d2 * dy;
    }

    let det = s11 * s22 - s12 * s12;
    if det.abs() < SINGULAR_DETERMINANT {
        return None;
    }

    let b1 = (s22 * s1y - s12 * s2y) / det;
    let b2 = (s11 * s2y - s12 * s1y) / det;
    let intercept = my - b1 * m1 - b2 * m2;
    let fitted = x1
        .iter()
        .zip(x2)
        .map(|(a, b)| intercept + b1 * a + b2 * b);

    Some(TwoVariableFit {
        intercept,
        b1,
        b2,
        r_squared: r_squared(y, fitted),
    })
}

/// `1 - SS_res / SS_tot`. A constant target fitted exactly scores 1.
fn r_squared(y: &[f64], fitted: impl Iterator<Item = f64>) -> f64 {
    let my = mean(y);
    let ss_tot: f64 = y.iter().map(|v| (v - my).powi(2)).sum();
    let ss_res: f64 = y.iter().zip(fitted).map(|(v, f)| (v - f).powi(2)).sum();
    1.0 - safe_divide(ss_res, ss_tot, 0.0)
}
