//! Gaussian kernel smoothing.

use crate::core::{prepare, TimeSeriesPoint};
use crate::error::{AnalysisError, Result};

/// Normalized discrete Gaussian kernel of odd length `size`.
pub fn gaussian_kernel(sigma: f64, size: usize) -> Vec<f64> {
    let half = (size / 2) as f64;
    let raw: Vec<f64> = (0..size)
        .map(|j| {
            let d = j as f64 - half;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|k| k / total).collect()
}

/// Smooth a series by centered convolution with a Gaussian kernel.
///
/// No edge extrapolation is done: the output is shorter than the input by
/// `kernel_size - 1`, trimmed evenly from both ends, and each output keeps
/// the date of its window center.
pub fn gaussian_smooth(
    series: &[TimeSeriesPoint],
    sigma: f64,
    kernel_size: usize,
) -> Result<Vec<TimeSeriesPoint>> {
    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(AnalysisError::validation(format!(
            "sigma must be positive, got {sigma}"
        )));
    }
    if kernel_size.is_multiple_of(2) {
        return Err(AnalysisError::validation(format!(
            "kernel size must be odd, got {kernel_size}"
        )));
    }
    let sorted = prepare(series, kernel_size)?;
    let kernel = gaussian_kernel(sigma, kernel_size);
    let half = kernel_size / 2;

    Ok(sorted
        .windows(kernel_size)
        .map(|w| {
            let value: f64 = w.iter().zip(&kernel).map(|(p, k)| p.value * k).sum();
            TimeSeriesPoint::new(w[half].date, value)
        })
        .collect())
}
