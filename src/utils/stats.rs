//! Statistical utility functions.

/// Divide `numerator` by `denominator`, returning `fallback` when the
/// denominator is zero or not finite.
///
/// Every division by a data-dependent quantity in this crate goes through
/// here, so degenerate input yields a documented value instead of NaN or
/// infinity.
///
/// # Example
/// ```
/// use energy_trends::utils::safe_divide;
///
/// assert_eq!(safe_divide(6.0, 3.0, 0.0), 2.0);
/// assert_eq!(safe_divide(6.0, 0.0, 0.0), 0.0);
/// // Passthrough fallback
/// assert_eq!(safe_divide(6.0, 0.0, 6.0), 6.0);
/// ```
pub fn safe_divide(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        fallback
    } else {
        numerator / denominator
    }
}

/// Calculate the mean of a slice.
///
/// A constant slice returns its value exactly, so deviations from the mean
/// are exactly zero.
pub fn mean(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return f64::NAN;
    };
    if values.iter().all(|&v| v == first) {
        return first;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (n denominator). Zero for fewer than one value.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Autocorrelation at `lag` around the full-series mean.
///
/// Returns 0 for a zero-variance series. Callers must ensure `lag < len`.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    let n = values.len();
    if n <= lag {
        return 0.0;
    }
    let m = mean(values);

    let denominator: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    let numerator: f64 = values[..n - lag]
        .iter()
        .zip(&values[lag..])
        .map(|(a, b)| (a - m) * (b - m))
        .sum();

    safe_divide(numerator, denominator, 0.0)
}

/// Pearson correlation between two equal-length slices.
///
/// Returns 0 when either side has zero variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mx = mean(x);
    let my = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx).powi(2);
        syy += (b - my).powi(2);
    }

    safe_divide(sxy, (sxx * syy).sqrt(), 0.0)
}
