//! Population statistics primitives.
//!
//! Formulas, all in f64:
//! `mean = Σv / n`, `variance = Σ(v - mean)² / n`, `sd = √variance`,
//! `cv = (sd / mean) · 100`.
//!
//! Divide by n, not n − 1: these describe the sample itself.

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance around `mean`. Returns 0.0 for an empty slice.
pub fn population_variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Compute mean and population standard deviation.
pub fn mean_and_population_sd(values: &[f64]) -> (f64, f64) {
    let m = mean(values);
    (m, population_variance(values, m).sqrt())
}

/// Coefficient of variation in percent.
///
/// A zero mean is not an error: the result is `NaN` when `sd` is also zero
/// and `±Infinity` otherwise. Callers decide how to render non-finite values.
pub fn coefficient_of_variation(sd: f64, mean: f64) -> f64 {
    (sd / mean) * 100.0
}
