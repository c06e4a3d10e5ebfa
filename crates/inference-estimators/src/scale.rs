//! Scale estimators

use crate::quantile::{interpolate, median_sorted};
use inference_core::{mean, sorted_copy, sum_of_squares, Error, Result};

/// Consistency constant making the MAD estimate σ for normal data
pub const MAD_NORMAL_CONSISTENCY: f64 = 1.4826;

/// Variance with divisor `n - ddof`
pub fn variance(sample: &[f64], ddof: usize) -> Result<f64> {
    let n = sample.len();
    if n <= ddof {
        return Err(Error::InsufficientData {
            expected: ddof + 1,
            actual: n,
        });
    }
    Ok(sum_of_squares(sample, mean(sample)) / (n - ddof) as f64)
}

/// Standard deviation with divisor `n - ddof`
pub fn std_dev(sample: &[f64], ddof: usize) -> Result<f64> {
    variance(sample, ddof).map(f64::sqrt)
}

/// Median absolute deviation from the median
pub fn mad(sample: &[f64], normalized: bool) -> Result<f64> {
    if sample.is_empty() {
        return Err(Error::empty_input());
    }
    let center = median_sorted(&sorted_copy(sample));
    let deviations: Vec<f64> = sample.iter().map(|x| (x - center).abs()).collect();
    let raw = median_sorted(&sorted_copy(&deviations));
    Ok(if normalized {
        raw * MAD_NORMAL_CONSISTENCY
    } else {
        raw
    })
}

/// Interquartile range with type-7 quartiles
pub fn iqr(sample: &[f64]) -> Result<f64> {
    if sample.is_empty() {
        return Err(Error::empty_input());
    }
    let sorted = sorted_copy(sample);
    Ok(interpolate(&sorted, 0.75) - interpolate(&sorted, 0.25))
}
