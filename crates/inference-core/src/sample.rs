//! Sample validation and ordering helpers
//!
//! Samples are plain `&[f64]` slices owned by the caller. Nothing here mutates
//! them; ordering helpers always work on a private copy.

use crate::{Error, Result};
use std::cmp::Ordering;

/// Check that a sample has at least `min_len` observations, all finite
pub fn validate_sample(sample: &[f64], min_len: usize) -> Result<()> {
    if sample.len() < min_len.max(1) {
        return Err(Error::InsufficientData {
            expected: min_len.max(1),
            actual: sample.len(),
        });
    }
    if sample.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite("sample"));
    }
    Ok(())
}

/// Return a sorted copy of the sample
///
/// Callers are expected to have validated the sample; NaN compares equal so
/// the sort itself never panics.
pub fn sorted_copy(sample: &[f64]) -> Vec<f64> {
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Arithmetic mean of a non-empty slice
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of squared deviations around `center`
pub fn sum_of_squares(values: &[f64], center: f64) -> f64 {
    values.iter().map(|&x| (x - center).powi(2)).sum()
}

/// Check that two samples can be paired element by element
pub fn validate_paired(x: &[f64], y: &[f64], min_len: usize) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "paired sample"));
    }
    validate_sample(x, min_len)?;
    validate_sample(y, min_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_validate_sample() {
        assert!(validate_sample(&[1.0, 2.0], 2).is_ok());
        assert_eq!(
            validate_sample(&[], 0).unwrap_err(),
            Error::InsufficientData { expected: 1, actual: 0 }
        );
        assert_eq!(
            validate_sample(&[1.0], 2).unwrap_err(),
            Error::InsufficientData { expected: 2, actual: 1 }
        );
        let err = validate_sample(&[1.0, f64::NAN], 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_sorted_copy_leaves_input_untouched() {
        let sample = vec![3.0, 1.0, 2.0];
        let sorted = sorted_copy(&sample);
        assert_eq!(sorted, vec![1.0, 2.0, 3.0]);
        assert_eq!(sample, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_mean_and_sum_of_squares() {
        let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&sample), 5.0);
        assert_eq!(sum_of_squares(&sample, 5.0), 32.0);
    }

    #[test]
    fn test_validate_paired() {
        assert!(validate_paired(&[1.0, 2.0], &[3.0, 4.0], 2).is_ok());
        assert!(validate_paired(&[1.0, 2.0], &[3.0], 1).is_err());
    }
}
