//! Location estimators: trimmed, winsorized and weighted means

use inference_core::{mean, sorted_copy, Error, Result};

/// Validate a per-tail proportion in `[0, 0.5)`
pub(crate) fn check_tail_proportion(proportion: f64, what: &str) -> Result<()> {
    if !(0.0..0.5).contains(&proportion) {
        return Err(Error::InvalidInput(format!(
            "{what} proportion {proportion} must be in [0, 0.5)"
        )));
    }
    Ok(())
}

/// Number of observations cut from one tail
pub(crate) fn tail_count(n: usize, proportion: f64) -> usize {
    (proportion * n as f64).floor() as usize
}

/// Mean after removing `floor(proportion * n)` observations from each tail
pub fn trimmed_mean(sample: &[f64], proportion: f64) -> Result<f64> {
    check_tail_proportion(proportion, "Trim")?;
    if sample.is_empty() {
        return Err(Error::empty_input());
    }
    let sorted = sorted_copy(sample);
    let g = tail_count(sorted.len(), proportion);
    Ok(mean(&sorted[g..sorted.len() - g]))
}

/// Sorted sample with each tail clamped to its innermost retained value
pub fn winsorize(sample: &[f64], lower: f64, upper: f64) -> Result<Vec<f64>> {
    check_tail_proportion(lower, "Lower winsorizing")?;
    check_tail_proportion(upper, "Upper winsorizing")?;
    let mut sorted = sorted_copy(sample);
    let n = sorted.len();
    if n == 0 {
        return Err(Error::empty_input());
    }
    let g_lo = tail_count(n, lower);
    let g_hi = tail_count(n, upper);
    let floor = sorted[g_lo];
    let ceiling = sorted[n - 1 - g_hi];
    for x in sorted.iter_mut() {
        *x = x.clamp(floor, ceiling);
    }
    Ok(sorted)
}

/// Mean of the winsorized sample
pub fn winsorized_mean(sample: &[f64], lower: f64, upper: f64) -> Result<f64> {
    Ok(mean(&winsorize(sample, lower, upper)?))
}

/// Check weights: same length as the sample, finite, non-negative, positive total
pub(crate) fn check_weights(weights: &[f64], n: usize) -> Result<f64> {
    if weights.len() != n {
        return Err(Error::size_mismatch(n, weights.len(), "weighted mean"));
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(Error::InvalidInput(
            "Weights must be finite and non-negative".to_string(),
        ));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(Error::InvalidInput("Weights must have a positive sum".to_string()));
    }
    Ok(total)
}

/// Weighted arithmetic mean
pub fn weighted_mean(sample: &[f64], weights: &[f64]) -> Result<f64> {
    let total = check_weights(weights, sample.len())?;
    Ok(sample.iter().zip(weights).map(|(x, w)| x * w).sum::<f64>() / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use inference_core::ErrorKind;

    #[test]
    fn test_trimmed_mean() {
        let sample = [1.0, 2.0, 3.0, 4.0, 100.0];
        // floor(0.2 * 5) = 1 from each tail
        assert_relative_eq!(trimmed_mean(&sample, 0.2).unwrap(), 3.0);
        assert_relative_eq!(trimmed_mean(&sample, 0.0).unwrap(), 22.0);
        // floor(0.1 * 5) = 0, nothing trimmed
        assert_relative_eq!(trimmed_mean(&sample, 0.1).unwrap(), 22.0);
    }

    #[test]
    fn test_trim_out_of_domain() {
        let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        for proportion in [0.5, 0.6, -0.1, f64::NAN] {
            let err = trimmed_mean(&sample, proportion).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn test_winsorize_asymmetric() {
        let sample = [10.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, -50.0];
        let w = winsorize(&sample, 0.2, 0.1).unwrap();
        assert_eq!(w, vec![2.0, 2.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 8.0]);
        assert_relative_eq!(winsorized_mean(&sample, 0.2, 0.1).unwrap(), 4.7, epsilon = 1e-12);
    }

    #[test]
    fn test_weighted_mean() {
        assert_relative_eq!(weighted_mean(&[1.0, 2.0, 3.0], &[1.0, 1.0, 2.0]).unwrap(), 2.25);
        assert_eq!(
            weighted_mean(&[1.0, 2.0], &[1.0]).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert!(weighted_mean(&[1.0, 2.0], &[0.0, 0.0]).is_err());
        assert!(weighted_mean(&[1.0, 2.0], &[-1.0, 2.0]).is_err());
    }
}
