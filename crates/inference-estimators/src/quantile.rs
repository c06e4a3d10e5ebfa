//! Sample quantiles
//!
//! All order-statistic quantiles use linear interpolation between adjacent
//! order statistics (Hyndman-Fan type 7): `h = (n - 1) p`.

use inference_core::{Error, Result};
use statrs::distribution::{Beta, ContinuousCDF};

/// Type-7 quantile of an already sorted, non-empty sample
pub fn quantile(sorted: &[f64], p: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(Error::empty_input());
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid_probability(p));
    }
    Ok(interpolate(sorted, p))
}

/// Type-7 interpolation without validation
pub(crate) fn interpolate(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    if lo + 1 >= n {
        return sorted[n - 1];
    }
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
}

/// Median of a sorted, non-empty sample
pub(crate) fn median_sorted(sorted: &[f64]) -> f64 {
    interpolate(sorted, 0.5)
}

/// First two weighted moments of the Harrell-Davis estimator
///
/// Returns `(c1, c2)`: `c1` is the estimate itself and `c2` the weighted
/// second moment, so `sqrt(c2 - c1^2)` is the Maritz-Jarrett standard error.
pub fn harrell_davis_moments(sorted: &[f64], p: f64) -> Result<(f64, f64)> {
    if sorted.is_empty() {
        return Err(Error::empty_input());
    }
    if !(p > 0.0 && p < 1.0) {
        return Err(Error::InvalidInput(format!(
            "Harrell-Davis probability {p} must be in (0, 1)"
        )));
    }

    let n = sorted.len();
    if n == 1 {
        return Ok((sorted[0], sorted[0] * sorted[0]));
    }

    let n_f = n as f64;
    let beta = Beta::new((n_f + 1.0) * p, (n_f + 1.0) * (1.0 - p))
        .map_err(|e| Error::Configuration(format!("Harrell-Davis weights: {e}")))?;

    let mut c1 = 0.0;
    let mut c2 = 0.0;
    let mut cdf_right = 0.0;
    for (j, &x) in sorted.iter().enumerate() {
        let cdf_left = cdf_right;
        cdf_right = beta.cdf((j + 1) as f64 / n_f);
        let w = cdf_right - cdf_left;
        c1 += w * x;
        c2 += w * x * x;
    }
    Ok((c1, c2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use inference_core::ErrorKind;

    #[test]
    fn test_type7_quantiles() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&sorted, 0.0).unwrap(), 1.0);
        assert_eq!(quantile(&sorted, 0.5).unwrap(), 3.0);
        assert_eq!(quantile(&sorted, 1.0).unwrap(), 5.0);
        assert_relative_eq!(quantile(&sorted, 0.3).unwrap(), 2.2, epsilon = 1e-12);

        let even = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(median_sorted(&even), 4.5);
        // h = 7 * 0.25 = 1.75
        assert_relative_eq!(quantile(&even, 0.25).unwrap(), 4.0, epsilon = 1e-12);
        // h = 7 * 0.75 = 5.25 -> 5 + 0.25 * 2
        assert_relative_eq!(quantile(&even, 0.75).unwrap(), 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_quantile_rejects_bad_input() {
        assert_eq!(quantile(&[], 0.5).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(quantile(&[1.0], 1.5).unwrap_err().kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_harrell_davis_symmetric_sample() {
        let sorted: Vec<f64> = (1..=9).map(f64::from).collect();
        let (c1, c2) = harrell_davis_moments(&sorted, 0.5).unwrap();
        assert_relative_eq!(c1, 5.0, epsilon = 1e-10);
        assert!(c2 - c1 * c1 > 0.0);
    }

    #[test]
    fn test_harrell_davis_weights_sum_to_one() {
        let ones = vec![1.0; 17];
        let (c1, c2) = harrell_davis_moments(&ones, 0.3).unwrap();
        assert_relative_eq!(c1, 1.0, epsilon = 1e-12);
        assert_relative_eq!(c2, 1.0, epsilon = 1e-12);
    }
}
