//! Descriptive summary for the presentation layer

use crate::jackknife::bias_corrected;
use crate::quantile::interpolate;
use crate::spec::EstimatorSpec;
use inference_core::{mean, sorted_copy, sum_of_squares, validate_sample, Result};
use serde::Serialize;

/// Count, moments and five-number summary of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// ddof = 1 standard deviation; absent for a single observation
    pub std_dev: Option<f64>,
    pub min: f64,
    pub first_quartile: f64,
    pub median: f64,
    pub third_quartile: f64,
    pub max: f64,
    pub bias_corrected: BiasCorrected,
}

/// Jackknife bias-corrected counterparts of the summary's estimates
///
/// Each is absent when a leave-one-out sample is too small for its estimator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BiasCorrected {
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub median: Option<f64>,
}

/// Summarise a non-empty, finite sample
pub fn summary(sample: &[f64]) -> Result<Summary> {
    validate_sample(sample, 1)?;
    let sorted = sorted_copy(sample);
    let n = sorted.len();
    let center = mean(sample);
    let std_dev = (n > 1).then(|| (sum_of_squares(sample, center) / (n - 1) as f64).sqrt());
    let corrected = |spec: EstimatorSpec, needs: usize| -> Result<Option<f64>> {
        (n >= needs).then(|| bias_corrected(sample, &spec)).transpose()
    };
    let corrections = BiasCorrected {
        mean: corrected(EstimatorSpec::mean_with_sd(), 2)?,
        std_dev: corrected(EstimatorSpec::StdDev { ddof: 1 }, 3)?,
        median: corrected(EstimatorSpec::Median, 2)?,
    };
    Ok(Summary {
        count: n,
        mean: center,
        std_dev,
        min: sorted[0],
        first_quartile: interpolate(&sorted, 0.25),
        median: interpolate(&sorted, 0.5),
        third_quartile: interpolate(&sorted, 0.75),
        max: sorted[n - 1],
        bias_corrected: corrections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summary() {
        let s = summary(&[9.0, 2.0, 4.0, 4.0, 5.0, 4.0, 5.0, 7.0]).unwrap();
        assert_eq!(s.count, 8);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
        assert_eq!(s.median, 4.5);
        assert_relative_eq!(s.std_dev.unwrap(), (32.0f64 / 7.0).sqrt());

        assert_eq!(summary(&[1.5]).unwrap().std_dev, None);
    }

    #[test]
    fn test_summary_bias_corrected_column() {
        let s = summary(&[9.0, 2.0, 4.0, 4.0, 5.0, 4.0, 5.0, 7.0]).unwrap();
        assert_relative_eq!(s.bias_corrected.mean.unwrap(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(s.bias_corrected.std_dev.unwrap(), 2.2520407696333375, epsilon = 1e-12);
        assert_relative_eq!(s.bias_corrected.median.unwrap(), 4.5, epsilon = 1e-12);

        let pair = summary(&[1.0, 3.0]).unwrap();
        assert_relative_eq!(pair.bias_corrected.mean.unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(pair.bias_corrected.std_dev, None);
        assert_eq!(summary(&[1.5]).unwrap().bias_corrected, BiasCorrected::default());
    }
}
