//! Leave-one-out estimates

use crate::spec::EstimatorSpec;
use inference_core::{Error, Result};

/// Leave-one-out estimates of `spec`, in index order
///
/// Entry `i` is the estimate on the sample with observation `i` removed.
/// Needs at least two observations; any failure on a reduced sample
/// propagates.
pub fn jackknife(sample: &[f64], spec: &EstimatorSpec) -> Result<Vec<f64>> {
    let n = sample.len();
    if n < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }

    let mut reduced = Vec::with_capacity(n - 1);
    let mut indices = Vec::with_capacity(n - 1);
    (0..n)
        .map(|left_out| {
            indices.clear();
            indices.extend((0..n).filter(|&j| j != left_out));
            reduced.clear();
            reduced.extend(indices.iter().map(|&j| sample[j]));
            spec.for_indices(&indices)?.estimate(&reduced)
        })
        .collect()
}

/// Jackknife bias-corrected estimate `n·θ̂ − (n − 1)·mean(θ₍₋ᵢ₎)`
pub fn bias_corrected(sample: &[f64], spec: &EstimatorSpec) -> Result<f64> {
    let full = spec.estimate(sample)?;
    let values = jackknife(sample, spec)?;
    let n = sample.len() as f64;
    let average = values.iter().sum::<f64>() / n;
    Ok(n * full - (n - 1.0) * average)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_jackknife_means() {
        let sample = [1.0, 2.0, 3.0, 6.0];
        let values = jackknife(&sample, &EstimatorSpec::mean_with_sd()).unwrap();
        let expected = [11.0 / 3.0, 10.0 / 3.0, 3.0, 2.0];
        for (v, e) in values.iter().zip(expected) {
            assert_relative_eq!(*v, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_jackknife_weighted_drops_weight() {
        let spec = EstimatorSpec::WeightedMean {
            weights: vec![1.0, 1.0, 2.0],
        };
        let values = jackknife(&[0.0, 3.0, 6.0], &spec).unwrap();
        assert_relative_eq!(values[0], 5.0, epsilon = 1e-12);
        assert_relative_eq!(values[2], 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_jackknife_needs_two() {
        assert!(jackknife(&[1.0], &EstimatorSpec::Median).is_err());
    }

    #[test]
    fn test_bias_corrected_variance_is_unbiased() {
        // The jackknife turns the divisor-n variance into the divisor-(n − 1) one
        let sample = [1.0, 2.0, 3.0, 6.0];
        let corrected = bias_corrected(&sample, &EstimatorSpec::Variance { ddof: 0 }).unwrap();
        assert_relative_eq!(corrected, 14.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(
            bias_corrected(&sample, &EstimatorSpec::mean_with_sd()).unwrap(),
            3.0,
            epsilon = 1e-12
        );
    }
}
