//! Interval derivation from a bootstrap distribution
//!
//! All methods read empirical quantiles with type-7 interpolation.

use crate::engine::BootstrapSample;
use inference_core::{ConfidenceLevel, Error, IntervalResult, Result, Sidedness};
use inference_distributions::{normal_cdf, normal_quantile};
use inference_estimators::{jackknife, quantile, EstimatorSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

/// How to turn a bootstrap distribution into an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BootstrapMethod {
    /// Empirical quantiles of the resampled estimates
    Percentile,
    /// Percentile quantiles reflected around the original estimate
    Basic,
    /// Bias-corrected and accelerated percentiles
    Bca,
}

impl BootstrapMethod {
    /// Tag used in strategy strings
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Percentile => "percentile",
            Self::Basic => "basic",
            Self::Bca => "bca",
        }
    }
}

impl fmt::Display for BootstrapMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BootstrapMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "percentile" => Ok(Self::Percentile),
            "basic" => Ok(Self::Basic),
            "bca" => Ok(Self::Bca),
            other => Err(Error::Configuration(format!(
                "Unknown bootstrap method '{other}'"
            ))),
        }
    }
}

/// Bias correction and acceleration of a BCa interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BcaCorrection {
    pub z0: f64,
    pub acceleration: f64,
}

impl BcaCorrection {
    /// Compute both terms for a bootstrap distribution of `spec` on `sample`
    pub fn compute(sample: &[f64], spec: &EstimatorSpec, boot: &BootstrapSample) -> Result<Self> {
        if boot.is_empty() {
            return Err(Error::InvalidInput("No bootstrap estimates".to_string()));
        }
        let z0 = bias_correction(&boot.values, boot.estimate)?;
        let acceleration = acceleration(&jackknife(sample, spec)?);
        debug!(z0, acceleration, "BCa correction terms");
        Ok(Self { z0, acceleration })
    }

    /// Adjusted percentile position for nominal lower-tail probability `p`
    pub fn adjusted_probability(&self, p: f64) -> Result<f64> {
        let z = normal_quantile(p)?;
        let shifted = self.z0 + z;
        let denominator = 1.0 - self.acceleration * shifted;
        if !(denominator > 0.0) {
            return Err(Error::NumericalAnomaly(format!(
                "BCa denominator {denominator} is not positive (z0 = {}, a = {})",
                self.z0, self.acceleration
            )));
        }
        normal_cdf(self.z0 + shifted / denominator)
    }
}

/// `Φ⁻¹` of the share of resampled values below the estimate, ties counted half
fn bias_correction(values: &[f64], estimate: f64) -> Result<f64> {
    let below = values.iter().filter(|&&v| v < estimate).count() as f64;
    let ties = values.iter().filter(|&&v| v == estimate).count() as f64;
    let share = (below + 0.5 * ties) / values.len() as f64;
    let z0 = normal_quantile(share)?;
    if !z0.is_finite() {
        return Err(Error::NumericalAnomaly(format!(
            "BCa bias correction is not finite: {share} of resampled estimates lie below the estimate"
        )));
    }
    Ok(z0)
}

/// Jackknife acceleration; zero when every leave-one-out estimate coincides
fn acceleration(jack: &[f64]) -> f64 {
    let center = inference_core::mean(jack);
    let (num, den) = jack.iter().fold((0.0, 0.0), |(num, den), &v| {
        let d = center - v;
        (num + d * d * d, den + d * d)
    });
    if den == 0.0 {
        0.0
    } else {
        num / (6.0 * den.powf(1.5))
    }
}

/// Build an interval from a bootstrap distribution
///
/// `sample` and `spec` must be the ones the distribution was drawn from; BCa
/// recomputes the estimator on leave-one-out subsamples.
#[instrument(skip(sample, spec, boot), fields(n = sample.len(), resamples = boot.len()))]
pub fn derive_interval(
    sample: &[f64],
    spec: &EstimatorSpec,
    boot: &BootstrapSample,
    method: BootstrapMethod,
    level: ConfidenceLevel,
    sidedness: Sidedness,
) -> Result<IntervalResult> {
    if boot.is_empty() {
        return Err(Error::InvalidInput("No bootstrap estimates".to_string()));
    }
    let sorted = boot.sorted();
    let tail = level.tail_probability(sidedness);
    let theta = boot.estimate;

    let (lower, upper) = match method {
        BootstrapMethod::Percentile => (quantile(&sorted, tail)?, quantile(&sorted, 1.0 - tail)?),
        BootstrapMethod::Basic => (
            2.0 * theta - quantile(&sorted, 1.0 - tail)?,
            2.0 * theta - quantile(&sorted, tail)?,
        ),
        BootstrapMethod::Bca => {
            let correction = BcaCorrection::compute(sample, spec, boot)?;
            let lo_p = correction.adjusted_probability(tail)?;
            let hi_p = correction.adjusted_probability(1.0 - tail)?;
            debug!(lo_p, hi_p, "BCa adjusted percentiles");
            (quantile(&sorted, lo_p)?, quantile(&sorted, hi_p)?)
        }
    };
    debug!(lower, upper, method = method.tag(), "Bootstrap interval");

    IntervalResult::shaped(lower, upper, theta, level, sidedness).map(|ci| ci.with_seed(boot.seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bootstrap;
    use approx::assert_relative_eq;
    use inference_core::{ErrorKind, SeedSpec};

    const SAMPLE: [f64; 8] = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    fn synthetic(values: Vec<f64>, estimate: f64) -> BootstrapSample {
        BootstrapSample {
            values,
            estimate,
            seed: 0,
        }
    }

    #[test]
    fn test_percentile_and_basic_on_known_values() {
        let boot = synthetic((0..=100).map(f64::from).collect(), 40.0);
        let level = ConfidenceLevel::NINETY;
        let spec = EstimatorSpec::mean_with_sd();

        let pct = derive_interval(&SAMPLE, &spec, &boot, BootstrapMethod::Percentile, level, Sidedness::TwoSided)
            .unwrap();
        assert_relative_eq!(pct.lower, 5.0, epsilon = 1e-9);
        assert_relative_eq!(pct.upper, 95.0, epsilon = 1e-9);

        let basic = derive_interval(&SAMPLE, &spec, &boot, BootstrapMethod::Basic, level, Sidedness::TwoSided)
            .unwrap();
        assert_relative_eq!(basic.lower, -15.0, epsilon = 1e-9);
        assert_relative_eq!(basic.upper, 75.0, epsilon = 1e-9);
        assert_eq!(basic.estimate, 40.0);
    }

    #[test]
    fn test_one_sided_percentile() {
        let boot = synthetic((0..=100).map(f64::from).collect(), 50.0);
        let ci = derive_interval(
            &SAMPLE,
            &EstimatorSpec::mean_with_sd(),
            &boot,
            BootstrapMethod::Percentile,
            ConfidenceLevel::NINETY,
            Sidedness::LowerBound,
        )
        .unwrap();
        assert_relative_eq!(ci.lower, 10.0, epsilon = 1e-9);
        assert_eq!(ci.upper, f64::INFINITY);
    }

    #[test]
    fn test_bca_reduces_to_percentile_without_bias_or_skew() {
        // Symmetric sample: jackknife means are symmetric so a = 0
        let sample = [1.0, 2.0, 3.0, 4.0, 5.0];
        // Symmetric resampled values around the estimate: z0 = 0
        let boot = synthetic((0..=200).map(|i| 1.0 + i as f64 * 0.02).collect(), 3.0);
        let spec = EstimatorSpec::mean_with_sd();
        let level = ConfidenceLevel::NINETY_FIVE;

        let correction = BcaCorrection::compute(&sample, &spec, &boot).unwrap();
        assert_relative_eq!(correction.z0, 0.0, epsilon = 1e-12);
        assert_relative_eq!(correction.acceleration, 0.0, epsilon = 1e-12);

        let bca = derive_interval(&sample, &spec, &boot, BootstrapMethod::Bca, level, Sidedness::TwoSided).unwrap();
        let pct = derive_interval(&sample, &spec, &boot, BootstrapMethod::Percentile, level, Sidedness::TwoSided)
            .unwrap();
        assert_relative_eq!(bca.lower, pct.lower, epsilon = 1e-9);
        assert_relative_eq!(bca.upper, pct.upper, epsilon = 1e-9);
    }

    #[test]
    fn test_bca_degenerate_bias_is_anomaly() {
        // Every resampled value lies above the estimate
        let boot = synthetic(vec![10.0; 100], 1.0);
        let err = derive_interval(
            &SAMPLE,
            &EstimatorSpec::mean_with_sd(),
            &boot,
            BootstrapMethod::Bca,
            ConfidenceLevel::NINETY_FIVE,
            Sidedness::TwoSided,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericalAnomaly);
    }

    #[test]
    fn test_acceleration_sign_follows_skew() {
        // One large observation: leave-one-out means are skewed low
        let jack = jackknife(&[1.0, 1.1, 0.9, 1.0, 10.0], &EstimatorSpec::mean_with_sd()).unwrap();
        assert!(acceleration(&jack) > 0.0);
        assert_eq!(acceleration(&[2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn test_bca_on_skewed_data_is_ordered() {
        let sample = [0.2, 0.4, 0.5, 0.7, 1.1, 1.3, 2.0, 2.9, 4.5, 8.0];
        let spec = EstimatorSpec::mean_with_sd();
        let boot = bootstrap(&sample, &spec, 2000, SeedSpec::Fixed(17)).unwrap();
        let ci = derive_interval(&sample, &spec, &boot, BootstrapMethod::Bca, ConfidenceLevel::NINETY_FIVE, Sidedness::TwoSided)
            .unwrap();
        assert!(ci.lower <= ci.upper);
        let pct = derive_interval(&sample, &spec, &boot, BootstrapMethod::Percentile, ConfidenceLevel::NINETY_FIVE, Sidedness::TwoSided)
            .unwrap();
        // Right skew pushes the BCa interval upward
        assert!(ci.upper > pct.upper);
    }

    #[test]
    fn test_method_tags() {
        for method in [BootstrapMethod::Percentile, BootstrapMethod::Basic, BootstrapMethod::Bca] {
            assert_eq!(method.tag().parse::<BootstrapMethod>().unwrap(), method);
        }
        assert_eq!(
            "studentized".parse::<BootstrapMethod>().unwrap_err().kind(),
            ErrorKind::Configuration
        );
    }
}
