//! Likelihood-ratio intervals
//!
//! The two-sided interval is the set `{θ : 2(ℓ(θ̂) − ℓ(θ)) ≤ c}` with `c` the
//! χ²₁ quantile at the requested level. One-sided bounds invert the signed
//! root of the deviance against the normal quantile. Each endpoint is found by
//! pushing out from the MLE until the deviance exceeds its cutoff, then
//! bisecting.
//!
//! [`confidence_region`] applies the same search along rays in the joint
//! `(μ, ln σ)` plane of a normal sample, with the χ²₂ cutoff.

use inference_core::{ConfidenceLevel, Error, IntervalResult, Result, Sidedness};
use inference_distributions::{chi_squared_quantile, normal_quantile};
use inference_estimators::LikelihoodModel;
use serde::Serialize;
use std::f64::consts::TAU;
use tracing::{debug, instrument};

const MAX_EXPANSIONS: usize = 200;
const MAX_BISECTIONS: usize = 200;
const RELATIVE_TOLERANCE: f64 = 1e-12;

/// Likelihood-ratio interval for the parameter of `model`
#[instrument(skip(sample, model), fields(n = sample.len(), model = model.name()))]
pub fn likelihood_ratio_interval(
    sample: &[f64],
    model: LikelihoodModel,
    level: ConfidenceLevel,
    sidedness: Sidedness,
) -> Result<IntervalResult> {
    let theta_hat = model.mle(sample)?;
    let peak = model.log_likelihood(sample, theta_hat)?;
    if !peak.is_finite() {
        return Err(Error::InvalidInput(format!(
            "Likelihood of the {} model is unbounded on this sample",
            model.name()
        )));
    }

    let deviance = |theta: f64| -> Result<f64> {
        Ok(2.0 * (peak - model.log_likelihood(sample, theta)?))
    };

    let scale = match model.standard_error(sample)? {
        se if se > 0.0 && se.is_finite() => se,
        _ => theta_hat.abs().max(1.0) * 0.1,
    };
    let (space_lo, space_hi) = model.parameter_space();
    let below = |critical: f64| endpoint(&deviance, critical, theta_hat, -scale, space_lo);
    let above = |critical: f64| endpoint(&deviance, critical, theta_hat, scale, space_hi);

    let (lower, upper) = match sidedness {
        Sidedness::TwoSided => {
            let critical = chi_squared_quantile(level.value(), 1.0)?;
            debug!(theta_hat, peak, critical, "Likelihood-ratio setup");
            (below(critical)?, above(critical)?)
        }
        // Signed root r(θ) = sign(θ̂ − θ)·√deviance is compared with z at the
        // level; below 0.5 the bound crosses to the far side of θ̂
        Sidedness::LowerBound | Sidedness::UpperBound => {
            let z = normal_quantile(level.value())?;
            let critical = z * z;
            debug!(theta_hat, peak, z, "Signed-root likelihood setup");
            let toward_lower = (z > 0.0) == (sidedness == Sidedness::LowerBound);
            let bound = if toward_lower {
                below(critical)?
            } else {
                above(critical)?
            };
            if sidedness == Sidedness::LowerBound {
                (bound, f64::INFINITY)
            } else {
                (f64::NEG_INFINITY, bound)
            }
        }
    };
    debug!(lower, upper, "Likelihood-ratio endpoints");

    IntervalResult::new(lower, upper, theta_hat, level, sidedness)
}

/// Point where `deviance` reaches `critical` on the side of `theta_hat`
/// given by the sign of `step`
///
/// `deviance(theta_hat) = 0`. If the parameter-space boundary is still inside
/// the acceptance region it is the endpoint.
fn endpoint<F>(deviance: &F, critical: f64, theta_hat: f64, step: f64, boundary: f64) -> Result<f64>
where
    F: Fn(f64) -> Result<f64>,
{
    let excess = |theta: f64| -> Result<f64> { Ok(deviance(theta)? - critical) };
    let outer = if boundary.is_finite() {
        if excess(boundary)? <= 0.0 {
            return Ok(boundary);
        }
        boundary
    } else {
        let mut width = step;
        let mut candidate = theta_hat + width;
        let mut expansions = 0;
        while excess(candidate)? <= 0.0 {
            expansions += 1;
            if expansions > MAX_EXPANSIONS {
                return Err(Error::NumericalAnomaly(format!(
                    "Likelihood-ratio endpoint not bracketed beyond {candidate}"
                )));
            }
            width *= 2.0;
            candidate = theta_hat + width;
        }
        candidate
    };

    // Invariant: excess(inner) <= 0 < excess(outer)
    let mut inner = theta_hat;
    let mut outer = outer;
    for _ in 0..MAX_BISECTIONS {
        let mid = 0.5 * (inner + outer);
        if (outer - inner).abs() <= RELATIVE_TOLERANCE * mid.abs().max(1.0) {
            break;
        }
        if excess(mid)? <= 0.0 {
            inner = mid;
        } else {
            outer = mid;
        }
    }
    Ok(0.5 * (inner + outer))
}

/// One level set of a joint normal likelihood region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionContour {
    pub level: ConfidenceLevel,
    /// χ²₂ quantile at `level`
    pub critical: f64,
    /// `(μ, σ)` points with deviance equal to `critical`, ordered by angle
    /// around the MLE
    pub boundary: Vec<(f64, f64)>,
}

/// Likelihood-ratio region for the mean and standard deviation of a normal
/// sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceRegion {
    /// MLE of μ
    pub mean: f64,
    /// MLE of σ (divisor n)
    pub std_dev: f64,
    pub contours: Vec<RegionContour>,
    #[serde(skip)]
    n: f64,
    #[serde(skip)]
    sum_squares: f64,
}

impl ConfidenceRegion {
    /// `2(ℓ(μ̂, σ̂) − ℓ(μ, σ))`; infinite for `σ <= 0`
    pub fn deviance(&self, mu: f64, sigma: f64) -> f64 {
        normal_deviance(self.n, self.mean, self.sum_squares, mu, sigma)
    }

    /// Whether `(μ, σ)` lies in the region at `level`
    pub fn contains(&self, mu: f64, sigma: f64, level: ConfidenceLevel) -> Result<bool> {
        Ok(self.deviance(mu, sigma) <= chi_squared_quantile(level.value(), 2.0)?)
    }
}

fn normal_deviance(n: f64, mean: f64, sum_squares: f64, mu: f64, sigma: f64) -> f64 {
    if !(sigma > 0.0) {
        return f64::INFINITY;
    }
    let variance = sigma * sigma;
    let spread = sum_squares + n * (mean - mu).powi(2);
    n * (variance * n / sum_squares).ln() + spread / variance - n
}

/// Joint likelihood-ratio confidence region for `(μ, σ)` of a normal sample,
/// with `points` boundary points per requested level
#[instrument(skip(sample, levels), fields(n = sample.len(), levels = levels.len()))]
pub fn confidence_region(sample: &[f64], levels: &[f64], points: usize) -> Result<ConfidenceRegion> {
    if sample.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: sample.len(),
        });
    }
    if sample.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite("sample"));
    }
    if levels.is_empty() {
        return Err(Error::Configuration(
            "Confidence region needs at least one level".to_string(),
        ));
    }
    if points < 3 {
        return Err(Error::Configuration(format!(
            "Confidence region needs at least 3 boundary points, got {points}"
        )));
    }
    let levels = levels
        .iter()
        .map(|&level| ConfidenceLevel::new(level))
        .collect::<Result<Vec<_>>>()?;

    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let sum_squares: f64 = sample.iter().map(|x| (x - mean).powi(2)).sum();
    if !(sum_squares > 0.0) {
        return Err(Error::InvalidInput(
            "Joint normal likelihood is unbounded for a sample with no spread".to_string(),
        ));
    }
    let std_dev = (sum_squares / n).sqrt();
    let log_sd = std_dev.ln();
    debug!(mean, std_dev, "Joint normal MLE");

    let contours = levels
        .into_iter()
        .map(|level| {
            let critical = chi_squared_quantile(level.value(), 2.0)?;
            let boundary = (0..points)
                .map(|k| {
                    let angle = TAU * k as f64 / points as f64;
                    let (d_mean, d_log_sd) = (angle.cos() * std_dev, angle.sin());
                    let along = |t: f64| -> Result<f64> {
                        let sigma = (log_sd + t * d_log_sd).exp();
                        Ok(normal_deviance(n, mean, sum_squares, mean + t * d_mean, sigma))
                    };
                    let t = endpoint(&along, critical, 0.0, 1.0 / n.sqrt(), f64::INFINITY)?;
                    Ok((mean + t * d_mean, (log_sd + t * d_log_sd).exp()))
                })
                .collect::<Result<Vec<_>>>()?;
            debug!(level = level.value(), critical, points, "Region contour");
            Ok(RegionContour {
                level,
                critical,
                boundary,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ConfidenceRegion {
        mean,
        std_dev,
        contours,
        n,
        sum_squares,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_poisson_zero_counts_has_closed_form() {
        // ℓ(λ) = −nλ, so the upper endpoint is χ²₁(0.95) / (2n)
        let sample = [0.0; 10];
        let ci = likelihood_ratio_interval(
            &sample,
            LikelihoodModel::PoissonRate,
            ConfidenceLevel::NINETY_FIVE,
            Sidedness::TwoSided,
        )
        .unwrap();
        assert_eq!(ci.lower, 0.0);
        assert_relative_eq!(ci.upper, 3.841458820694124 / 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_normal_mean_matches_profile_closed_form() {
        // 2ℓ ratio = n ln(1 + n(x̄ − μ)² / S)
        let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let ci = likelihood_ratio_interval(
            &sample,
            LikelihoodModel::NormalMean,
            ConfidenceLevel::NINETY_FIVE,
            Sidedness::TwoSided,
        )
        .unwrap();
        let n = 8.0f64;
        let half = ((((3.841458820694124 / n).exp() - 1.0) * 32.0) / n).sqrt();
        assert_relative_eq!(ci.lower, 5.0 - half, epsilon = 1e-8);
        assert_relative_eq!(ci.upper, 5.0 + half, epsilon = 1e-8);
    }

    #[test]
    fn test_bernoulli_interval_stays_in_unit_interval() {
        let trials = [1.0, 1.0, 1.0, 1.0, 1.0, 0.0];
        let ci = likelihood_ratio_interval(
            &trials,
            LikelihoodModel::BernoulliProbability,
            ConfidenceLevel::NINETY_FIVE,
            Sidedness::TwoSided,
        )
        .unwrap();
        assert!(ci.lower > 0.0 && ci.upper < 1.0);
        assert!(ci.contains(5.0 / 6.0));

        let all = likelihood_ratio_interval(
            &[1.0; 5],
            LikelihoodModel::BernoulliProbability,
            ConfidenceLevel::NINETY_FIVE,
            Sidedness::TwoSided,
        )
        .unwrap();
        assert_eq!(all.upper, 1.0);
    }

    #[test]
    fn test_one_sided_exponential() {
        let sample = [0.5, 1.5, 0.2, 2.4, 0.9, 1.1];
        let ci = likelihood_ratio_interval(
            &sample,
            LikelihoodModel::ExponentialRate,
            ConfidenceLevel::NINETY_FIVE,
            Sidedness::UpperBound,
        )
        .unwrap();
        assert_eq!(ci.lower, f64::NEG_INFINITY);
        assert!(ci.upper > ci.estimate);
    }

    #[test]
    fn test_one_sided_matches_two_sided_at_double_alpha() {
        let sample = [0.5, 1.5, 0.2, 2.4, 0.9, 1.1];
        let model = LikelihoodModel::ExponentialRate;
        let two = likelihood_ratio_interval(&sample, model, ConfidenceLevel::NINETY, Sidedness::TwoSided)
            .unwrap();
        let lower = likelihood_ratio_interval(&sample, model, ConfidenceLevel::NINETY_FIVE, Sidedness::LowerBound)
            .unwrap();
        let upper = likelihood_ratio_interval(&sample, model, ConfidenceLevel::NINETY_FIVE, Sidedness::UpperBound)
            .unwrap();
        assert_relative_eq!(lower.lower, two.lower, epsilon = 1e-9);
        assert_relative_eq!(upper.upper, two.upper, epsilon = 1e-9);
    }

    #[test]
    fn test_one_sided_below_half_crosses_the_estimate() {
        let sample = [0.5, 1.5, 0.2, 2.4, 0.9, 1.1];
        let model = LikelihoodModel::ExponentialRate;
        let level = ConfidenceLevel::new(0.4).unwrap();

        let lower = likelihood_ratio_interval(&sample, model, level, Sidedness::LowerBound).unwrap();
        assert_eq!(lower.upper, f64::INFINITY);
        assert!(lower.lower > lower.estimate);

        let upper = likelihood_ratio_interval(&sample, model, level, Sidedness::UpperBound).unwrap();
        assert_eq!(upper.lower, f64::NEG_INFINITY);
        assert!(upper.upper < upper.estimate);

        // Normal mean: the signed root reaches z = Φ⁻¹(0.4) where
        // n ln(1 + n(x̄ − μ)² / S) = z²
        let normal = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let ci = likelihood_ratio_interval(&normal, LikelihoodModel::NormalMean, level, Sidedness::LowerBound)
            .unwrap();
        let z = -0.2533471031357998f64;
        let offset = ((((z * z) / 8.0).exp() - 1.0) * 32.0 / 8.0).sqrt();
        assert_relative_eq!(ci.lower, 5.0 + offset, epsilon = 1e-8);
    }

    #[test]
    fn test_region_boundary_sits_on_the_chi_squared_contour() {
        let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let region = confidence_region(&sample, &[0.95], 24).unwrap();
        assert_relative_eq!(region.mean, 5.0);
        assert_relative_eq!(region.std_dev, 2.0);
        assert_relative_eq!(region.deviance(5.0, 2.0), 0.0, epsilon = 1e-12);
        assert!(region.contains(5.0, 2.0, ConfidenceLevel::NINETY_FIVE).unwrap());

        let contour = &region.contours[0];
        assert_relative_eq!(contour.critical, 5.991464547107979, epsilon = 1e-9);
        assert_eq!(contour.boundary.len(), 24);
        for &(mu, sigma) in &contour.boundary {
            assert!(sigma > 0.0);
            assert_relative_eq!(region.deviance(mu, sigma), contour.critical, epsilon = 1e-6);
        }

        // At σ = σ̂ the deviance is n²(x̄ − μ)² / S
        let (mu, sigma) = contour.boundary[0];
        assert_relative_eq!(sigma, 2.0, epsilon = 1e-12);
        assert_relative_eq!(mu, 5.0 + (5.991464547107979f64 * 32.0).sqrt() / 8.0, epsilon = 1e-8);
    }

    #[test]
    fn test_region_grows_with_level() {
        let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let region = confidence_region(&sample, &[0.90, 0.95], 16).unwrap();
        let (inner, outer) = (&region.contours[0], &region.contours[1]);
        for &(mu, sigma) in &inner.boundary {
            assert!(region.contains(mu, sigma, ConfidenceLevel::NINETY_FIVE).unwrap());
        }
        for &(mu, sigma) in &outer.boundary {
            assert!(!region.contains(mu, sigma, ConfidenceLevel::NINETY).unwrap());
        }
    }

    #[test]
    fn test_region_rejects_bad_configuration() {
        let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let err = confidence_region(&sample, &[1.5], 16).unwrap_err();
        assert_eq!(err.kind(), inference_core::ErrorKind::Configuration);
        let err = confidence_region(&sample, &[0.95], 2).unwrap_err();
        assert_eq!(err.kind(), inference_core::ErrorKind::Configuration);
        let err = confidence_region(&[3.0; 6], &[0.95], 16).unwrap_err();
        assert_eq!(err.kind(), inference_core::ErrorKind::InvalidInput);
        let err = confidence_region(&[3.0], &[0.95], 16).unwrap_err();
        assert_eq!(err.kind(), inference_core::ErrorKind::InvalidInput);
    }
}
