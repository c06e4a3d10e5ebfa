//! Parametric likelihood models
//!
//! Each model fixes its own estimator: the maximum-likelihood estimate of a
//! single parameter. Nuisance parameters are profiled out, so
//! [`LikelihoodModel::log_likelihood`] is the profile log-likelihood of the
//! parameter of interest with additive constants dropped.

use inference_core::{mean, sum_of_squares, validate_sample, Error, Result};
use serde::{Deserialize, Serialize};

/// A one-parameter likelihood model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LikelihoodModel {
    /// Mean of a normal population, variance profiled out
    NormalMean,
    /// Variance of a normal population, mean profiled out
    NormalVariance,
    /// Rate of an exponential population
    ExponentialRate,
    /// Mean of a Poisson population
    PoissonRate,
    /// Success probability of Bernoulli trials coded 0/1
    BernoulliProbability,
}

impl LikelihoodModel {
    /// Open parameter space `(lower, upper)`
    pub fn parameter_space(&self) -> (f64, f64) {
        match self {
            Self::NormalMean => (f64::NEG_INFINITY, f64::INFINITY),
            Self::NormalVariance | Self::ExponentialRate | Self::PoissonRate => {
                (0.0, f64::INFINITY)
            }
            Self::BernoulliProbability => (0.0, 1.0),
        }
    }

    /// Check the sample against the model's support
    pub fn validate(&self, sample: &[f64]) -> Result<()> {
        let min_len = match self {
            Self::NormalMean | Self::NormalVariance => 2,
            _ => 1,
        };
        validate_sample(sample, min_len)?;
        match self {
            Self::NormalMean => Ok(()),
            Self::NormalVariance => {
                if sum_of_squares(sample, mean(sample)) == 0.0 {
                    return Err(Error::InvalidInput(
                        "Normal variance model needs a sample with spread".to_string(),
                    ));
                }
                Ok(())
            }
            Self::ExponentialRate => {
                if sample.iter().any(|&x| x < 0.0) || mean(sample) == 0.0 {
                    return Err(Error::InvalidInput(
                        "Exponential rate model needs non-negative data with a positive mean"
                            .to_string(),
                    ));
                }
                Ok(())
            }
            Self::PoissonRate => {
                if sample.iter().any(|&x| x < 0.0 || x.fract() != 0.0) {
                    return Err(Error::InvalidInput(
                        "Poisson rate model needs non-negative integer counts".to_string(),
                    ));
                }
                Ok(())
            }
            Self::BernoulliProbability => {
                if sample.iter().any(|&x| x != 0.0 && x != 1.0) {
                    return Err(Error::InvalidInput(
                        "Bernoulli model needs observations coded 0 or 1".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Maximum-likelihood estimate
    pub fn mle(&self, sample: &[f64]) -> Result<f64> {
        self.validate(sample)?;
        Ok(self.mle_unchecked(sample))
    }

    fn mle_unchecked(&self, sample: &[f64]) -> f64 {
        let n = sample.len() as f64;
        match self {
            Self::NormalMean | Self::PoissonRate | Self::BernoulliProbability => mean(sample),
            Self::NormalVariance => sum_of_squares(sample, mean(sample)) / n,
            Self::ExponentialRate => 1.0 / mean(sample),
        }
    }

    /// Profile log-likelihood at `theta`
    ///
    /// Returns `-inf` outside the parameter space and at boundary points with
    /// zero likelihood.
    pub fn log_likelihood(&self, sample: &[f64], theta: f64) -> Result<f64> {
        self.validate(sample)?;
        Ok(self.log_likelihood_unchecked(sample, theta))
    }

    fn log_likelihood_unchecked(&self, sample: &[f64], theta: f64) -> f64 {
        let n = sample.len() as f64;
        let total: f64 = sample.iter().sum();
        match self {
            Self::NormalMean => {
                let s = sum_of_squares(sample, theta);
                if s <= 0.0 {
                    return f64::INFINITY;
                }
                -0.5 * n * (s / n).ln()
            }
            Self::NormalVariance => {
                if theta <= 0.0 {
                    return f64::NEG_INFINITY;
                }
                let s = sum_of_squares(sample, mean(sample));
                -0.5 * n * theta.ln() - s / (2.0 * theta)
            }
            Self::ExponentialRate => {
                if theta <= 0.0 {
                    return f64::NEG_INFINITY;
                }
                n * theta.ln() - theta * total
            }
            Self::PoissonRate => {
                if theta < 0.0 {
                    return f64::NEG_INFINITY;
                }
                xlogy(total, theta) - n * theta
            }
            Self::BernoulliProbability => {
                if !(0.0..=1.0).contains(&theta) {
                    return f64::NEG_INFINITY;
                }
                xlogy(total, theta) + xlogy(n - total, 1.0 - theta)
            }
        }
    }

    /// Wald standard error from the observed information at the MLE
    pub fn standard_error(&self, sample: &[f64]) -> Result<f64> {
        let theta = self.mle(sample)?;
        let n = sample.len() as f64;
        let se = match self {
            Self::NormalMean => (sum_of_squares(sample, theta) / n).sqrt() / n.sqrt(),
            Self::NormalVariance => theta * (2.0 / n).sqrt(),
            Self::ExponentialRate => theta / n.sqrt(),
            Self::PoissonRate => (theta / n).sqrt(),
            Self::BernoulliProbability => (theta * (1.0 - theta) / n).sqrt(),
        };
        Ok(se)
    }

    /// Short label used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::NormalMean => "normal-mean",
            Self::NormalVariance => "normal-variance",
            Self::ExponentialRate => "exponential-rate",
            Self::PoissonRate => "poisson-rate",
            Self::BernoulliProbability => "bernoulli-probability",
        }
    }
}

/// `x ln y` with the convention `0 ln 0 = 0`
fn xlogy(x: f64, y: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x * y.ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use inference_core::ErrorKind;

    #[test]
    fn test_mles() {
        let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(LikelihoodModel::NormalMean.mle(&sample).unwrap(), 5.0);
        assert_relative_eq!(LikelihoodModel::NormalVariance.mle(&sample).unwrap(), 4.0);
        assert_relative_eq!(LikelihoodModel::ExponentialRate.mle(&sample).unwrap(), 0.2);
        assert_relative_eq!(LikelihoodModel::PoissonRate.mle(&sample).unwrap(), 5.0);

        let trials = [1.0, 0.0, 1.0, 1.0];
        assert_relative_eq!(LikelihoodModel::BernoulliProbability.mle(&trials).unwrap(), 0.75);
    }

    #[test]
    fn test_log_likelihood_peaks_at_mle() {
        let sample = [0.5, 1.2, 3.3, 0.7, 2.1];
        for model in [
            LikelihoodModel::NormalMean,
            LikelihoodModel::NormalVariance,
            LikelihoodModel::ExponentialRate,
        ] {
            let theta = model.mle(&sample).unwrap();
            let peak = model.log_likelihood(&sample, theta).unwrap();
            for shift in [0.9, 1.1] {
                assert!(model.log_likelihood(&sample, theta * shift).unwrap() < peak);
            }
        }
    }

    #[test]
    fn test_domain_checks() {
        assert_eq!(
            LikelihoodModel::PoissonRate.mle(&[1.0, 2.5]).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert!(LikelihoodModel::BernoulliProbability.mle(&[0.0, 2.0]).is_err());
        assert!(LikelihoodModel::ExponentialRate.mle(&[-1.0, 2.0]).is_err());
        assert!(LikelihoodModel::NormalVariance.mle(&[3.0, 3.0]).is_err());
    }

    #[test]
    fn test_wald_standard_errors() {
        let trials = [1.0, 0.0, 1.0, 1.0];
        let se = LikelihoodModel::BernoulliProbability.standard_error(&trials).unwrap();
        assert_relative_eq!(se, (0.75f64 * 0.25 / 4.0).sqrt());

        let counts = [0.0, 0.0, 0.0];
        assert_eq!(LikelihoodModel::PoissonRate.standard_error(&counts).unwrap(), 0.0);
    }
}
