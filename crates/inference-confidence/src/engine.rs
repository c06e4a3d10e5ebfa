//! The interval dispatcher
//!
//! This is the only place that branches on [`StrategySpec`]. Unsupported
//! estimator/strategy pairs are configuration errors; nothing falls back to
//! another strategy.

use crate::likelihood_ratio::likelihood_ratio_interval;
use crate::standard_error::StandardErrorEstimator;
use crate::strategy::StrategySpec;
use inference_bootstrap::{bootstrap, derive_interval};
use inference_core::{
    mean, validate_sample, ConfidenceLevel, Error, IntervalResult, Result, SeedSpec, Sidedness,
};
use inference_distributions::{normal_quantile, t_quantile};
use inference_estimators::{variance, EstimatorSpec};
use tracing::{debug, instrument};

/// Two-sided interval for `spec` on `sample` under `strategy`
///
/// `seed` drives every random path; it is ignored by the deterministic
/// strategies.
pub fn interval(
    sample: &[f64],
    spec: &EstimatorSpec,
    strategy: &StrategySpec,
    confidence_level: f64,
    seed: SeedSpec,
) -> Result<IntervalResult> {
    interval_with_sidedness(sample, spec, strategy, confidence_level, Sidedness::TwoSided, seed)
}

/// Interval of any shape for `spec` on `sample` under `strategy`
#[instrument(skip(sample, spec, strategy), fields(n = sample.len(), estimator = spec.name(), strategy = strategy.name()))]
pub fn interval_with_sidedness(
    sample: &[f64],
    spec: &EstimatorSpec,
    strategy: &StrategySpec,
    confidence_level: f64,
    sidedness: Sidedness,
    seed: SeedSpec,
) -> Result<IntervalResult> {
    let level = ConfidenceLevel::new(confidence_level)?;

    match (strategy, spec) {
        (StrategySpec::AnalyticT, EstimatorSpec::Mean { ddof: 1 }) => {
            analytic_t(sample, level, sidedness)
        }
        (StrategySpec::AnalyticT, other) => Err(Error::Configuration(format!(
            "The analytic-t strategy needs the mean with a ddof = 1 standard deviation, not {other:?}"
        ))),
        (StrategySpec::AsymptoticNormal, _) => asymptotic_normal(sample, spec, level, sidedness),
        (StrategySpec::Bootstrap { method, resamples }, _) => {
            let boot = bootstrap(sample, spec, *resamples, seed)?;
            derive_interval(sample, spec, &boot, *method, level, sidedness)
        }
        (StrategySpec::LikelihoodRatio, EstimatorSpec::MaximumLikelihood { model }) => {
            likelihood_ratio_interval(sample, *model, level, sidedness)
        }
        (StrategySpec::LikelihoodRatio, other) => Err(Error::Configuration(format!(
            "The likelihood-ratio strategy needs a maximum-likelihood estimator, not {other:?}"
        ))),
    }
}

/// Reject standard errors that cannot scale a critical value
pub(crate) fn check_standard_error(se: f64) -> Result<f64> {
    if se.is_nan() || se.is_infinite() {
        return Err(Error::NumericalAnomaly(format!("Standard error is {se}")));
    }
    if se <= 0.0 {
        return Err(Error::InvalidInput(
            "Standard error is zero; the sample has degenerate variance".to_string(),
        ));
    }
    Ok(se)
}

fn analytic_t(sample: &[f64], level: ConfidenceLevel, sidedness: Sidedness) -> Result<IntervalResult> {
    validate_sample(sample, 2)?;
    let n = sample.len() as f64;
    let center = mean(sample);
    let se = check_standard_error(variance(sample, 1)?.sqrt() / n.sqrt())?;
    let t = t_quantile(1.0 - level.tail_probability(sidedness), n - 1.0)?;
    debug!(center, se, t, "Analytic-t interval");
    IntervalResult::shaped(center - t * se, center + t * se, center, level, sidedness)
}

fn asymptotic_normal(
    sample: &[f64],
    spec: &EstimatorSpec,
    level: ConfidenceLevel,
    sidedness: Sidedness,
) -> Result<IntervalResult> {
    let estimate = spec.estimate(sample)?;
    let se = check_standard_error(spec.standard_error(sample)?)?;
    let z = normal_quantile(1.0 - level.tail_probability(sidedness))?;
    debug!(estimate, se, z, "Asymptotic-normal interval");
    IntervalResult::shaped(estimate - z * se, estimate + z * se, estimate, level, sidedness)
}
