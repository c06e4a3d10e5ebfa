//! Prediction intervals for a single new observation

use crate::engine::check_standard_error;
use inference_bootstrap::{check_resamples, resample_statistic};
use inference_core::{
    mean, sorted_copy, validate_sample, ConfidenceLevel, Error, IntervalResult, Result, SeedSpec,
    Sidedness,
};
use inference_distributions::t_quantile;
use inference_estimators::{quantile, variance, EstimatorSpec};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How a prediction interval is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum PredictionStrategy {
    /// `x̄ ± t · s · sqrt(1 + 1/n)`; only for the ddof = 1 mean
    AnalyticT,
    /// Quantiles of the bootstrap prediction error `x_new* − θ̂*`
    Bootstrap { resamples: usize },
}

/// Two-sided prediction interval for one new draw from the sampled population
#[instrument(skip(sample, spec), fields(n = sample.len(), estimator = spec.name()))]
pub fn prediction_interval(
    sample: &[f64],
    spec: &EstimatorSpec,
    strategy: PredictionStrategy,
    confidence_level: f64,
    seed: SeedSpec,
) -> Result<IntervalResult> {
    let level = ConfidenceLevel::new(confidence_level)?;
    let tail = level.tail_probability(Sidedness::TwoSided);

    match strategy {
        PredictionStrategy::AnalyticT => {
            if *spec != EstimatorSpec::mean_with_sd() {
                return Err(Error::Configuration(format!(
                    "The analytic-t prediction interval needs the mean with a ddof = 1 standard deviation, not {spec:?}"
                )));
            }
            validate_sample(sample, 2)?;
            let n = sample.len() as f64;
            let center = mean(sample);
            let spread = check_standard_error(variance(sample, 1)?.sqrt() * (1.0 + 1.0 / n).sqrt())?;
            let t = t_quantile(1.0 - tail, n - 1.0)?;
            debug!(center, spread, t, "Analytic-t prediction interval");
            IntervalResult::new(center - t * spread, center + t * spread, center, level, Sidedness::TwoSided)
        }
        PredictionStrategy::Bootstrap { resamples } => {
            if !spec.is_location() {
                return Err(Error::Configuration(format!(
                    "A bootstrap prediction interval needs a location estimator, not {}",
                    spec.name()
                )));
            }
            check_resamples(resamples)?;
            let theta = spec.estimate(sample)?;
            let seed = seed.resolve();
            let n = sample.len();

            let errors = resample_statistic(sample, resamples, seed, |stream, indices, resample| {
                let theta_star = spec.for_indices(indices)?.estimate(resample)?;
                let new_draw = sample[stream.index(n)];
                Ok(new_draw - theta_star)
            })?;
            let sorted = sorted_copy(&errors);
            let lower = theta + quantile(&sorted, tail)?;
            let upper = theta + quantile(&sorted, 1.0 - tail)?;
            debug!(seed, lower, upper, "Bootstrap prediction interval");
            IntervalResult::new(lower, upper, theta, level, Sidedness::TwoSided)
                .map(|ci| ci.with_seed(seed))
        }
    }
}
