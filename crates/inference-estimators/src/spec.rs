//! The estimator selection and its single dispatch point

use crate::likelihood::LikelihoodModel;
use crate::location::{check_tail_proportion, check_weights, trimmed_mean, weighted_mean, winsorized_mean};
use crate::quantile::{harrell_davis_moments, median_sorted};
use crate::scale::{iqr, mad, std_dev, variance};
use inference_core::{mean, sorted_copy, validate_sample, Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Which point estimator to compute, with all of its parameters
///
/// Exactly one variant is active per call. Nothing is inferred from the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "estimator", rename_all = "kebab-case")]
pub enum EstimatorSpec {
    /// Arithmetic mean; `ddof` adjusts the standard deviation behind its
    /// standard error
    Mean { ddof: usize },
    /// Mean after cutting `proportion` of the sample from each tail
    TrimmedMean { proportion: f64 },
    /// Mean after clamping each tail
    WinsorizedMean { lower: f64, upper: f64 },
    /// Weighted mean; weights are paired with observations by position
    WeightedMean { weights: Vec<f64> },
    /// Type-7 sample median
    Median,
    /// Harrell-Davis quantile at `probability`
    HarrellDavis { probability: f64 },
    /// Variance with divisor `n - ddof`
    Variance { ddof: usize },
    /// Standard deviation with divisor `n - ddof`
    StdDev { ddof: usize },
    /// Median absolute deviation, optionally scaled for normal consistency
    Mad { normalized: bool },
    /// Interquartile range
    Iqr,
    /// Maximum-likelihood estimate of a parametric model
    MaximumLikelihood { model: LikelihoodModel },
}

impl EstimatorSpec {
    /// Sample mean paired with the ddof = 1 sample standard deviation
    pub fn mean_with_sd() -> Self {
        Self::Mean { ddof: 1 }
    }

    /// Short label used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean { .. } => "mean",
            Self::TrimmedMean { .. } => "trimmed-mean",
            Self::WinsorizedMean { .. } => "winsorized-mean",
            Self::WeightedMean { .. } => "weighted-mean",
            Self::Median => "median",
            Self::HarrellDavis { .. } => "harrell-davis",
            Self::Variance { .. } => "variance",
            Self::StdDev { .. } => "std-dev",
            Self::Mad { .. } => "mad",
            Self::Iqr => "iqr",
            Self::MaximumLikelihood { .. } => "maximum-likelihood",
        }
    }

    /// Whether the estimate targets the centre of the population
    ///
    /// Only these estimators can anchor a prediction interval for a new
    /// observation.
    pub fn is_location(&self) -> bool {
        matches!(
            self,
            Self::Mean { .. }
                | Self::TrimmedMean { .. }
                | Self::WinsorizedMean { .. }
                | Self::Median
                | Self::MaximumLikelihood {
                    model: LikelihoodModel::NormalMean
                }
        )
    }

    /// Smallest sample this estimator accepts
    pub fn min_sample_size(&self) -> usize {
        match self {
            Self::Variance { ddof } | Self::StdDev { ddof } => ddof + 1,
            Self::MaximumLikelihood {
                model: LikelihoodModel::NormalMean | LikelihoodModel::NormalVariance,
            } => 2,
            _ => 1,
        }
    }

    /// Check the parameters that do not depend on the sample
    pub fn validate_parameters(&self) -> Result<()> {
        match self {
            Self::TrimmedMean { proportion } => check_tail_proportion(*proportion, "Trim"),
            Self::WinsorizedMean { lower, upper } => {
                check_tail_proportion(*lower, "Lower winsorizing")?;
                check_tail_proportion(*upper, "Upper winsorizing")
            }
            Self::WeightedMean { weights } => check_weights(weights, weights.len()).map(|_| ()),
            Self::HarrellDavis { probability } if !(*probability > 0.0 && *probability < 1.0) => {
                Err(Error::InvalidInput(format!(
                    "Harrell-Davis probability {probability} must be in (0, 1)"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Compute the estimate
    pub fn estimate(&self, sample: &[f64]) -> Result<f64> {
        self.validate_parameters()?;
        validate_sample(sample, self.min_sample_size())?;
        match self {
            Self::Mean { .. } => Ok(mean(sample)),
            Self::TrimmedMean { proportion } => trimmed_mean(sample, *proportion),
            Self::WinsorizedMean { lower, upper } => winsorized_mean(sample, *lower, *upper),
            Self::WeightedMean { weights } => weighted_mean(sample, weights),
            Self::Median => Ok(median_sorted(&sorted_copy(sample))),
            Self::HarrellDavis { probability } => {
                harrell_davis_moments(&sorted_copy(sample), *probability).map(|(c1, _)| c1)
            }
            Self::Variance { ddof } => variance(sample, *ddof),
            Self::StdDev { ddof } => std_dev(sample, *ddof),
            Self::Mad { normalized } => mad(sample, *normalized),
            Self::Iqr => iqr(sample),
            Self::MaximumLikelihood { model } => model.mle(sample),
        }
    }

    /// The estimator to apply to a resample drawn at `indices`
    ///
    /// Position-bound parameters (the weights of a weighted mean) travel with
    /// their observations; every other spec is returned unchanged.
    pub fn for_indices(&self, indices: &[usize]) -> Result<Cow<'_, Self>> {
        match self {
            Self::WeightedMean { weights } => {
                let picked = indices
                    .iter()
                    .map(|&i| {
                        weights.get(i).copied().ok_or_else(|| {
                            Error::size_mismatch(weights.len(), i + 1, "weighted mean resample")
                        })
                    })
                    .collect::<Result<Vec<f64>>>()?;
                Ok(Cow::Owned(Self::WeightedMean { weights: picked }))
            }
            _ => Ok(Cow::Borrowed(self)),
        }
    }
}

/// Compute `spec` on `sample`
pub fn estimate(sample: &[f64], spec: &EstimatorSpec) -> Result<f64> {
    spec.estimate(sample)
}
