//! Point estimators for the inference engines
//!
//! Every estimator is a pure function of a caller-owned sample. The
//! [`EstimatorSpec`] enum names one estimator together with its parameters,
//! and [`EstimatorSpec::estimate`] is the only place that branches on it.
//!
//! Domain violations (a trim proportion of 0.5 or more, too few observations
//! for the requested `ddof`, counts that are not integers) are
//! `InvalidInput` errors. An inapplicable estimator is never swapped for a
//! different one.
//!
//! # Example
//!
//! ```rust
//! use inference_estimators::EstimatorSpec;
//!
//! let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! let trimmed = EstimatorSpec::TrimmedMean { proportion: 0.125 };
//! assert!((trimmed.estimate(&sample).unwrap() - 29.0 / 6.0).abs() < 1e-12);
//! ```

pub mod jackknife;
pub mod likelihood;
pub mod location;
pub mod quantile;
pub mod scale;
pub mod spec;
pub mod summary;

pub use jackknife::{bias_corrected, jackknife};
pub use likelihood::LikelihoodModel;
pub use location::{trimmed_mean, weighted_mean, winsorize, winsorized_mean};
pub use quantile::{harrell_davis_moments, quantile};
pub use scale::{iqr, mad, std_dev, variance, MAD_NORMAL_CONSISTENCY};
pub use spec::{estimate, EstimatorSpec};
pub use summary::{summary, BiasCorrected, Summary};

/// Type-7 median of an unsorted sample
pub fn median(sample: &[f64]) -> inference_core::Result<f64> {
    quantile(&inference_core::sorted_copy(sample), 0.5)
}
