//! Interval construction under explicit strategies
//!
//! [`interval`] takes a sample, an [`EstimatorSpec`](inference_estimators::EstimatorSpec),
//! a [`StrategySpec`] and a confidence level, and returns a full-precision
//! [`IntervalResult`](inference_core::IntervalResult) whose endpoints are
//! always ordered.
//!
//! | strategy            | valid estimators                     | construction                       |
//! |---------------------|--------------------------------------|------------------------------------|
//! | `analytic-t`        | `Mean { ddof: 1 }` only              | t(n − 1) pivot                     |
//! | `asymptotic-normal` | all                                  | z × estimator-specific SE          |
//! | `bootstrap`         | all                                  | percentile, basic or BCa           |
//! | `likelihood-ratio`  | `MaximumLikelihood` only             | χ²₁ deviance inversion             |
//!
//! Every other pairing is a configuration error.
//!
//! # Example
//!
//! ```rust
//! use inference_confidence::{interval, StrategySpec};
//! use inference_core::SeedSpec;
//! use inference_estimators::EstimatorSpec;
//!
//! let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! let strategy: StrategySpec = "bootstrap:percentile:2000".parse().unwrap();
//! let ci = interval(&sample, &EstimatorSpec::mean_with_sd(), &strategy, 0.95, SeedSpec::Fixed(7))
//!     .unwrap();
//! assert!(ci.lower <= ci.upper);
//! ```

pub mod engine;
pub mod likelihood_ratio;
pub mod prediction;
pub mod standard_error;
pub mod strategy;

pub use engine::{interval, interval_with_sidedness};
pub use likelihood_ratio::{confidence_region, likelihood_ratio_interval, ConfidenceRegion, RegionContour};
pub use prediction::{prediction_interval, PredictionStrategy};
pub use standard_error::StandardErrorEstimator;
pub use strategy::StrategySpec;
