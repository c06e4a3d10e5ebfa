//! Bootstrap engine
//!
//! [`bootstrap`] produces the empirical distribution of an estimator from
//! seeded resamples; [`derive_interval`] turns that distribution into an
//! interval with an explicitly chosen [`BootstrapMethod`]. The engine knows
//! nothing about interval strategies.
//!
//! # Reproducibility
//!
//! A fixed [`SeedSpec`](inference_core::SeedSpec) reproduces the
//! distribution element for element, across runs and with or without the
//! `parallel` feature. An entropy seed is resolved once per call and
//! reported in [`BootstrapSample::seed`].
//!
//! # Example
//!
//! ```rust
//! use inference_bootstrap::{bootstrap, derive_interval, BootstrapMethod};
//! use inference_core::{ConfidenceLevel, SeedSpec, Sidedness};
//! use inference_estimators::EstimatorSpec;
//!
//! let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! let spec = EstimatorSpec::Median;
//! let boot = bootstrap(&sample, &spec, 1000, SeedSpec::Fixed(42)).unwrap();
//! let ci = derive_interval(
//!     &sample,
//!     &spec,
//!     &boot,
//!     BootstrapMethod::Percentile,
//!     ConfidenceLevel::NINETY_FIVE,
//!     Sidedness::TwoSided,
//! )
//! .unwrap();
//! assert!(ci.lower <= ci.upper);
//! ```

pub mod engine;
pub mod methods;

pub use engine::{bootstrap, check_resamples, resample_statistic, BootstrapSample, MIN_RESAMPLES};
pub use methods::{derive_interval, BcaCorrection, BootstrapMethod};
