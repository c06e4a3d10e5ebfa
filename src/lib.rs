//! # Teaching Inference
//!
//! Explicit-strategy statistical inference. Every estimator, interval
//! strategy, bootstrap method and test is named by the caller; nothing is
//! picked automatically and nothing is rounded.
//!
//! ## Crates
//!
//! - [`core`](inference_core): errors, [`IntervalResult`], [`SeedSpec`]
//! - [`estimators`]: point estimators behind [`EstimatorSpec`]
//! - [`distributions`]: reference families for critical values and p-values
//! - [`bootstrap`]: resampling engine and percentile/basic/BCa intervals
//! - [`confidence`]: the interval engine dispatching on [`StrategySpec`]
//! - [`hypothesis`]: tests dispatched on [`TestSpec`]
//! - [`regression`]: ordinary least squares
//!
//! Rounding for presentation lives in [`display`] and only ever touches
//! copies of results.
//!
//! ## Quick Start
//!
//! ```rust
//! use teaching_inference::prelude::*;
//!
//! let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! let ci = interval(
//!     &sample,
//!     &EstimatorSpec::mean_with_sd(),
//!     &StrategySpec::AnalyticT,
//!     0.95,
//!     SeedSpec::Fixed(1),
//! )
//! .unwrap();
//! assert!(ci.contains(5.0));
//!
//! let shown = DisplayConfig::default().interval(&ci);
//! assert_eq!(shown.estimate, 5.0);
//! ```

pub mod display;

pub use inference_bootstrap as bootstrap;
pub use inference_confidence as confidence;
pub use inference_distributions as distributions;
pub use inference_estimators as estimators;
pub use inference_hypothesis as hypothesis;
pub use inference_regression as regression;

pub use display::DisplayConfig;
pub use inference_core::{
    ConfidenceLevel, Error, ErrorKind, IntervalResult, Result, SeedSpec, Sidedness,
};

/// Commonly used types and entry points
pub mod prelude {
    pub use crate::display::DisplayConfig;
    pub use inference_bootstrap::{bootstrap, BootstrapMethod, BootstrapSample};
    pub use inference_confidence::{
        confidence_region, interval, interval_with_sidedness, likelihood_ratio_interval,
        prediction_interval, ConfidenceRegion, PredictionStrategy, StrategySpec,
    };
    pub use inference_core::{
        ConfidenceLevel, Error, ErrorKind, IntervalResult, Result, SeedSpec, Sidedness,
    };
    pub use inference_distributions::Family;
    pub use inference_estimators::{estimate, summary, EstimatorSpec, LikelihoodModel};
    pub use inference_hypothesis::{
        run_test, Alternative, TestResult, TestSpec, VarianceAssumption, VarianceTest,
    };
    pub use inference_regression::{fit_ols, OlsFit};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
