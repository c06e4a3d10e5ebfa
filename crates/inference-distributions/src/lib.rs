//! Distribution functions for the inference engines
//!
//! Every family takes explicit parameters and answers density, cumulative,
//! survival and quantile queries at full precision. The continuous quantiles
//! for Student-t, chi-squared and F are solved numerically to near machine
//! precision rather than taken from a coarse approximation, because interval
//! endpoints are built directly from them.
//!
//! # Example
//!
//! ```rust
//! use inference_distributions::Family;
//!
//! let t = Family::StudentT { df: 7.0 };
//! let critical = t.quantile(0.975).unwrap();
//! assert!((critical - 2.3646242510102993).abs() < 1e-9);
//! ```

pub mod family;
mod inverse;

pub use family::{Family, MONOTONE_TOLERANCE};

use inference_core::Result;

/// Standard normal cdf
pub fn normal_cdf(z: f64) -> Result<f64> {
    Family::STANDARD_NORMAL.cdf(z)
}

/// Standard normal quantile
pub fn normal_quantile(p: f64) -> Result<f64> {
    Family::STANDARD_NORMAL.quantile(p)
}

/// Student-t quantile with `df` degrees of freedom
pub fn t_quantile(p: f64, df: f64) -> Result<f64> {
    Family::StudentT { df }.quantile(p)
}

/// Chi-squared quantile with `df` degrees of freedom
pub fn chi_squared_quantile(p: f64, df: f64) -> Result<f64> {
    Family::ChiSquared { df }.quantile(p)
}
