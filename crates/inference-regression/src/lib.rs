//! Ordinary least squares regression
//!
//! [`fit_ols`] solves the normal equations with a Cholesky factorisation and
//! reports t-based inference for every coefficient. The returned [`OlsFit`]
//! keeps `(XᵀX)⁻¹` so [`OlsFit::predict`] can give both the confidence band
//! for the mean response and the wider prediction band for a new observation.
//!
//! ```rust
//! use inference_regression::fit_ols;
//!
//! let rows: Vec<Vec<f64>> = (1..=6).map(|i| vec![f64::from(i)]).collect();
//! let y = [1.1, 2.9, 5.2, 7.1, 8.8, 11.2];
//! let fit = fit_ols(&rows, &y, true, 0.95).unwrap();
//! assert!(fit.r_squared > 0.99);
//! ```

pub mod ols;

pub use ols::{fit_ols, Coefficient, OlsFit, Prediction};
