//! Core types for explicit-strategy statistical inference
//!
//! This crate holds the pieces every other inference crate shares:
//!
//! - **Errors**: one [`Error`] enum classified into three [`ErrorKind`]s
//! - **Result types**: [`IntervalResult`], [`ConfidenceLevel`], [`Sidedness`]
//! - **Random streams**: [`SeedSpec`] and per-call [`RandomStream`]s
//! - **Sample helpers**: validation and ordering without mutating caller data
//!
//! Nothing in this crate holds global state. Every value is created per call
//! and dropped on return.
//!
//! # Example
//!
//! ```rust
//! use inference_core::{ConfidenceLevel, IntervalResult, Sidedness};
//!
//! let level = ConfidenceLevel::new(0.95).unwrap();
//! let ci = IntervalResult::new(3.2, 6.8, 5.0, level, Sidedness::TwoSided).unwrap();
//! assert!(ci.contains(5.0));
//! ```

pub mod error;
pub mod random;
pub mod sample;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use random::{RandomStream, SeedSpec};
pub use sample::{mean, sorted_copy, sum_of_squares, validate_paired, validate_sample};
pub use types::{ConfidenceLevel, IntervalResult, Sidedness};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
