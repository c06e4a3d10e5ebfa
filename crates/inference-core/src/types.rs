//! Common result types for interval construction

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence level type with validation
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// Create a new confidence level
    ///
    /// Fails with a configuration error unless `level` lies in (0, 1).
    pub fn new(level: f64) -> Result<Self> {
        if !(level > 0.0 && level < 1.0) {
            return Err(Error::Configuration(format!(
                "Confidence level {level} must be in (0, 1)"
            )));
        }
        Ok(Self(level))
    }

    /// Get the confidence level value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Get the alpha level (1 - confidence level)
    pub fn alpha(&self) -> f64 {
        1.0 - self.0
    }

    /// Probability placed in each tail for the given shape
    pub fn tail_probability(&self, sidedness: Sidedness) -> f64 {
        match sidedness {
            Sidedness::TwoSided => self.alpha() / 2.0,
            Sidedness::LowerBound | Sidedness::UpperBound => self.alpha(),
        }
    }

    /// Common confidence levels
    pub const NINETY: Self = Self(0.90);
    pub const NINETY_FIVE: Self = Self(0.95);
    pub const NINETY_NINE: Self = Self(0.99);
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = Error;

    fn try_from(level: f64) -> Result<Self> {
        Self::new(level)
    }
}

impl<'de> Deserialize<'de> for ConfidenceLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let level = f64::deserialize(deserializer)?;
        Self::new(level).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}

/// Shape of an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sidedness {
    /// Both endpoints finite, α split across the tails
    TwoSided,
    /// `[lower, +∞)`
    LowerBound,
    /// `(-∞, upper]`
    UpperBound,
}

/// An interval with its point estimate and confidence level
///
/// All values are full precision. `lower <= upper` always holds for values
/// built through [`IntervalResult::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntervalResult {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// The point estimate; not necessarily centred
    pub estimate: f64,
    /// Confidence level used to produce the interval
    pub confidence_level: f64,
    /// Interval shape
    pub sidedness: Sidedness,
    /// Resolved base seed of resampling strategies; replaying it with
    /// `SeedSpec::Fixed` reproduces the interval
    pub seed: Option<u64>,
}

impl IntervalResult {
    /// Create a new interval, enforcing the ordering invariant
    ///
    /// NaN endpoints and `lower > upper` are numerical anomalies.
    pub fn new(
        lower: f64,
        upper: f64,
        estimate: f64,
        confidence_level: ConfidenceLevel,
        sidedness: Sidedness,
    ) -> Result<Self> {
        if lower.is_nan() || upper.is_nan() {
            return Err(Error::NumericalAnomaly(format!(
                "interval endpoint is NaN: [{lower}, {upper}]"
            )));
        }
        if lower > upper {
            return Err(Error::NumericalAnomaly(format!(
                "interval is inverted: lower {lower} > upper {upper}"
            )));
        }
        Ok(Self {
            lower,
            upper,
            estimate,
            confidence_level: confidence_level.value(),
            sidedness,
            seed: None,
        })
    }

    /// Record the base seed that produced this interval
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build a two- or one-sided interval from a pair of candidate endpoints
    ///
    /// `lower`/`upper` are the two-sided candidates; the open side of a
    /// one-sided shape is replaced by an infinity.
    pub fn shaped(
        lower: f64,
        upper: f64,
        estimate: f64,
        confidence_level: ConfidenceLevel,
        sidedness: Sidedness,
    ) -> Result<Self> {
        let (lower, upper) = match sidedness {
            Sidedness::TwoSided => (lower, upper),
            Sidedness::LowerBound => (lower, f64::INFINITY),
            Sidedness::UpperBound => (f64::NEG_INFINITY, upper),
        };
        Self::new(lower, upper, estimate, confidence_level, sidedness)
    }

    /// Width of the interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Margin of error (half-width)
    pub fn margin_of_error(&self) -> f64 {
        self.width() / 2.0
    }

    /// Check if a value is contained in the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Check if intervals overlap
    pub fn overlaps(&self, other: &IntervalResult) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }
}
