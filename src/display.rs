//! Presentation rounding
//!
//! The inference crates return full precision. Callers that show numbers to
//! people thread one [`DisplayConfig`] through their formatting and round
//! copies here. The config is a plain value; there is no process-wide
//! precision setting.

use inference_core::IntervalResult;
use inference_estimators::{BiasCorrected, Summary};
use inference_hypothesis::TestResult;
use inference_regression::{Coefficient, Prediction};
use serde::{Deserialize, Serialize};

/// Number of decimal digits shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub precision: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { precision: 4 }
    }
}

impl DisplayConfig {
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }

    /// Round half away from zero to `precision` digits
    ///
    /// Infinities and NaN pass through unchanged.
    pub fn round(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let factor = 10f64.powi(self.precision as i32);
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        scaled.round() / factor
    }

    /// Fixed-point text with exactly `precision` digits
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.precision as usize, self.round(value))
    }

    pub fn interval(&self, result: &IntervalResult) -> IntervalResult {
        IntervalResult {
            lower: self.round(result.lower),
            upper: self.round(result.upper),
            estimate: self.round(result.estimate),
            ..*result
        }
    }

    pub fn test_result(&self, result: &TestResult) -> TestResult {
        TestResult {
            statistic: self.round(result.statistic),
            p_value: self.round(result.p_value),
            ..*result
        }
    }

    pub fn coefficient(&self, row: &Coefficient) -> Coefficient {
        Coefficient {
            term: row.term.clone(),
            estimate: self.round(row.estimate),
            std_error: self.round(row.std_error),
            t_statistic: self.round(row.t_statistic),
            p_value: self.round(row.p_value),
            lower: self.round(row.lower),
            upper: self.round(row.upper),
        }
    }

    pub fn summary(&self, summary: &Summary) -> Summary {
        let round = |value: Option<f64>| value.map(|v| self.round(v));
        Summary {
            mean: self.round(summary.mean),
            std_dev: round(summary.std_dev),
            min: self.round(summary.min),
            first_quartile: self.round(summary.first_quartile),
            median: self.round(summary.median),
            third_quartile: self.round(summary.third_quartile),
            max: self.round(summary.max),
            bias_corrected: BiasCorrected {
                mean: round(summary.bias_corrected.mean),
                std_dev: round(summary.bias_corrected.std_dev),
                median: round(summary.bias_corrected.median),
            },
            ..*summary
        }
    }

    pub fn prediction(&self, row: &Prediction) -> Prediction {
        Prediction {
            fitted: self.round(row.fitted),
            mean_lower: self.round(row.mean_lower),
            mean_upper: self.round(row.mean_upper),
            prediction_lower: self.round(row.prediction_lower),
            prediction_upper: self.round(row.prediction_upper),
        }
    }
}
