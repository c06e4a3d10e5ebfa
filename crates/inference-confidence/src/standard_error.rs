//! Large-sample standard errors
//!
//! Each estimator carries its own approximation. Where the approximation
//! needs a reference distribution it assumes normal data, as noted per
//! variant.

use inference_core::{mean, sorted_copy, sum_of_squares, validate_sample, Error, Result};
use inference_distributions::normal_quantile;
use inference_estimators::{
    harrell_davis_moments, iqr, mad, variance, winsorize, EstimatorSpec, MAD_NORMAL_CONSISTENCY,
};

/// Asymptotic SD of the normalised MAD in units of σ/√n
const MAD_SE_FACTOR: f64 = 1.1664;
/// Asymptotic SD of the IQR in units of σ/√n
const IQR_SE_FACTOR: f64 = 1.5735;
/// IQR of the standard normal
const NORMAL_IQR: f64 = 1.349;

/// Estimators that can report a large-sample standard error
pub trait StandardErrorEstimator {
    /// Standard error of the estimate on `sample`
    fn standard_error(&self, sample: &[f64]) -> Result<f64>;
}

impl StandardErrorEstimator for EstimatorSpec {
    fn standard_error(&self, sample: &[f64]) -> Result<f64> {
        self.validate_parameters()?;
        validate_sample(sample, self.min_sample_size())?;
        let n = sample.len();
        let root_n = (n as f64).sqrt();

        match self {
            EstimatorSpec::Mean { ddof } => Ok(variance(sample, *ddof)?.sqrt() / root_n),
            EstimatorSpec::TrimmedMean { proportion } => {
                // Tukey-McLaughlin
                let s_w = winsorized_sd(sample, *proportion, *proportion)?;
                Ok(s_w / ((1.0 - 2.0 * proportion) * root_n))
            }
            EstimatorSpec::WinsorizedMean { lower, upper } => {
                let s_w = winsorized_sd(sample, *lower, *upper)?;
                Ok(s_w / ((1.0 - lower - upper) * root_n))
            }
            EstimatorSpec::WeightedMean { weights } => weighted_mean_sandwich(sample, weights),
            EstimatorSpec::Median => mckean_schrader(sample),
            EstimatorSpec::HarrellDavis { probability } => {
                // Maritz-Jarrett
                let (c1, c2) = harrell_davis_moments(&sorted_copy(sample), *probability)?;
                Ok((c2 - c1 * c1).max(0.0).sqrt())
            }
            EstimatorSpec::Variance { ddof } => variance_se(sample, *ddof),
            EstimatorSpec::StdDev { ddof } => {
                // Delta method
                let s = variance(sample, *ddof)?.sqrt();
                if s == 0.0 {
                    return Err(degenerate("standard deviation"));
                }
                Ok(variance_se(sample, *ddof)? / (2.0 * s))
            }
            EstimatorSpec::Mad { normalized } => {
                let sigma = mad(sample, true)?;
                let se = MAD_SE_FACTOR * sigma / root_n;
                Ok(if *normalized {
                    se
                } else {
                    se / MAD_NORMAL_CONSISTENCY
                })
            }
            EstimatorSpec::Iqr => {
                let sigma = iqr(sample)? / NORMAL_IQR;
                Ok(IQR_SE_FACTOR * sigma / root_n)
            }
            EstimatorSpec::MaximumLikelihood { model } => model.standard_error(sample),
        }
    }
}

fn degenerate(what: &str) -> Error {
    Error::InvalidInput(format!("Sample has no spread; {what} standard error is zero"))
}

fn winsorized_sd(sample: &[f64], lower: f64, upper: f64) -> Result<f64> {
    validate_sample(sample, 2)?;
    let w = winsorize(sample, lower, upper)?;
    Ok((sum_of_squares(&w, mean(&w)) / (w.len() - 1) as f64).sqrt())
}

/// Sandwich SE with the small-sample factor `n / (n - 1)`
fn weighted_mean_sandwich(sample: &[f64], weights: &[f64]) -> Result<f64> {
    validate_sample(sample, 2)?;
    let center = inference_estimators::weighted_mean(sample, weights)?;
    let total: f64 = weights.iter().sum();
    let n = sample.len() as f64;
    let meat: f64 = sample
        .iter()
        .zip(weights)
        .map(|(x, w)| (w * (x - center)).powi(2))
        .sum();
    Ok((n / (n - 1.0) * meat).sqrt() / total)
}

/// McKean-Schrader order-statistic SE of the median
fn mckean_schrader(sample: &[f64]) -> Result<f64> {
    validate_sample(sample, 2)?;
    let sorted = sorted_copy(sample);
    let n = sorted.len();
    let z = normal_quantile(0.975)?;
    let c = (n as f64 + 1.0) / 2.0 - z * (n as f64 / 4.0).sqrt();
    // Nearest order statistic, kept inside 1..=n/2
    let k = ((c + 0.5).floor() as usize).clamp(1, (n + 1) / 2);
    Ok((sorted[n - k] - sorted[k - 1]) / (2.0 * z))
}

/// `sqrt((m4 - (n-3)/(n-1) s^4) / n)`, rescaled from ddof = 1 to `ddof`
fn variance_se(sample: &[f64], ddof: usize) -> Result<f64> {
    validate_sample(sample, ddof.max(1) + 1)?;
    let n = sample.len() as f64;
    let center = mean(sample);
    let s2 = sum_of_squares(sample, center) / (n - 1.0);
    let m4 = sample.iter().map(|x| (x - center).powi(4)).sum::<f64>() / n;
    let radicand = m4 - (n - 3.0) / (n - 1.0) * s2 * s2;
    if radicand < 0.0 {
        return Err(Error::NumericalAnomaly(format!(
            "Variance standard error radicand is negative: {radicand}"
        )));
    }
    Ok((radicand / n).sqrt() * (n - 1.0) / (n - ddof as f64))
}
