//! Ordinary least squares

use inference_core::{ConfidenceLevel, Error, Result, Sidedness};
use inference_distributions::{t_quantile, Family};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use tracing::{debug, instrument};

/// Inference for one regression coefficient
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coefficient {
    /// `intercept` or `x1`, `x2`, ... in column order
    pub term: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_statistic: f64,
    /// Two-sided p-value against zero
    pub p_value: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Fitted value with mean-response and single-observation intervals
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub fitted: f64,
    pub mean_lower: f64,
    pub mean_upper: f64,
    pub prediction_lower: f64,
    pub prediction_upper: f64,
}

/// A fitted least-squares model
#[derive(Debug, Clone, Serialize)]
pub struct OlsFit {
    pub coefficients: Vec<Coefficient>,
    pub r_squared: f64,
    pub adjusted_r_squared: f64,
    pub residual_std_error: f64,
    pub residual_df: usize,
    pub observations: usize,
    pub intercept: bool,
    pub confidence_level: f64,
    #[serde(skip)]
    beta: DVector<f64>,
    #[serde(skip)]
    xtx_inverse: DMatrix<f64>,
    #[serde(skip)]
    critical_t: f64,
}

const RANK_TOLERANCE: f64 = 1e-12;

fn singular_design() -> Error {
    Error::InvalidInput("Design matrix is singular; predictors are collinear".to_string())
}

fn design_width(rows: &[Vec<f64>]) -> Result<usize> {
    let width = rows.first().map_or(0, Vec::len);
    if let Some(bad) = rows.iter().find(|r| r.len() != width) {
        return Err(Error::size_mismatch(width, bad.len(), "design row"));
    }
    Ok(width)
}

fn design_matrix(rows: &[Vec<f64>], predictors: usize, intercept: bool) -> DMatrix<f64> {
    let offset = usize::from(intercept);
    DMatrix::from_fn(rows.len(), predictors + offset, |i, j| {
        if intercept && j == 0 {
            1.0
        } else {
            rows[i][j - offset]
        }
    })
}

/// Fit `response ~ rows` by least squares
///
/// Each row holds one observation's predictors. With `intercept` a column of
/// ones is prepended. A singular design is an input error.
#[instrument(skip(rows, response), fields(n = response.len()))]
pub fn fit_ols(
    rows: &[Vec<f64>],
    response: &[f64],
    intercept: bool,
    confidence_level: f64,
) -> Result<OlsFit> {
    let level = ConfidenceLevel::new(confidence_level)?;
    if rows.len() != response.len() {
        return Err(Error::size_mismatch(response.len(), rows.len(), "regression design"));
    }
    let predictors = design_width(rows)?;
    let k = predictors + usize::from(intercept);
    if k == 0 {
        return Err(Error::Configuration(
            "A model without intercept needs at least one predictor".to_string(),
        ));
    }
    let n = response.len();
    if n < k + 1 {
        return Err(Error::InsufficientData {
            expected: k + 1,
            actual: n,
        });
    }
    if response.iter().chain(rows.iter().flatten()).any(|v| !v.is_finite()) {
        return Err(Error::non_finite("regression data"));
    }

    let x = design_matrix(rows, predictors, intercept);
    let y = DVector::from_column_slice(response);
    let xtx = x.transpose() * &x;
    let singular_values = xtx.singular_values();
    if singular_values.min() <= RANK_TOLERANCE * singular_values.max() {
        return Err(singular_design());
    }
    let xtx_inverse = xtx.cholesky().ok_or_else(singular_design)?.inverse();
    let beta = &xtx_inverse * (x.transpose() * &y);

    let residuals = &y - &x * &beta;
    let ssr = residuals.norm_squared();
    let df = n - k;
    let sigma2 = ssr / df as f64;
    if sigma2 <= 0.0 {
        return Err(Error::InvalidInput(
            "Residual variance is zero; coefficient standard errors are degenerate".to_string(),
        ));
    }
    let sigma = sigma2.sqrt();

    let sst = if intercept {
        let y_bar = y.mean();
        y.iter().map(|v| (v - y_bar).powi(2)).sum::<f64>()
    } else {
        y.norm_squared()
    };
    if sst == 0.0 {
        return Err(Error::InvalidInput("Response has no variation".to_string()));
    }
    let r_squared = 1.0 - ssr / sst;
    let adjusted_r_squared =
        1.0 - (1.0 - r_squared) * (n - usize::from(intercept)) as f64 / df as f64;

    let df_f = df as f64;
    let critical_t = t_quantile(1.0 - level.tail_probability(Sidedness::TwoSided), df_f)?;
    let t_family = Family::StudentT { df: df_f };

    let coefficients = (0..k)
        .map(|j| {
            let estimate = beta[j];
            let std_error = (sigma2 * xtx_inverse[(j, j)]).sqrt();
            let t_statistic = estimate / std_error;
            let p_value = (2.0 * t_family.sf(t_statistic.abs())?).min(1.0);
            let term = if intercept && j == 0 {
                "intercept".to_string()
            } else {
                format!("x{}", j + 1 - usize::from(intercept))
            };
            Ok(Coefficient {
                term,
                estimate,
                std_error,
                t_statistic,
                p_value,
                lower: estimate - critical_t * std_error,
                upper: estimate + critical_t * std_error,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(r_squared, sigma, df, "OLS fit");

    Ok(OlsFit {
        coefficients,
        r_squared,
        adjusted_r_squared,
        residual_std_error: sigma,
        residual_df: df,
        observations: n,
        intercept,
        confidence_level: level.value(),
        beta,
        xtx_inverse,
        critical_t,
    })
}

impl OlsFit {
    /// Fitted values with intervals at the fit's confidence level
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        let predictors = self.beta.len() - usize::from(self.intercept);
        rows.iter()
            .map(|row| {
                if row.len() != predictors {
                    return Err(Error::size_mismatch(predictors, row.len(), "prediction row"));
                }
                if row.iter().any(|v| !v.is_finite()) {
                    return Err(Error::non_finite("prediction row"));
                }
                let x0 = design_matrix(std::slice::from_ref(row), predictors, self.intercept)
                    .row(0)
                    .transpose();
                let fitted = self.beta.dot(&x0);
                let leverage = x0.dot(&(&self.xtx_inverse * &x0));
                let sigma2 = self.residual_std_error.powi(2);
                let mean_half = self.critical_t * (sigma2 * leverage).sqrt();
                let pred_half = self.critical_t * (sigma2 * (1.0 + leverage)).sqrt();
                Ok(Prediction {
                    fitted,
                    mean_lower: fitted - mean_half,
                    mean_upper: fitted + mean_half,
                    prediction_lower: fitted - pred_half,
                    prediction_upper: fitted + pred_half,
                })
            })
            .collect()
    }

    /// Coefficient by term name
    pub fn coefficient(&self, term: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.term == term)
    }
}
