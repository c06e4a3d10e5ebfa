//! Supported distribution families
//!
//! Every parameter is explicit. Construction failures from `statrs` are
//! configuration errors because they always mean a bad parameter.

use crate::inverse::{invert_continuous, invert_discrete};
use inference_core::{Error, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{
    Binomial, ChiSquared, Continuous, ContinuousCDF, Discrete, DiscreteCDF, Exp,
    FisherSnedecor, Normal, Poisson, StudentsT,
};

/// Cdf values may decrease by at most this much between grid points
pub const MONOTONE_TOLERANCE: f64 = 1e-12;

/// A fully parameterised distribution family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum Family {
    /// Normal with mean and standard deviation
    Normal { mean: f64, std_dev: f64 },
    /// Standard Student-t with `df` degrees of freedom (may be fractional)
    StudentT { df: f64 },
    /// Chi-squared with `df` degrees of freedom
    ChiSquared { df: f64 },
    /// Fisher-Snedecor F with numerator and denominator degrees of freedom
    FisherF { df1: f64, df2: f64 },
    /// Exponential with the given rate
    Exponential { rate: f64 },
    /// Binomial with `n` trials and success probability `p`
    Binomial { n: u64, p: f64 },
    /// Poisson with mean `lambda`
    Poisson { lambda: f64 },
}

enum Built {
    Normal(Normal),
    StudentT(StudentsT),
    ChiSquared(ChiSquared),
    FisherF(FisherSnedecor),
    Exponential(Exp, f64),
    Binomial(Binomial, u64),
    Poisson(Poisson, f64),
}

fn config_err(family: &str, e: statrs::StatsError) -> Error {
    Error::Configuration(format!("Invalid {family} parameters: {e}"))
}

impl Family {
    /// The standard normal distribution
    pub const STANDARD_NORMAL: Family = Family::Normal {
        mean: 0.0,
        std_dev: 1.0,
    };

    /// Whether this family has a probability mass function
    pub fn is_discrete(&self) -> bool {
        matches!(self, Family::Binomial { .. } | Family::Poisson { .. })
    }

    /// Closed support `(min, max)`; infinite ends are unbounded
    pub fn support(&self) -> (f64, f64) {
        match *self {
            Family::Normal { .. } | Family::StudentT { .. } => (f64::NEG_INFINITY, f64::INFINITY),
            Family::ChiSquared { .. } | Family::FisherF { .. } | Family::Exponential { .. } => {
                (0.0, f64::INFINITY)
            }
            Family::Binomial { n, .. } => (0.0, n as f64),
            Family::Poisson { .. } => (0.0, f64::INFINITY),
        }
    }

    /// Validate the parameters without evaluating anything
    pub fn validate(&self) -> Result<()> {
        self.build().map(|_| ())
    }

    fn build(&self) -> Result<Built> {
        match *self {
            Family::Normal { mean, std_dev } => Normal::new(mean, std_dev)
                .map(Built::Normal)
                .map_err(|e| config_err("normal", e)),
            Family::StudentT { df } => StudentsT::new(0.0, 1.0, df)
                .map(Built::StudentT)
                .map_err(|e| config_err("Student-t", e)),
            Family::ChiSquared { df } => ChiSquared::new(df)
                .map(Built::ChiSquared)
                .map_err(|e| config_err("chi-squared", e)),
            Family::FisherF { df1, df2 } => FisherSnedecor::new(df1, df2)
                .map(Built::FisherF)
                .map_err(|e| config_err("F", e)),
            Family::Exponential { rate } => Exp::new(rate)
                .map(|d| Built::Exponential(d, rate))
                .map_err(|e| config_err("exponential", e)),
            Family::Binomial { n, p } => Binomial::new(p, n)
                .map(|d| Built::Binomial(d, n))
                .map_err(|e| config_err("binomial", e)),
            Family::Poisson { lambda } => Poisson::new(lambda)
                .map(|d| Built::Poisson(d, lambda))
                .map_err(|e| config_err("Poisson", e)),
        }
    }

    /// Probability density (continuous) or mass (discrete) at `x`
    ///
    /// Discrete families return 0 off the integer lattice.
    pub fn density(&self, x: f64) -> Result<f64> {
        let value = match self.build()? {
            Built::Normal(d) => d.pdf(x),
            Built::StudentT(d) => d.pdf(x),
            Built::ChiSquared(d) => support_pdf(x, |x| d.pdf(x)),
            Built::FisherF(d) => support_pdf(x, |x| d.pdf(x)),
            Built::Exponential(d, _) => support_pdf(x, |x| d.pdf(x)),
            Built::Binomial(d, n) => lattice(x, Some(n)).map_or(0.0, |k| d.pmf(k)),
            Built::Poisson(d, _) => lattice(x, None).map_or(0.0, |k| d.pmf(k)),
        };
        Ok(value)
    }

    /// Probability density; configuration error for discrete families
    pub fn pdf(&self, x: f64) -> Result<f64> {
        if self.is_discrete() {
            return Err(Error::Configuration(format!(
                "{self:?} is discrete; use pmf"
            )));
        }
        self.density(x)
    }

    /// Probability mass at `k`; configuration error for continuous families
    pub fn pmf(&self, k: u64) -> Result<f64> {
        match self.build()? {
            Built::Binomial(d, n) => Ok(if k > n { 0.0 } else { d.pmf(k) }),
            Built::Poisson(d, _) => Ok(d.pmf(k)),
            _ => Err(Error::Configuration(format!(
                "{self:?} is continuous; use pdf"
            ))),
        }
    }

    /// Cumulative distribution `P(X <= x)`
    pub fn cdf(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Err(Error::InvalidInput("cdf argument is NaN".to_string()));
        }
        let value = match self.build()? {
            Built::Normal(d) => d.cdf(x),
            Built::StudentT(d) => d.cdf(x),
            Built::ChiSquared(d) => support_cdf(x, |x| d.cdf(x)),
            Built::FisherF(d) => support_cdf(x, |x| d.cdf(x)),
            Built::Exponential(d, _) => support_cdf(x, |x| d.cdf(x)),
            Built::Binomial(d, n) => discrete_cdf(x, Some(n), |k| d.cdf(k)),
            Built::Poisson(d, _) => discrete_cdf(x, None, |k| d.cdf(k)),
        };
        Ok(value)
    }

    /// Survival function `P(X > x)`
    ///
    /// Computed directly where `statrs` offers it, so upper-tail p-values keep
    /// their precision.
    pub fn sf(&self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Err(Error::InvalidInput("sf argument is NaN".to_string()));
        }
        let value = match self.build()? {
            Built::Normal(d) => d.sf(x),
            Built::StudentT(d) => d.sf(x),
            Built::ChiSquared(d) => if x <= 0.0 { 1.0 } else { d.sf(x) },
            Built::FisherF(d) => if x <= 0.0 { 1.0 } else { d.sf(x) },
            Built::Exponential(d, _) => if x <= 0.0 { 1.0 } else { d.sf(x) },
            Built::Binomial(..) | Built::Poisson(..) => 1.0 - self.cdf(x)?,
        };
        Ok(value)
    }

    /// Quantile function
    ///
    /// Continuous families return the `x` with `cdf(x) = p`; discrete families
    /// return the smallest support point with `cdf(k) >= p`.
    pub fn quantile(&self, p: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::invalid_probability(p));
        }
        let (lo, hi) = self.support();
        let built = self.build()?;
        if p == 0.0 && !self.is_discrete() {
            return Ok(lo);
        }
        if p == 1.0 {
            return Ok(hi);
        }

        match built {
            Built::Normal(d) => Ok(d.inverse_cdf(p)),
            Built::Exponential(_, rate) => Ok(-(-p).ln_1p() / rate),
            Built::StudentT(d) => {
                let guess = Normal::new(0.0, 1.0)
                    .map_err(|e| config_err("normal", e))?
                    .inverse_cdf(p);
                invert_continuous(|x| d.cdf(x), |x| d.pdf(x), p, lo, hi, guess)
            }
            Built::ChiSquared(d) => {
                let guess = wilson_hilferty(p, d.freedom())?;
                invert_continuous(
                    |x| support_cdf(x, |x| d.cdf(x)),
                    |x| support_pdf(x, |x| d.pdf(x)),
                    p,
                    lo,
                    hi,
                    guess,
                )
            }
            Built::FisherF(d) => invert_continuous(
                |x| support_cdf(x, |x| d.cdf(x)),
                |x| support_pdf(x, |x| d.pdf(x)),
                p,
                lo,
                hi,
                1.0,
            ),
            Built::Binomial(d, n) => {
                invert_discrete(|k| d.cdf(k), p, Some(n), n / 2).map(|k| k as f64)
            }
            Built::Poisson(d, lambda) => {
                invert_discrete(|k| d.cdf(k), p, None, lambda.ceil() as u64).map(|k| k as f64)
            }
        }
    }

    /// Check the cdf on a grid: bounded in [0, 1] and non-decreasing
    ///
    /// The grid must be sorted ascending. A violation beyond
    /// [`MONOTONE_TOLERANCE`] is a numerical anomaly.
    pub fn verify_cdf_on_grid(&self, grid: &[f64]) -> Result<()> {
        let mut previous = 0.0;
        for (i, &x) in grid.iter().enumerate() {
            let value = self.cdf(x)?;
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::NumericalAnomaly(format!(
                    "cdf({x}) = {value} lies outside [0, 1] for {self:?}"
                )));
            }
            if i > 0 && value < previous - MONOTONE_TOLERANCE {
                return Err(Error::NumericalAnomaly(format!(
                    "cdf decreases from {previous} to {value} at x = {x} for {self:?}"
                )));
            }
            previous = value;
        }
        Ok(())
    }
}

fn support_pdf(x: f64, pdf: impl Fn(f64) -> f64) -> f64 {
    if x < 0.0 {
        0.0
    } else {
        pdf(x)
    }
}

fn support_cdf(x: f64, cdf: impl Fn(f64) -> f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        cdf(x)
    }
}

fn lattice(x: f64, upper: Option<u64>) -> Option<u64> {
    if x < 0.0 || x.fract() != 0.0 || !x.is_finite() {
        return None;
    }
    let k = x as u64;
    match upper {
        Some(n) if k > n => None,
        _ => Some(k),
    }
}

fn discrete_cdf(x: f64, upper: Option<u64>, cdf: impl Fn(u64) -> f64) -> f64 {
    if x < 0.0 {
        return 0.0;
    }
    if x == f64::INFINITY {
        return 1.0;
    }
    let k = x.floor() as u64;
    match upper {
        Some(n) if k >= n => 1.0,
        _ => cdf(k),
    }
}

/// Wilson-Hilferty starting point for chi-squared quantiles
fn wilson_hilferty(p: f64, df: f64) -> Result<f64> {
    let z = Normal::new(0.0, 1.0)
        .map_err(|e| config_err("normal", e))?
        .inverse_cdf(p);
    let h = 2.0 / (9.0 * df);
    Ok((df * (1.0 - h + z * h.sqrt()).powi(3)).max(1e-8))
}
