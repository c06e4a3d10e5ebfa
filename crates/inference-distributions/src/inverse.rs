//! Numerical inversion of cumulative distribution functions
//!
//! Continuous quantiles are found by bracketing the target probability and
//! then running Newton steps safeguarded by bisection. Discrete quantiles are
//! the smallest support point whose cdf reaches the target.

use inference_core::{Error, Result};
use tracing::debug;

const MAX_EXPANSIONS: usize = 1100;
const MAX_ITERATIONS: usize = 200;
const RELATIVE_TOLERANCE: f64 = 1e-14;

/// Invert a continuous cdf on the support `[support_lo, support_hi]`
///
/// `p` must lie strictly inside (0, 1); the endpoints are handled by callers.
pub(crate) fn invert_continuous<C, D>(
    cdf: C,
    pdf: D,
    p: f64,
    support_lo: f64,
    support_hi: f64,
    guess: f64,
) -> Result<f64>
where
    C: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = bracket(&cdf, p, support_lo, support_hi, guess)?;

    let mut x = if guess > lo && guess < hi {
        guess
    } else {
        0.5 * (lo + hi)
    };

    for _ in 0..MAX_ITERATIONS {
        let f = cdf(x) - p;
        if f == 0.0 {
            return Ok(x);
        }
        if f < 0.0 {
            lo = x;
        } else {
            hi = x;
        }

        let scale = x.abs().max(1.0);
        if hi - lo <= RELATIVE_TOLERANCE * scale {
            return Ok(0.5 * (lo + hi));
        }

        let density = pdf(x);
        let newton = if density > 0.0 && density.is_finite() {
            x - f / density
        } else {
            f64::NAN
        };

        if newton > lo && newton < hi {
            if (newton - x).abs() <= RELATIVE_TOLERANCE * scale {
                return Ok(newton);
            }
            x = newton;
        } else {
            x = 0.5 * (lo + hi);
        }
    }

    debug!(p, x, lo, hi, "quantile solver hit the iteration cap");
    Ok(x)
}

/// Find `lo <= hi` with `cdf(lo) <= p <= cdf(hi)`
fn bracket<C>(cdf: &C, p: f64, support_lo: f64, support_hi: f64, guess: f64) -> Result<(f64, f64)>
where
    C: Fn(f64) -> f64,
{
    let anchor = if guess.is_finite() { guess } else { 0.0 };

    let lo = if support_lo.is_finite() {
        support_lo
    } else {
        let mut step = 1.0;
        let mut lo = anchor - step;
        let mut expansions = 0;
        while cdf(lo) > p {
            expansions += 1;
            if expansions > MAX_EXPANSIONS {
                return Err(Error::NumericalAnomaly(format!(
                    "cdf never drops below {p} on the lower side"
                )));
            }
            step *= 2.0;
            lo = anchor - step;
        }
        lo
    };

    let hi = if support_hi.is_finite() {
        support_hi
    } else {
        let mut step = 1.0;
        let mut hi = anchor.max(lo) + step;
        let mut expansions = 0;
        while cdf(hi) < p {
            expansions += 1;
            if expansions > MAX_EXPANSIONS {
                return Err(Error::NumericalAnomaly(format!(
                    "cdf never reaches {p} on the upper side"
                )));
            }
            step *= 2.0;
            hi = anchor.max(lo) + step;
        }
        hi
    };

    Ok((lo, hi))
}

/// Smallest non-negative integer `k` with `cdf(k) >= p`
///
/// `upper` caps the support for bounded families.
pub(crate) fn invert_discrete<C>(cdf: C, p: f64, upper: Option<u64>, guess: u64) -> Result<u64>
where
    C: Fn(u64) -> f64,
{
    if cdf(0) >= p {
        return Ok(0);
    }

    let mut hi = match upper {
        Some(upper) => upper,
        None => {
            let mut hi = guess.max(1);
            let mut expansions = 0;
            while cdf(hi) < p {
                expansions += 1;
                if expansions > 64 {
                    return Err(Error::NumericalAnomaly(format!(
                        "discrete cdf never reaches {p}"
                    )));
                }
                hi = hi.saturating_mul(2);
            }
            hi
        }
    };
    let mut lo = 0u64;

    // Invariant: cdf(lo) < p <= cdf(hi)
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if cdf(mid) >= p {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    Ok(hi)
}
