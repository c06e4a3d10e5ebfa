//! Tests whose null distribution is built by resampling
//!
//! Both tests report `p = (#extreme + 1) / (B + 1)`, which is never zero.

use crate::result::{NullDistribution, TestKind, TestResult};
use crate::spec::Alternative;
use inference_bootstrap::{check_resamples, resample_statistic};
use inference_core::{mean, sum_of_squares, validate_sample, Error, RandomStream, Result};
use tracing::debug;

/// Whether `value` is at least as extreme as `observed`
fn is_extreme(value: f64, observed: f64, alternative: Alternative) -> bool {
    match alternative {
        Alternative::TwoSided => value.abs() >= observed.abs(),
        Alternative::Greater => value >= observed,
        Alternative::Less => value <= observed,
    }
}

fn resampling_p_value(values: &[f64], observed: f64, alternative: Alternative) -> f64 {
    let extreme = values
        .iter()
        .filter(|&&v| is_extreme(v, observed, alternative))
        .count();
    (extreme + 1) as f64 / (values.len() + 1) as f64
}

/// `(mean − mu0) / (s / √n)`, signed infinity when a resample has no spread
fn studentized(values: &[f64], mu0: f64) -> f64 {
    let n = values.len() as f64;
    let center = mean(values);
    let se = (sum_of_squares(values, center) / (n - 1.0)).sqrt() / n.sqrt();
    let diff = center - mu0;
    if se > 0.0 {
        diff / se
    } else if diff == 0.0 {
        0.0
    } else {
        diff.signum() * f64::INFINITY
    }
}

pub(crate) fn bootstrap_mean(
    sample: &[f64],
    mu0: f64,
    alternative: Alternative,
    resamples: usize,
    seed: u64,
) -> Result<TestResult> {
    check_resamples(resamples)?;
    validate_sample(sample, 2)?;
    if sum_of_squares(sample, mean(sample)) == 0.0 {
        return Err(Error::InvalidInput(
            "Standard error is zero; the sample has degenerate variance".to_string(),
        ));
    }
    let observed = studentized(sample, mu0);

    // Shift the sample so the null holds exactly
    let shift = mu0 - mean(sample);
    let null_sample: Vec<f64> = sample.iter().map(|x| x + shift).collect();
    let values = resample_statistic(&null_sample, resamples, seed, |_, _, resample| {
        Ok(studentized(resample, mu0))
    })?;

    let p_value = resampling_p_value(&values, observed, alternative);
    debug!(observed, p_value, seed, "Bootstrap mean test");
    Ok(TestResult {
        statistic: observed,
        p_value,
        kind: TestKind::BootstrapMean,
        alternative,
        null_distribution: NullDistribution::Empirical { resamples },
        seed: Some(seed),
    })
}

pub(crate) fn permutation(
    x: &[f64],
    y: &[f64],
    alternative: Alternative,
    resamples: usize,
    seed: u64,
) -> Result<TestResult> {
    check_resamples(resamples)?;
    validate_sample(x, 1)?;
    validate_sample(y, 1)?;
    let observed = mean(x) - mean(y);

    let pooled: Vec<f64> = x.iter().chain(y).copied().collect();
    let n1 = x.len();
    let mut shuffled = pooled.clone();
    let values: Vec<f64> = (0..resamples)
        .map(|i| {
            shuffled.copy_from_slice(&pooled);
            RandomStream::new(seed, i as u64).shuffle(&mut shuffled);
            mean(&shuffled[..n1]) - mean(&shuffled[n1..])
        })
        .collect();

    let p_value = resampling_p_value(&values, observed, alternative);
    debug!(observed, p_value, seed, "Permutation test");
    Ok(TestResult {
        statistic: observed,
        p_value,
        kind: TestKind::Permutation,
        alternative,
        null_distribution: NullDistribution::Empirical { resamples },
        seed: Some(seed),
    })
}
