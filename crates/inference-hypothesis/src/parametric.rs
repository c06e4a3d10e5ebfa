//! Tests with closed-form reference distributions

use crate::result::{NullDistribution, TestKind, TestResult};
use crate::spec::{Alternative, LeveneCenter, VarianceAssumption};
use inference_core::{mean, sum_of_squares, validate_sample, Error, Result};
use inference_distributions::Family;
use inference_estimators::{median, variance};
use tracing::debug;

/// p-value of `statistic` against `family` in the direction of `alternative`
///
/// Two-sided p-values double the smaller tail and are capped at 1.
pub fn p_value(family: Family, statistic: f64, alternative: Alternative) -> Result<f64> {
    let p = match alternative {
        Alternative::Greater => family.sf(statistic)?,
        Alternative::Less => family.cdf(statistic)?,
        Alternative::TwoSided => {
            (2.0 * family.cdf(statistic)?.min(family.sf(statistic)?)).min(1.0)
        }
    };
    Ok(p)
}

fn nonzero_se(se: f64) -> Result<f64> {
    if se > 0.0 {
        Ok(se)
    } else {
        Err(Error::InvalidInput(
            "Standard error is zero; the sample has degenerate variance".to_string(),
        ))
    }
}

pub(crate) fn one_sample_t(sample: &[f64], mu0: f64, alternative: Alternative) -> Result<TestResult> {
    validate_sample(sample, 2)?;
    let n = sample.len() as f64;
    let se = nonzero_se(variance(sample, 1)?.sqrt() / n.sqrt())?;
    let t = (mean(sample) - mu0) / se;
    let df = n - 1.0;
    debug!(t, df, "One-sample t statistic");
    Ok(TestResult {
        statistic: t,
        p_value: p_value(Family::StudentT { df }, t, alternative)?,
        kind: TestKind::OneSampleT,
        alternative,
        null_distribution: NullDistribution::StudentT { df },
        seed: None,
    })
}

pub(crate) fn two_sample_t(
    x: &[f64],
    y: &[f64],
    alternative: Alternative,
    assumption: VarianceAssumption,
) -> Result<TestResult> {
    validate_sample(x, 2)?;
    validate_sample(y, 2)?;
    let (n1, n2) = (x.len() as f64, y.len() as f64);
    let (v1, v2) = (variance(x, 1)?, variance(y, 1)?);

    let (se, df, kind) = match assumption {
        VarianceAssumption::Pooled => {
            let df = n1 + n2 - 2.0;
            let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
            ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df, TestKind::PooledTwoSampleT)
        }
        VarianceAssumption::Welch => {
            let (a, b) = (v1 / n1, v2 / n2);
            let df = (a + b).powi(2) / (a * a / (n1 - 1.0) + b * b / (n2 - 1.0));
            ((a + b).sqrt(), df, TestKind::WelchTwoSampleT)
        }
    };
    let se = nonzero_se(se)?;
    let t = (mean(x) - mean(y)) / se;
    debug!(t, df, ?kind, "Two-sample t statistic");
    Ok(TestResult {
        statistic: t,
        p_value: p_value(Family::StudentT { df }, t, alternative)?,
        kind,
        alternative,
        null_distribution: NullDistribution::StudentT { df },
        seed: None,
    })
}

fn group_sizes(groups: &[&[f64]], min_len: usize) -> Result<(f64, f64)> {
    for group in groups {
        validate_sample(group, min_len)?;
    }
    let k = groups.len() as f64;
    let total = groups.iter().map(|g| g.len()).sum::<usize>() as f64;
    Ok((k, total))
}

pub(crate) fn bartlett(groups: &[&[f64]]) -> Result<TestResult> {
    let (k, total) = group_sizes(groups, 2)?;
    let variances = groups
        .iter()
        .map(|g| variance(g, 1))
        .collect::<Result<Vec<f64>>>()?;
    if variances.iter().any(|&v| v == 0.0) {
        return Err(Error::InvalidInput(
            "Bartlett's test needs every group to have positive variance".to_string(),
        ));
    }

    let dof: Vec<f64> = groups.iter().map(|g| g.len() as f64 - 1.0).collect();
    let pooled = dof.iter().zip(&variances).map(|(d, v)| d * v).sum::<f64>() / (total - k);
    let numerator = (total - k) * pooled.ln()
        - dof.iter().zip(&variances).map(|(d, v)| d * v.ln()).sum::<f64>();
    let correction =
        1.0 + (dof.iter().map(|d| 1.0 / d).sum::<f64>() - 1.0 / (total - k)) / (3.0 * (k - 1.0));
    let statistic = numerator / correction;
    let df = k - 1.0;
    debug!(statistic, df, "Bartlett statistic");

    Ok(TestResult {
        statistic,
        p_value: Family::ChiSquared { df }.sf(statistic)?,
        kind: TestKind::Bartlett,
        alternative: Alternative::Greater,
        null_distribution: NullDistribution::ChiSquared { df },
        seed: None,
    })
}

/// F statistic and degrees of freedom of a one-way layout
fn anova_f(groups: &[Vec<f64>]) -> Result<(f64, f64, f64)> {
    let k = groups.len() as f64;
    let total = groups.iter().map(Vec::len).sum::<usize>() as f64;
    if total - k < 1.0 {
        return Err(Error::InsufficientData {
            expected: groups.len() + 1,
            actual: total as usize,
        });
    }
    let grand = groups.iter().flatten().sum::<f64>() / total;
    let between: f64 = groups
        .iter()
        .map(|g| g.len() as f64 * (mean(g) - grand).powi(2))
        .sum();
    let within: f64 = groups.iter().map(|g| sum_of_squares(g, mean(g))).sum();
    if within == 0.0 {
        return Err(Error::InvalidInput(
            "Within-group variation is zero; the F statistic is undefined".to_string(),
        ));
    }
    let (df1, df2) = (k - 1.0, total - k);
    Ok(((between / df1) / (within / df2), df1, df2))
}

fn f_result(groups: &[Vec<f64>], kind: TestKind) -> Result<TestResult> {
    let (statistic, df1, df2) = anova_f(groups)?;
    debug!(statistic, df1, df2, ?kind, "F statistic");
    Ok(TestResult {
        statistic,
        p_value: Family::FisherF { df1, df2 }.sf(statistic)?,
        kind,
        alternative: Alternative::Greater,
        null_distribution: NullDistribution::FisherF { df1, df2 },
        seed: None,
    })
}

pub(crate) fn one_way_anova(groups: &[&[f64]]) -> Result<TestResult> {
    group_sizes(groups, 1)?;
    let owned: Vec<Vec<f64>> = groups.iter().map(|g| g.to_vec()).collect();
    f_result(&owned, TestKind::OneWayAnova)
}

pub(crate) fn levene(groups: &[&[f64]], center: LeveneCenter) -> Result<TestResult> {
    group_sizes(groups, 2)?;
    let deviations = groups
        .iter()
        .map(|g| -> Result<Vec<f64>> {
            let c = match center {
                LeveneCenter::Mean => mean(g),
                LeveneCenter::Median => median(g)?,
            };
            Ok(g.iter().map(|x| (x - c).abs()).collect())
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;
    let kind = match center {
        LeveneCenter::Mean => TestKind::Levene,
        LeveneCenter::Median => TestKind::BrownForsythe,
    };
    f_result(&deviations, kind)
}

pub(crate) fn f_ratio(x: &[f64], y: &[f64], alternative: Alternative) -> Result<TestResult> {
    validate_sample(x, 2)?;
    validate_sample(y, 2)?;
    let denominator = variance(y, 1)?;
    if denominator == 0.0 {
        return Err(Error::InvalidInput(
            "Second group has zero variance; the variance ratio is undefined".to_string(),
        ));
    }
    let statistic = variance(x, 1)? / denominator;
    let (df1, df2) = (x.len() as f64 - 1.0, y.len() as f64 - 1.0);
    Ok(TestResult {
        statistic,
        p_value: p_value(Family::FisherF { df1, df2 }, statistic, alternative)?,
        kind: TestKind::FRatio,
        alternative,
        null_distribution: NullDistribution::FisherF { df1, df2 },
        seed: None,
    })
}
