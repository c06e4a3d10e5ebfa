//! Test results

use crate::spec::Alternative;
use serde::Serialize;

/// Which statistic was computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestKind {
    OneSampleT,
    PooledTwoSampleT,
    WelchTwoSampleT,
    Bartlett,
    Levene,
    BrownForsythe,
    FRatio,
    OneWayAnova,
    BootstrapMean,
    Permutation,
}

/// Reference distribution of the statistic under the null
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "distribution", rename_all = "kebab-case")]
pub enum NullDistribution {
    StudentT { df: f64 },
    ChiSquared { df: f64 },
    FisherF { df1: f64, df2: f64 },
    /// Resampling distribution built from `resamples` draws
    Empirical { resamples: usize },
}

/// Outcome of a hypothesis test, at full precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestResult {
    pub statistic: f64,
    pub p_value: f64,
    pub kind: TestKind,
    /// Direction tested; omnibus χ² and F tests reject in the upper tail and
    /// report `Greater`
    pub alternative: Alternative,
    pub null_distribution: NullDistribution,
    /// Resolved base seed of resampling tests
    pub seed: Option<u64>,
}

impl TestResult {
    /// Whether the null is rejected at significance level `alpha`
    pub fn rejects_at(&self, alpha: f64) -> bool {
        self.p_value <= alpha
    }
}
