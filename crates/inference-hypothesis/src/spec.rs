//! Test specifications
//!
//! Every test names its null value, alternative and statistic family
//! explicitly. Nothing is chosen from the shape of the data.

use serde::{Deserialize, Serialize};

/// Direction of the alternative hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    TwoSided,
    /// The parameter exceeds its null value
    Greater,
    /// The parameter is below its null value
    Less,
}

/// Variance assumption of a two-sample t test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VarianceAssumption {
    /// Equal variances, pooled estimate
    Pooled,
    /// Unequal variances, Welch-Satterthwaite degrees of freedom
    Welch,
}

/// Centre used for Levene's absolute deviations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeveneCenter {
    /// Classic Levene
    Mean,
    /// Brown-Forsythe
    Median,
}

/// Test for equality of group variances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum VarianceTest {
    /// Bartlett's χ² test; two or more groups, assumes normality
    Bartlett,
    /// Levene's F test on absolute deviations; two or more groups
    Levene { center: LeveneCenter },
    /// Ratio of two sample variances against F(n₁ − 1, n₂ − 1)
    FRatio { alternative: Alternative },
}

/// Which hypothesis test to run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "test", rename_all = "kebab-case")]
pub enum TestSpec {
    /// Student's t test of `mean = mu0`; one group
    OneSampleT { mu0: f64, alternative: Alternative },
    /// t test of equal means; two groups
    TwoSampleT {
        alternative: Alternative,
        variance: VarianceAssumption,
    },
    /// Equality of variances
    VarianceEquality { method: VarianceTest },
    /// One-way analysis of variance; two or more groups
    OneWayAnova,
    /// Studentized bootstrap test of `mean = mu0` under the recentred null; one group
    BootstrapMean {
        mu0: f64,
        alternative: Alternative,
        resamples: usize,
    },
    /// Permutation test of equal means; two groups
    Permutation {
        alternative: Alternative,
        resamples: usize,
    },
}

/// Accepted number of groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GroupCount {
    Exactly(usize),
    AtLeast(usize),
}

impl TestSpec {
    /// Short label used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::OneSampleT { .. } => "one-sample-t",
            Self::TwoSampleT { .. } => "two-sample-t",
            Self::VarianceEquality { .. } => "variance-equality",
            Self::OneWayAnova => "one-way-anova",
            Self::BootstrapMean { .. } => "bootstrap-mean",
            Self::Permutation { .. } => "permutation",
        }
    }

    pub(crate) fn group_count(&self) -> GroupCount {
        match self {
            Self::OneSampleT { .. } | Self::BootstrapMean { .. } => GroupCount::Exactly(1),
            Self::TwoSampleT { .. }
            | Self::Permutation { .. }
            | Self::VarianceEquality {
                method: VarianceTest::FRatio { .. },
            } => GroupCount::Exactly(2),
            Self::VarianceEquality { .. } | Self::OneWayAnova => GroupCount::AtLeast(2),
        }
    }
}
