//! Hypothesis test engine
//!
//! [`run_test`] takes the groups under test, a [`TestSpec`] naming the null,
//! the alternative and the statistic family, and a seed for the resampling
//! tests. Statistics come from the estimator library and p-values from the
//! distributional reference or from a resampling distribution.
//!
//! # Example
//!
//! ```rust
//! use inference_core::SeedSpec;
//! use inference_hypothesis::{run_test, Alternative, TestSpec};
//!
//! let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! let spec = TestSpec::OneSampleT { mu0: 4.0, alternative: Alternative::TwoSided };
//! let result = run_test(&[&sample], &spec, SeedSpec::Fixed(0)).unwrap();
//! assert!(result.p_value > 0.05);
//! ```

pub mod parametric;
pub mod resampling;
pub mod result;
pub mod spec;

pub use parametric::p_value;
pub use result::{NullDistribution, TestKind, TestResult};
pub use spec::{Alternative, LeveneCenter, TestSpec, VarianceAssumption, VarianceTest};

use inference_core::{Error, Result, SeedSpec};
use spec::GroupCount;
use tracing::instrument;

/// Run `spec` on `groups`
///
/// A group count the test does not accept is a configuration error. `seed`
/// is resolved once and only used by the resampling tests.
#[instrument(skip(groups, spec), fields(groups = groups.len(), test = spec.name()))]
pub fn run_test(groups: &[&[f64]], spec: &TestSpec, seed: SeedSpec) -> Result<TestResult> {
    check_group_count(groups.len(), spec)?;

    match *spec {
        TestSpec::OneSampleT { mu0, alternative } => {
            parametric::one_sample_t(groups[0], mu0, alternative)
        }
        TestSpec::TwoSampleT {
            alternative,
            variance,
        } => parametric::two_sample_t(groups[0], groups[1], alternative, variance),
        TestSpec::VarianceEquality { method } => match method {
            VarianceTest::Bartlett => parametric::bartlett(groups),
            VarianceTest::Levene { center } => parametric::levene(groups, center),
            VarianceTest::FRatio { alternative } => {
                parametric::f_ratio(groups[0], groups[1], alternative)
            }
        },
        TestSpec::OneWayAnova => parametric::one_way_anova(groups),
        TestSpec::BootstrapMean {
            mu0,
            alternative,
            resamples,
        } => resampling::bootstrap_mean(groups[0], mu0, alternative, resamples, seed.resolve()),
        TestSpec::Permutation {
            alternative,
            resamples,
        } => resampling::permutation(groups[0], groups[1], alternative, resamples, seed.resolve()),
    }
}

fn check_group_count(actual: usize, spec: &TestSpec) -> Result<()> {
    let ok = match spec.group_count() {
        GroupCount::Exactly(k) => actual == k,
        GroupCount::AtLeast(k) => actual >= k,
    };
    if ok {
        return Ok(());
    }
    let wanted = match spec.group_count() {
        GroupCount::Exactly(k) => format!("exactly {k}"),
        GroupCount::AtLeast(k) => format!("at least {k}"),
    };
    Err(Error::Configuration(format!(
        "The {} test takes {wanted} group(s), got {actual}",
        spec.name()
    )))
}
