//! Interval strategies and their tag grammar

use inference_bootstrap::BootstrapMethod;
use inference_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an interval is constructed
///
/// There is no default. Callers name one variant on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum StrategySpec {
    /// Student-t pivot around the mean; only for the ddof = 1 mean
    AnalyticT,
    /// Normal quantile times an estimator-specific large-sample standard error
    AsymptoticNormal,
    /// Bootstrap distribution with an explicit method and resample count
    Bootstrap {
        method: BootstrapMethod,
        resamples: usize,
    },
    /// Inversion of the likelihood-ratio test; only for maximum likelihood
    LikelihoodRatio,
}

impl StrategySpec {
    /// Short label used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::AnalyticT => "analytic-t",
            Self::AsymptoticNormal => "asymptotic-normal",
            Self::Bootstrap { .. } => "bootstrap",
            Self::LikelihoodRatio => "likelihood-ratio",
        }
    }
}

impl fmt::Display for StrategySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bootstrap { method, resamples } => write!(f, "bootstrap:{method}:{resamples}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Parse `analytic-t`, `asymptotic-normal`, `likelihood-ratio` or
/// `bootstrap:<percentile|basic|bca>:<resamples>`
impl FromStr for StrategySpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim();
        match tag {
            "" => Err(Error::Configuration(
                "No interval strategy given; one must be chosen explicitly".to_string(),
            )),
            "analytic-t" => Ok(Self::AnalyticT),
            "asymptotic-normal" => Ok(Self::AsymptoticNormal),
            "likelihood-ratio" => Ok(Self::LikelihoodRatio),
            _ => {
                let mut parts = tag.split(':');
                match (parts.next(), parts.next(), parts.next(), parts.next()) {
                    (Some("bootstrap"), Some(method), Some(resamples), None) => {
                        let method = method.parse()?;
                        let resamples = resamples.parse().map_err(|_| {
                            Error::Configuration(format!(
                                "Resample count '{resamples}' is not a non-negative integer"
                            ))
                        })?;
                        Ok(Self::Bootstrap { method, resamples })
                    }
                    (Some("bootstrap"), ..) => Err(Error::Configuration(format!(
                        "Bootstrap strategy '{tag}' must name a method and a resample count"
                    ))),
                    _ => Err(Error::Configuration(format!(
                        "Unknown interval strategy '{tag}'"
                    ))),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inference_core::ErrorKind;

    #[test]
    fn test_parse_tags() {
        assert_eq!("analytic-t".parse::<StrategySpec>().unwrap(), StrategySpec::AnalyticT);
        assert_eq!(
            " asymptotic-normal ".parse::<StrategySpec>().unwrap(),
            StrategySpec::AsymptoticNormal
        );
        assert_eq!(
            "bootstrap:bca:2000".parse::<StrategySpec>().unwrap(),
            StrategySpec::Bootstrap {
                method: BootstrapMethod::Bca,
                resamples: 2000
            }
        );
    }

    #[test]
    fn test_display_round_trips() {
        for strategy in [
            StrategySpec::AnalyticT,
            StrategySpec::LikelihoodRatio,
            StrategySpec::Bootstrap {
                method: BootstrapMethod::Basic,
                resamples: 500,
            },
        ] {
            assert_eq!(strategy.to_string().parse::<StrategySpec>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_unspecified_or_unknown_tags() {
        for tag in ["", "   ", "analytic", "bootstrap", "bootstrap:bca", "bootstrap:jackknife:100", "bootstrap:bca:-5", "bootstrap:bca:10:1"] {
            let err = tag.parse::<StrategySpec>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "tag {tag:?}");
        }
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&StrategySpec::Bootstrap {
            method: BootstrapMethod::Percentile,
            resamples: 2000,
        })
        .unwrap();
        assert_eq!(json, r#"{"strategy":"bootstrap","method":"percentile","resamples":2000}"#);
    }
}
