//! Numerical invariants every family must satisfy

use approx::assert_abs_diff_eq;
use inference_distributions::Family;
use proptest::prelude::*;

fn continuous_families() -> Vec<Family> {
    vec![
        Family::Normal { mean: 1.5, std_dev: 2.0 },
        Family::StudentT { df: 3.0 },
        Family::StudentT { df: 12.5 },
        Family::ChiSquared { df: 4.0 },
        Family::ChiSquared { df: 9.0 },
        Family::FisherF { df1: 5.0, df2: 20.0 },
        Family::Exponential { rate: 0.5 },
    ]
}

/// Adaptive Simpson quadrature
fn simpson(f: &dyn Fn(f64) -> f64, a: f64, b: f64, eps: f64, depth: u32) -> f64 {
    #[allow(clippy::too_many_arguments)]
    fn step(
        f: &dyn Fn(f64) -> f64,
        a: f64,
        b: f64,
        fa: f64,
        fm: f64,
        fb: f64,
        whole: f64,
        eps: f64,
        depth: u32,
    ) -> f64 {
        let m = 0.5 * (a + b);
        let lm = 0.5 * (a + m);
        let rm = 0.5 * (m + b);
        let flm = f(lm);
        let frm = f(rm);
        let left = (m - a) / 6.0 * (fa + 4.0 * flm + fm);
        let right = (b - m) / 6.0 * (fm + 4.0 * frm + fb);
        let delta = left + right - whole;
        if depth == 0 || delta.abs() <= 15.0 * eps {
            return left + right + delta / 15.0;
        }
        step(f, a, m, fa, flm, fm, left, (eps / 2.0).max(1e-16), depth - 1)
            + step(f, m, b, fm, frm, fb, right, (eps / 2.0).max(1e-16), depth - 1)
    }
    let fa = f(a);
    let fb = f(b);
    let m = 0.5 * (a + b);
    let fm = f(m);
    let whole = (b - a) / 6.0 * (fa + 4.0 * fm + fb);
    step(f, a, b, fa, fm, fb, whole, eps, depth)
}

#[test]
fn test_densities_integrate_to_one() {
    for family in continuous_families() {
        // Integrate over the bulk, then add the exact tail masses
        let lo = family.quantile(1e-10).unwrap();
        let hi = family.quantile(1.0 - 1e-10).unwrap();
        let density = |x: f64| family.density(x).unwrap();
        let bulk = simpson(&density, lo, hi, 1e-12, 40);
        let tails = family.cdf(lo).unwrap() + family.sf(hi).unwrap();
        assert_abs_diff_eq!(bulk + tails, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_mass_functions_sum_to_one() {
    let binom = Family::Binomial { n: 30, p: 0.35 };
    let total: f64 = (0..=30).map(|k| binom.pmf(k).unwrap()).sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);

    let poisson = Family::Poisson { lambda: 4.2 };
    let total: f64 = (0..200).map(|k| poisson.pmf(k).unwrap()).sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
}

#[test]
fn test_cdf_grid_checks_pass() {
    let grid: Vec<f64> = (0..=400).map(|i| -20.0 + i as f64 * 0.1).collect();
    for family in continuous_families() {
        family.verify_cdf_on_grid(&grid).unwrap();
    }
    Family::Binomial { n: 12, p: 0.4 }.verify_cdf_on_grid(&grid).unwrap();
    Family::Poisson { lambda: 2.0 }.verify_cdf_on_grid(&grid).unwrap();
}

#[test]
fn test_support_endpoints_at_extreme_probabilities() {
    let chi = Family::ChiSquared { df: 2.0 };
    assert_eq!(chi.quantile(0.0).unwrap(), 0.0);
    assert_eq!(chi.quantile(1.0).unwrap(), f64::INFINITY);
    assert_eq!(Family::STANDARD_NORMAL.quantile(0.0).unwrap(), f64::NEG_INFINITY);
}

proptest! {
    #[test]
    fn prop_cdf_monotone(a in -50.0f64..50.0, b in -50.0f64..50.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        for family in continuous_families() {
            let cl = family.cdf(lo).unwrap();
            let ch = family.cdf(hi).unwrap();
            prop_assert!((0.0..=1.0).contains(&cl));
            prop_assert!(cl <= ch + 1e-12);
        }
    }

    #[test]
    fn prop_quantile_inverts_cdf(p in 0.001f64..0.999) {
        for family in continuous_families() {
            let x = family.quantile(p).unwrap();
            prop_assert!((family.cdf(x).unwrap() - p).abs() < 1e-9);
            prop_assert!((family.quantile(family.cdf(x).unwrap()).unwrap() - x).abs() < 1e-6 * x.abs().max(1.0));
        }
    }

    #[test]
    fn prop_discrete_quantile_is_smallest(p in 0.001f64..0.999, lambda in 0.5f64..20.0) {
        let family = Family::Poisson { lambda };
        let k = family.quantile(p).unwrap();
        prop_assert!(family.cdf(k).unwrap() >= p);
        if k >= 1.0 {
            prop_assert!(family.cdf(k - 1.0).unwrap() < p);
        }
    }
}
