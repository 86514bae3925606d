//! Two-sample Kolmogorov-Smirnov test.

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Outcome of a two-sample KS test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KsResult {
    /// Maximum absolute difference between the two empirical CDFs.
    pub statistic: f64,
    /// Asymptotic significance of `statistic` under the null hypothesis.
    pub p_value: f64,
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// KS statistic `D = sup |F_expected(x) - F_actual(x)|`.
///
/// Ties are consumed together so that both ECDFs are evaluated at the same
/// point.
pub fn ks_statistic(expected: &[f64], actual: &[f64]) -> Result<f64> {
    if expected.is_empty() || actual.is_empty() {
        return Err(DriftError::EmptyInput(
            "KS test requires two non-empty samples".to_string(),
        ));
    }

    let a = sorted_copy(expected);
    let b = sorted_copy(actual);
    let (n, m) = (a.len() as f64, b.len() as f64);
    let (mut i, mut j) = (0usize, 0usize);
    let mut d: f64 = 0.0;

    while i < a.len() && j < b.len() {
        let x = if a[i] <= b[j] { a[i] } else { b[j] };
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        d = d.max((i as f64 / n - j as f64 / m).abs());
    }
    Ok(d)
}

/// Survival function of the Kolmogorov distribution, `Q(lambda)`.
///
/// `Q(lambda) = 2 * sum_{k>=1} (-1)^(k-1) * exp(-2 k^2 lambda^2)`. The series
/// does not converge for small `lambda`, where `Q` is 1 to within precision.
pub fn kolmogorov_survival(lambda: f64) -> f64 {
    const EPS1: f64 = 1e-3;
    const EPS2: f64 = 1e-8;

    if lambda <= 0.0 || lambda.is_nan() {
        return 1.0;
    }

    let a2 = -2.0 * lambda * lambda;
    let mut fac = 2.0;
    let mut sum = 0.0;
    let mut previous = 0.0;
    for k in 1..=100 {
        let k = f64::from(k);
        let term = fac * (a2 * k * k).exp();
        sum += term;
        if term.abs() <= EPS1 * previous || term.abs() <= EPS2 * sum {
            return sum.clamp(0.0, 1.0);
        }
        fac = -fac;
        previous = term.abs();
    }
    1.0
}

/// Two-sample KS test.
///
/// The p-value uses the asymptotic distribution with effective sample size
/// `n*m/(n+m)` and Stephens' correction. Fails with
/// [`DriftError::EmptyInput`] if either sample is empty.
///
/// ```rust
/// use drift_guard::drift::ks_test;
///
/// let sample: Vec<f64> = (0..50).map(f64::from).collect();
/// let result = ks_test(&sample, &sample).unwrap();
/// assert_eq!(result.statistic, 0.0);
/// assert_eq!(result.p_value, 1.0);
/// ```
pub fn ks_test(expected: &[f64], actual: &[f64]) -> Result<KsResult> {
    let statistic = ks_statistic(expected, actual)?;
    let (n, m) = (expected.len() as f64, actual.len() as f64);
    let en = (n * m / (n + m)).sqrt();
    let lambda = (en + 0.12 + 0.11 / en) * statistic;

    Ok(KsResult {
        statistic,
        p_value: kolmogorov_survival(lambda),
    })
}
