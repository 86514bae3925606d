//! Population stability index over quantile buckets.
//!
//! Bucket edges are always taken from the expected (baseline) sample and
//! reused for the actual sample, so `psi(a, b) != psi(b, a)` in general.

use std::cmp::Ordering;

/// Smoothing term added to proportions and their denominators.
pub const EPSILON: f64 = 1e-8;

/// Linear-interpolated percentile of an ascending, NaN-free slice.
///
/// `q` is in percent (0 to 100). Returns `None` for an empty slice.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = (sorted.len() - 1) as f64 * (q / 100.0).clamp(0.0, 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    if lower == upper {
        return Some(sorted[lower]);
    }
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Computes `buckets + 1` edges at evenly spaced percentiles of `expected`.
///
/// Returns `None` when the edges cannot support a histogram: empty input,
/// zero buckets, a non-finite edge, or every edge coinciding.
pub fn quantile_edges(expected: &[f64], buckets: usize) -> Option<Vec<f64>> {
    if buckets == 0 {
        return None;
    }
    let mut sorted: Vec<f64> = expected.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let edges = (0..=buckets)
        .map(|i| percentile(&sorted, 100.0 * i as f64 / buckets as f64))
        .collect::<Option<Vec<f64>>>()?;

    if edges.iter().any(|e| !e.is_finite()) {
        return None;
    }
    if edges.first() == edges.last() {
        return None;
    }
    Some(edges)
}

/// Counts `data` into the bins delimited by `edges`.
///
/// Bins are `[e_i, e_{i+1})` except the last, which is closed. Values below
/// the first edge land in the first bin and values above the last edge in
/// the last bin. Zero-width bins (repeated edges) never receive values.
/// NaN values are skipped.
pub fn bin_counts(data: &[f64], edges: &[f64]) -> Vec<u64> {
    if edges.len() < 2 {
        return Vec::new();
    }
    let bins = edges.len() - 1;
    let first = edges[0];
    let last = edges[bins];
    let mut counts = vec![0u64; bins];

    for &value in data {
        if value.is_nan() {
            continue;
        }
        let index = if value < first {
            0
        } else if value >= last {
            bins - 1
        } else {
            // Edges <= value; at least one because value >= first.
            edges.partition_point(|e| e.partial_cmp(&value) != Some(Ordering::Greater)) - 1
        };
        counts[index] += 1;
    }
    counts
}

fn proportions(counts: &[u64]) -> Vec<f64> {
    let total: u64 = counts.iter().sum();
    let denominator = total as f64 + EPSILON;
    counts.iter().map(|&c| c as f64 / denominator).collect()
}

/// Population stability index of `actual` against `expected`.
///
/// `PSI = sum((e - a) * ln((e + eps) / (a + eps)))` over the bucket
/// proportions. Returns `None` when [`quantile_edges`] cannot produce edges,
/// e.g. for a constant `expected` column.
pub fn population_stability_index(expected: &[f64], actual: &[f64], buckets: usize) -> Option<f64> {
    let edges = quantile_edges(expected, buckets)?;
    let expected_perc = proportions(&bin_counts(expected, &edges));
    let actual_perc = proportions(&bin_counts(actual, &edges));

    let psi = expected_perc
        .iter()
        .zip(&actual_perc)
        .map(|(&e, &a)| (e - a) * ((e + EPSILON) / (a + EPSILON)).ln())
        .sum();
    Some(psi)
}
