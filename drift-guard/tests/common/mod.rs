//! Shared fixtures for integration tests.

#![allow(dead_code)]

use drift_guard::dataset::Dataset;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Deterministic standard normal samples (Box-Muller).
pub fn standard_normal(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let u1: f64 = 1.0 - rng.random::<f64>();
            let u2: f64 = rng.random::<f64>();
            (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
        })
        .collect()
}

pub fn single_column(name: &str, values: Vec<f64>) -> Dataset {
    Dataset::builder().numeric(name, values).build().unwrap()
}

/// Writes `columns` as a CSV file at `dir/file_name`.
pub fn write_csv(dir: &Path, file_name: &str, columns: &[(&str, Vec<f64>)]) -> PathBuf {
    let rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
    let mut text = columns
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(",");
    text.push('\n');
    for row in 0..rows {
        let line = columns
            .iter()
            .map(|(_, values)| format!("{:.12}", values[row]))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(text, "{line}").unwrap();
    }

    let path = dir.join(file_name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, text).unwrap();
    path
}
