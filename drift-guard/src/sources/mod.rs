//! Data source connectors.
//!
//! Datasets are read from CSV through DataFusion. A source path may name a
//! single file, a directory (every `*.csv` beneath it, recursively), or a
//! glob pattern.

use std::path::Path;

use crate::prelude::*;

mod csv;

pub use csv::{CsvOptions, CsvSource};

fn is_glob_pattern(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

/// Expands glob patterns into a sorted list of file paths.
pub(crate) fn expand_globs(patterns: &[String]) -> Result<Vec<String>> {
    use glob::glob;

    let mut paths = Vec::new();
    for pattern in patterns {
        let matches = glob(pattern).map_err(|e| {
            DriftError::Configuration(format!("Invalid glob pattern '{pattern}': {e}"))
        })?;

        for entry in matches {
            let path = entry.map_err(|e| DriftError::Io(e.into_error()))?;
            if path.is_file() {
                if let Some(path_str) = path.to_str() {
                    paths.push(path_str.to_string());
                }
            }
        }
    }

    if paths.is_empty() {
        return Err(DriftError::data_source(
            "file",
            format!("No files found matching {patterns:?}"),
        ));
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// Resolves a file, directory or glob into concrete file paths.
///
/// Directories expand to `<dir>/**/*.<extension>`.
pub(crate) fn resolve_paths(path: &str, extension: &str) -> Result<Vec<String>> {
    if is_glob_pattern(path) {
        return expand_globs(&[path.to_string()]);
    }

    let fs_path = Path::new(path);
    if fs_path.is_dir() {
        let pattern = fs_path.join("**").join(format!("*.{extension}"));
        let pattern = pattern.to_str().ok_or_else(|| {
            DriftError::Configuration("Path contains invalid UTF-8".to_string())
        })?;
        return expand_globs(&[pattern.to_string()]);
    }
    if fs_path.is_file() {
        return Ok(vec![path.to_string()]);
    }

    Err(DriftError::data_source(
        "file",
        format!("Path '{path}' does not exist"),
    ))
}
