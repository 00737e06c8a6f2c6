use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::path::Path;

/// One row of the target table: a theater identifier and the seating-plan
/// page to scrape for it.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Target {
    pub theater: String,
    pub url: String,
}

/// Loads the target table from a CSV file with named `theater` and `url`
/// columns, preserving row order. Extra columns are ignored; a missing
/// column or malformed row is fatal since there is no batch to protect yet.
pub fn load_targets<P: AsRef<Path>>(path: P) -> Result<Vec<Target>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        ScraperError::Config(format!(
            "Failed to read targets file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut targets = Vec::new();
    for row in reader.deserialize() {
        let target: Target = row?;
        targets.push(target);
    }
    Ok(targets)
}

/// Keeps only the theaters named in a comma-separated list, preserving
/// table order. Names match exactly after trimming whitespace.
pub fn filter_targets(targets: Vec<Target>, only: &str) -> Vec<Target> {
    let wanted: Vec<&str> = only
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();

    targets
        .into_iter()
        .filter(|t| wanted.iter().any(|name| *name == t.theater))
        .collect()
}
