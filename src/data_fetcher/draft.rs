//! Draft history loader.
//!
//! Reads a directory of year-named CSV files (one file per season, the
//! season year embedded in the file name) and flattens them into
//! [`DraftPickRow`]s. Draft data is re-read on every request and never
//! cached. A bad file is skipped with a warning; it never aborts the
//! other files.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::data_fetcher::models::DraftPickRow;
use crate::error::AppError;

/// Column headers a draft CSV must carry. A file missing any of them
/// is skipped.
const REQUIRED_COLUMNS: [&str; 7] = [
    "Pick #",
    "Round Pick #",
    "Owner",
    "Previous Owner(s)",
    "Pick",
    "Team",
    "Pos.",
];

/// Extracts the season year from a file name as the first run of four
/// ASCII digits, e.g. `2021_picks.csv` -> 2021.
fn year_from_filename(name: &str) -> Option<i32> {
    let bytes = name.as_bytes();
    let mut run_start = None;
    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            let start = *run_start.get_or_insert(i);
            if i - start == 3 {
                return name[start..=i].parse().ok();
            }
        } else {
            run_start = None;
        }
    }
    None
}

/// Loads every draft pick from the CSV files in `dir`, ordered by year
/// then input order within each file.
///
/// The year inferred from each file name is authoritative: a `Year`
/// column inside a file is treated as the original year of a keeper or
/// traded pick and does not affect tagging. An empty or missing
/// directory yields an empty table rather than an error.
pub fn load_draft_picks(dir: &Path) -> Result<Vec<DraftPickRow>, AppError> {
    if !dir.is_dir() {
        warn!("Draft directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut files: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();

    let mut rows = Vec::new();
    for path in &files {
        match load_one_file(path) {
            Ok(mut file_rows) => rows.append(&mut file_rows),
            Err(e) => {
                // Isolate-and-continue: one bad file never takes down the rest
                warn!("Skipping draft file {}: {}", path.display(), e);
            }
        }
    }
    rows.sort_by_key(|row| row.year);

    info!(
        "Loaded {} draft picks from {} file(s) in {}",
        rows.len(),
        files.len(),
        dir.display()
    );
    Ok(rows)
}

fn load_one_file(path: &Path) -> Result<Vec<DraftPickRow>, AppError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let year = year_from_filename(file_name).ok_or_else(|| {
        AppError::config_error(format!("No 4-digit year in file name '{file_name}'"))
    })?;

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    // Resolve the fixed projection columns by header name
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| {
                AppError::config_error(format!("Missing required column '{column}'"))
            })?;
    }
    if headers.iter().any(|h| h == "Year") {
        debug!(
            "{} carries its own Year column; the file-name year {} is authoritative",
            path.display(),
            year
        );
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |i: usize| record.get(indices[i]).unwrap_or_default().to_string();
        rows.push(DraftPickRow {
            year,
            pick_number: field(0),
            round_pick_number: field(1),
            owner: field(2),
            previous_owners: field(3),
            pick: field(4),
            team: field(5),
            position: field(6),
        });
    }
    Ok(rows)
}
