//! Raw-table cleaning and filtering.
//!
//! This is the pass that turns a parsed raw table into a `CleanTable`:
//!
//! - split the composite metadata column into the five category fields
//!   (any other arity aborts the whole operation, no partial output)
//! - coerce every year-column cell to number-or-missing
//! - keep rows matching the configured indicator/unit targets and any
//!   configured region predicate
//! - keep rows matching the requested cohort-type codes, if given
//! - drop year columns older than the requested minimum year, if given
//! - order year columns most-recent-first and truncate at the first year any
//!   retained row is missing, so the remaining window is fully populated

use crate::config::Config;
use crate::domain::{CategoryKey, CleanRow, CleanTable, FilterOptions, RawTable, RegionRule, Value};
use crate::error::AppError;
use crate::table::coerce::coerce;

/// Outcome of a filtering pass, with the accounting the run summary prints.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub table: CleanTable,
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Year columns present in the raw table, before any column dropping.
    pub years_seen: usize,
    /// Most recent year column in which a retained row had a missing value;
    /// that column and everything older than it was dropped.
    pub truncated_at: Option<i32>,
}

/// Clean and filter a raw table per the configuration and options.
///
/// Total except for the metadata-arity invariant: a composite key that does
/// not split into exactly five fields is a fatal shape error.
pub fn filter_table(
    raw: &RawTable,
    config: &Config,
    options: &FilterOptions,
) -> Result<FilterOutcome, AppError> {
    let metadata_idx = raw
        .headers
        .iter()
        .position(|h| h == &config.columns.metadata)
        .ok_or_else(|| {
            AppError::new(
                3,
                format!(
                    "Missing metadata column `{}` in the input table.",
                    config.columns.metadata
                ),
            )
        })?;

    let year_cols: Vec<(usize, i32)> = raw
        .headers
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| parse_year_name(name).map(|y| (idx, y)))
        .collect();
    let years_seen = year_cols.len();

    let regions = config.region_rules();

    let mut rows_read = 0usize;
    let mut kept: Vec<CleanRow> = Vec::new();
    for row in &raw.rows {
        rows_read += 1;

        // The arity invariant holds for every row, kept or not.
        let cell = row.get(metadata_idx).map(String::as_str).unwrap_or("");
        let key = split_metadata(cell)?;

        if !matches_targets(&key, config, &regions) {
            continue;
        }
        if let Some(groups) = &options.age_groups {
            if !groups.iter().any(|g| g == &key.ind_type) {
                continue;
            }
        }

        let values: Vec<Value> = year_cols
            .iter()
            .map(|&(idx, _)| coerce(row.get(idx).map(String::as_str).unwrap_or("")))
            .collect();
        kept.push(CleanRow { key, values });
    }

    // Candidate year columns, most-recent-first, minimum-year filter applied.
    // Positions index into the per-row `values` vectors built above.
    let mut candidates: Vec<(usize, i32)> = year_cols
        .iter()
        .enumerate()
        .map(|(pos, &(_, year))| (pos, year))
        .filter(|&(_, year)| options.min_year.is_none_or(|min| year >= min))
        .collect();
    candidates.sort_by(|a, b| b.1.cmp(&a.1));

    // Trailing-missing truncation: stop at the first year any kept row lacks.
    let mut retained: Vec<(usize, i32)> = Vec::with_capacity(candidates.len());
    let mut truncated_at = None;
    for &(pos, year) in &candidates {
        if kept.iter().any(|row| row.values[pos].is_missing()) {
            truncated_at = Some(year);
            break;
        }
        retained.push((pos, year));
    }

    let years: Vec<i32> = retained.iter().map(|&(_, year)| year).collect();
    let rows: Vec<CleanRow> = kept
        .into_iter()
        .map(|row| CleanRow {
            values: retained.iter().map(|&(pos, _)| row.values[pos]).collect(),
            key: row.key,
        })
        .collect();

    let rows_kept = rows.len();
    Ok(FilterOutcome {
        table: CleanTable { years, rows },
        rows_read,
        rows_kept,
        years_seen,
        truncated_at,
    })
}

/// A year column is any column whose name is entirely digits.
pub fn parse_year_name(name: &str) -> Option<i32> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

fn split_metadata(cell: &str) -> Result<CategoryKey, AppError> {
    let parts: Vec<&str> = cell.split(',').map(str::trim).collect();
    if parts.len() != 5 {
        return Err(AppError::new(
            3,
            format!(
                "Metadata key `{cell}` split into {} fields (expected 5).",
                parts.len()
            ),
        ));
    }
    Ok(CategoryKey {
        freq: parts[0].to_string(),
        indic_is: parts[1].to_string(),
        unit: parts[2].to_string(),
        ind_type: parts[3].to_string(),
        geo: parts[4].to_string(),
    })
}

fn matches_targets(key: &CategoryKey, config: &Config, regions: &[RegionRule]) -> bool {
    key.indic_is == config.indic_is_value
        && key.unit == config.unit_value
        && regions.iter().any(|r| r.matches(&key.geo))
}
