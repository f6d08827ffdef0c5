//! Per-region cohort series extraction.
//!
//! Given a cleaned table, a region predicate, and a younger/older cohort
//! code pair, this module produces the two chronologically ordered numeric
//! series the index calculation consumes, or a `SkipReason` telling the
//! caller to move on to the next region.

use crate::domain::{CleanRow, CleanTable, RegionRule, SkipReason};

/// The two aligned series for one region, oldest value first.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub younger: Vec<f64>,
    pub older: Vec<f64>,
}

/// Extract the younger/older cohort series for one region.
///
/// Row values are flattened in row order (several rows can match a substring
/// region predicate) and reversed from the table's most-recent-first column
/// order into chronological order. Missing cells are dropped per cohort, so
/// a gap that survived into the input surfaces as `NoValues` or
/// `LengthMismatch` rather than poisoning the slope.
pub fn extract_series(
    table: &CleanTable,
    region: &RegionRule,
    younger_code: &str,
    older_code: &str,
) -> Result<Extraction, SkipReason> {
    let region_rows: Vec<&CleanRow> = table
        .rows
        .iter()
        .filter(|r| region.matches(&r.key.geo))
        .collect();

    let younger_rows: Vec<&CleanRow> = cohort_rows(&region_rows, younger_code);
    let older_rows: Vec<&CleanRow> = cohort_rows(&region_rows, older_code);
    if younger_rows.is_empty() || older_rows.is_empty() {
        return Err(SkipReason::MissingData);
    }

    let younger = flatten_chronological(&younger_rows);
    let older = flatten_chronological(&older_rows);
    if younger.is_empty() || older.is_empty() {
        return Err(SkipReason::NoValues);
    }
    if younger.len() != older.len() {
        return Err(SkipReason::LengthMismatch);
    }

    Ok(Extraction { younger, older })
}

fn cohort_rows<'a>(rows: &[&'a CleanRow], code: &str) -> Vec<&'a CleanRow> {
    rows.iter()
        .filter(|r| r.key.ind_type == code)
        .copied()
        .collect()
}

fn flatten_chronological(rows: &[&CleanRow]) -> Vec<f64> {
    let mut values: Vec<f64> = rows
        .iter()
        .flat_map(|r| r.values.iter().filter_map(|v| v.as_number()))
        .collect();
    values.reverse();
    values
}
