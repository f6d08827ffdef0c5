//! TSV exports: the filtered table and the per-region readable files.
//!
//! Content building is pure (returns `String`) so tests can assert on output
//! without touching the filesystem; writing is a thin wrapper. The readable
//! exports are chart-friendly reshaping only (one row per year, one column
//! per cohort label), with no new logic.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::domain::{CleanRow, CleanTable, RegionRule, Value};
use crate::error::AppError;
use crate::table::MISSING_TOKEN;

/// Build the filtered-table TSV: the five category columns plus the retained
/// year columns, most-recent-first.
pub fn format_filtered_tsv(table: &CleanTable, config: &Config) -> String {
    let mut out = String::new();

    let mut header: Vec<String> = config
        .columns
        .category_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    header.extend(table.years.iter().map(|y| y.to_string()));
    out.push_str(&header.join("\t"));
    out.push('\n');

    for row in &table.rows {
        let mut fields = vec![
            row.key.freq.clone(),
            row.key.indic_is.clone(),
            row.key.unit.clone(),
            row.key.ind_type.clone(),
            row.key.geo.clone(),
        ];
        fields.extend(row.values.iter().map(|v| format_value(*v)));
        out.push_str(&fields.join("\t"));
        out.push('\n');
    }

    out
}

/// Write the filtered table.
pub fn write_filtered_tsv(path: &Path, table: &CleanTable, config: &Config) -> Result<(), AppError> {
    write_text(path, &format_filtered_tsv(table, config), "filtered TSV")
}

/// Build a per-region readable TSV: `Year` plus one column per cohort label,
/// values in chronological order.
///
/// Returns `None` when the region has no rows for any requested cohort (the
/// caller reports that and moves on).
pub fn format_readable_tsv(
    table: &CleanTable,
    region: &RegionRule,
    cohorts: &[String],
    config: &Config,
) -> Option<String> {
    let mut series: Vec<(&str, Vec<Value>)> = Vec::new();
    for code in cohorts {
        let row = table
            .rows
            .iter()
            .find(|r| region.matches(&r.key.geo) && &r.key.ind_type == code);
        if let Some(row) = row {
            series.push((config.cohort_label(code), chronological(row)));
        }
    }
    if series.is_empty() {
        return None;
    }

    let mut out = String::new();
    let mut header = vec!["Year".to_string()];
    header.extend(series.iter().map(|(label, _)| label.to_string()));
    out.push_str(&header.join("\t"));
    out.push('\n');

    for (pos, year) in table.years.iter().rev().enumerate() {
        let mut fields = vec![year.to_string()];
        for (_, values) in &series {
            fields.push(format_value(values[pos]));
        }
        out.push_str(&fields.join("\t"));
        out.push('\n');
    }

    Some(out)
}

/// Write a per-region readable TSV; returns whether a file was produced.
pub fn write_readable_tsv(
    path: &Path,
    table: &CleanTable,
    region: &RegionRule,
    cohorts: &[String],
    config: &Config,
) -> Result<bool, AppError> {
    match format_readable_tsv(table, region, cohorts, config) {
        Some(content) => {
            write_text(path, &content, "readable TSV")?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn chronological(row: &CleanRow) -> Vec<Value> {
    row.values.iter().rev().copied().collect()
}

fn format_value(value: Value) -> String {
    match value {
        Value::Number(v) => format!("{v}"),
        Value::Missing => MISSING_TOKEN.trim().to_string(),
    }
}

fn write_text(path: &Path, content: &str, what: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::new(
                    2,
                    format!("Failed to create output directory '{}': {e}", parent.display()),
                )
            })?;
        }
    }
    fs::write(path, content)
        .map_err(|e| AppError::new(2, format!("Failed to write {what} '{}': {e}", path.display())))
}
