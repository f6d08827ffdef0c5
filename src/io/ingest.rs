//! TSV ingest: separator repair + parsing.
//!
//! This module turns files into in-memory tables:
//!
//! - `read_raw_table` reads the raw statistics export, repairs the known
//!   separator defect on the raw text, and parses it as tab-separated
//! - `read_clean_table` re-reads a previously written filtered file (already
//!   split into category columns) and coerces its year cells
//!
//! Design goals:
//! - **Repair before parse**: the separator defect changes the field count,
//!   so it must be fixed while the content is still plain text
//! - **Deterministic behavior** (no hidden state, no retries)
//! - **Separation of concerns**: no filtering or index logic here

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Columns;
use crate::domain::{CategoryKey, CleanRow, CleanTable, RawTable};
use crate::error::AppError;
use crate::table::{coerce, parse_year_name};

/// Known upstream export defect: two decimal numbers joined by a stray
/// literal `b` where a tab separator should have been.
static SEPARATOR_DEFECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+)\s*b\s*(\d+\.\d+)").expect("separator defect pattern"));

/// Rewrite `<decimal> b <decimal>` so the two numbers become separate
/// tab-delimited fields. Applies to raw text before structured parsing.
pub fn repair_separators(raw: &str) -> Cow<'_, str> {
    SEPARATOR_DEFECT.replace_all(raw, "$1\t$2")
}

/// Read and parse the raw statistics export.
pub fn read_raw_table(path: &Path) -> Result<RawTable, AppError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to read input TSV '{}': {e}", path.display()),
        )
    })?;
    let repaired = repair_separators(&raw);
    parse_tsv(&repaired)
}

/// Parse tab-separated text with a header row into a `RawTable`.
///
/// Parsing is flexible: rows may carry more or fewer fields than the header
/// (inconsistently formatted exports do), and downstream lookups treat absent
/// cells as empty.
pub fn parse_tsv(text: &str) -> Result<RawTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read TSV header: {e}")))?
        .iter()
        .map(normalize_header_name)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| AppError::new(2, format!("Failed to read TSV record: {e}")))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Read a previously filtered file back into a `CleanTable`.
pub fn read_clean_table(path: &Path, columns: &Columns) -> Result<CleanTable, AppError> {
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to read filtered TSV '{}': {e}", path.display()),
        )
    })?;
    parse_clean_table(&text, columns)
}

/// Parse a filtered file's content: five named category columns plus year
/// columns, whose cells are re-coerced on the way in.
pub fn parse_clean_table(text: &str, columns: &Columns) -> Result<CleanTable, AppError> {
    let raw = parse_tsv(text)?;
    let header_map = build_header_map(&raw.headers);

    let mut category_idx = [0usize; 5];
    for (slot, name) in columns.category_names().iter().enumerate() {
        category_idx[slot] = *header_map.get(*name).ok_or_else(|| {
            AppError::new(3, format!("Missing required column `{name}` in filtered file."))
        })?;
    }

    // Year columns, most-recent-first regardless of file order.
    let mut year_cols: Vec<(usize, i32)> = raw
        .headers
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| parse_year_name(name).map(|y| (idx, y)))
        .collect();
    year_cols.sort_by(|a, b| b.1.cmp(&a.1));

    let years: Vec<i32> = year_cols.iter().map(|&(_, year)| year).collect();
    let rows: Vec<CleanRow> = raw
        .rows
        .iter()
        .map(|row| {
            let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");
            CleanRow {
                key: CategoryKey {
                    freq: cell(category_idx[0]).to_string(),
                    indic_is: cell(category_idx[1]).to_string(),
                    unit: cell(category_idx[2]).to_string(),
                    ind_type: cell(category_idx[3]).to_string(),
                    geo: cell(category_idx[4]).to_string(),
                },
                values: year_cols.iter().map(|&(idx, _)| coerce(cell(idx))).collect(),
            }
        })
        .collect();

    Ok(CleanTable { years, rows })
}

fn build_header_map(headers: &[String]) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.clone(), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 TSVs with a BOM prefix on
    // the first header. If we don't strip it, column lookups by name fail.
    name.trim().trim_start_matches('\u{feff}').to_string()
}
