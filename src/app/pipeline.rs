//! Shared pipeline logic used by the `run`, `filter`, and `index` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! raw read -> repair/parse -> clean/filter -> per-region extract -> index
//!
//! The command handlers can then focus on presentation and file placement:
//! `run` chains both halves, `filter` stops after the first, `index` feeds
//! the second from a re-read filtered file.

use std::path::Path;

use crate::config::Config;
use crate::domain::{CleanTable, FilterOptions};
use crate::error::AppError;
use crate::io::ingest::read_raw_table;
use crate::report::{RegionOutcome, compute_region_outcomes};
use crate::table::{FilterOutcome, filter_table};

/// Execute the cleaning/filtering half: raw file to cleaned table.
pub fn run_filter(
    input: &Path,
    config: &Config,
    options: &FilterOptions,
) -> Result<FilterOutcome, AppError> {
    // 1) Read + repair + parse the raw export.
    let raw = read_raw_table(input)?;

    // 2) Clean and filter (fatal only on the metadata-arity invariant).
    filter_table(&raw, config, options)
}

/// Execute the per-region index half against an already-cleaned table.
///
/// This is also the entry point for the `index` command, where the cleaned
/// table comes from re-reading a filtered file.
pub fn run_index(
    table: &CleanTable,
    config: &Config,
    younger_code: &str,
    older_code: &str,
) -> Vec<RegionOutcome> {
    compute_region_outcomes(table, &config.region_rules(), younger_code, older_code)
}
