//! Command-line parsing for the cohort influence tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the cleaning/index code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "influence",
    version,
    about = "Cohort trend influence index over wide-format statistical tables"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clean + filter the raw table, write exports, and print per-region indices.
    Run(RunArgs),
    /// Clean + filter the raw table and write the filtered/readable TSVs only.
    Filter(RunArgs),
    /// Compute per-region indices from a previously filtered TSV.
    Index(IndexArgs),
    /// Compute one index from two explicit series (no files involved).
    Manual(ManualArgs),
}

/// Common options for filtering and the full run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Path to the JSON configuration file.
    #[arg(short = 'c', long, default_value = "config.json")]
    pub config: PathBuf,

    /// Raw input TSV (defaults to the standard export name in `input_folder`).
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Cohort-type code of the younger cohort.
    #[arg(long, default_value = "Y16_24")]
    pub younger: String,

    /// Cohort-type code of the older cohort.
    #[arg(long, default_value = "Y25_64")]
    pub older: String,

    /// Keep only these cohort-type codes (defaults to the younger/older pair).
    #[arg(long = "age-group")]
    pub age_groups: Vec<String>,

    /// Drop year columns older than this year.
    #[arg(long)]
    pub min_year: Option<i32>,

    /// Skip the per-region readable (chart-friendly) exports.
    #[arg(long)]
    pub no_readable: bool,

    /// Round printed indices to one decimal place (enabled by default).
    #[arg(long, default_value_t = true)]
    pub round: bool,

    /// Print unrounded indices.
    #[arg(long)]
    pub no_round: bool,
}

impl RunArgs {
    /// Cohort codes the filter keeps: explicit `--age-group`s, or the pair.
    pub fn cohort_codes(&self) -> Vec<String> {
        if self.age_groups.is_empty() {
            vec![self.younger.clone(), self.older.clone()]
        } else {
            self.age_groups.clone()
        }
    }

    pub fn rounding(&self) -> bool {
        self.round && !self.no_round
    }
}

/// Options for computing indices from an existing filtered file.
#[derive(Debug, Parser)]
pub struct IndexArgs {
    /// Path to the JSON configuration file.
    #[arg(short = 'c', long, default_value = "config.json")]
    pub config: PathBuf,

    /// Filtered TSV to read (defaults to the configured location).
    #[arg(long)]
    pub filtered: Option<PathBuf>,

    /// Cohort-type code of the younger cohort.
    #[arg(long, default_value = "Y16_24")]
    pub younger: String,

    /// Cohort-type code of the older cohort.
    #[arg(long, default_value = "Y25_64")]
    pub older: String,

    /// Round printed indices to one decimal place (enabled by default).
    #[arg(long, default_value_t = true)]
    pub round: bool,

    /// Print unrounded indices.
    #[arg(long)]
    pub no_round: bool,
}

impl IndexArgs {
    pub fn rounding(&self) -> bool {
        self.round && !self.no_round
    }
}

/// Options for a one-off calculation from explicit series.
#[derive(Debug, Parser)]
pub struct ManualArgs {
    /// Younger-cohort values, oldest first (space-separated).
    #[arg(long, num_args = 1.., required = true)]
    pub younger: Vec<f64>,

    /// Older-cohort values, oldest first (space-separated).
    #[arg(long, num_args = 1.., required = true)]
    pub older: Vec<f64>,

    /// Round the printed index to one decimal place.
    #[arg(long)]
    pub round: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cohort_codes_default_to_pair() {
        let args = RunArgs::parse_from(["filter"]);
        assert_eq!(args.cohort_codes(), vec!["Y16_24", "Y25_64"]);
        assert!(args.rounding());
    }

    #[test]
    fn explicit_age_groups_win() {
        let args = RunArgs::parse_from([
            "filter",
            "--age-group",
            "Y16_24",
            "--age-group",
            "Y25_54",
            "--age-group",
            "Y55_74",
        ]);
        assert_eq!(args.cohort_codes(), vec!["Y16_24", "Y25_54", "Y55_74"]);
    }

    #[test]
    fn no_round_disables_rounding() {
        let args = RunArgs::parse_from(["filter", "--no-round"]);
        assert!(!args.rounding());
    }

    #[test]
    fn manual_series_parse_as_floats() {
        let args =
            ManualArgs::parse_from(["manual", "--younger", "80", "80", "80", "--older", "10", "35", "60"]);
        assert_eq!(args.younger, vec![80.0, 80.0, 80.0]);
        assert_eq!(args.older, vec![10.0, 35.0, 60.0]);
    }
}
