//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the JSON configuration
//! - runs the cleaning/filtering and per-region index pipeline
//! - prints reports
//! - writes the filtered and readable exports

use clap::Parser;

use crate::cli::{Command, IndexArgs, ManualArgs, RunArgs};
use crate::config::Config;
use crate::domain::FilterOptions;
use crate::error::AppError;
use crate::index::{influence_index, round1};
use crate::io::export::{write_filtered_tsv, write_readable_tsv};
use crate::io::ingest::read_clean_table;

pub mod pipeline;

/// Entry point for the `influence` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `influence` (and `influence -c other.json`) to behave
    // like `influence run ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args, OutputMode::FilterAndIndex),
        Command::Filter(args) => handle_run(args, OutputMode::FilterOnly),
        Command::Index(args) => handle_index(args),
        Command::Manual(args) => handle_manual(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    FilterAndIndex,
    FilterOnly,
}

fn handle_run(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = Config::load(&args.config)?;
    let input = config.input_path(args.input.as_deref());
    let options = FilterOptions {
        age_groups: Some(args.cohort_codes()),
        min_year: args.min_year,
    };

    let filtered = pipeline::run_filter(&input, &config, &options)?;

    // Exports first: the filtered file is the contract other commands read.
    write_filtered_tsv(&config.filtered_path(), &filtered.table, &config)?;

    let mut unexported: Vec<String> = Vec::new();
    if !args.no_readable {
        let cohorts = args.cohort_codes();
        for region in config.region_rules() {
            let path = config.readable_path(&region.name);
            let written = write_readable_tsv(&path, &filtered.table, &region, &cohorts, &config)?;
            if !written {
                unexported.push(region.name.clone());
            }
        }
    }

    print!(
        "{}",
        crate::report::format_run_summary(&filtered, &config, &options, &args.younger, &args.older)
    );
    for name in &unexported {
        println!("(no readable export for {name}) no rows matched the region");
    }

    if mode == OutputMode::FilterAndIndex {
        let outcomes = pipeline::run_index(&filtered.table, &config, &args.younger, &args.older);
        print!(
            "{}",
            crate::report::format_region_outcomes(
                &outcomes,
                &config,
                &args.younger,
                &args.older,
                args.rounding(),
            )
        );
    }

    Ok(())
}

fn handle_index(args: IndexArgs) -> Result<(), AppError> {
    let config = Config::load(&args.config)?;
    let path = match &args.filtered {
        Some(path) => path.clone(),
        None => config.filtered_path(),
    };

    let table = read_clean_table(&path, &config.columns)?;
    let outcomes = pipeline::run_index(&table, &config, &args.younger, &args.older);

    print!(
        "{}",
        crate::report::format_region_outcomes(
            &outcomes,
            &config,
            &args.younger,
            &args.older,
            args.rounding(),
        )
    );

    Ok(())
}

fn handle_manual(args: ManualArgs) -> Result<(), AppError> {
    let index = manual_index(&args.younger, &args.older, args.round)?;
    println!("Influence Index: {index}");
    Ok(())
}

/// Compute one index from two explicit series.
///
/// The two series must be the same length; unlike the per-region batch this
/// is a direct user input error, so it is fatal rather than a skip.
pub fn manual_index(younger: &[f64], older: &[f64], round: bool) -> Result<f64, AppError> {
    if younger.len() != older.len() {
        return Err(AppError::new(
            2,
            format!(
                "Series lengths differ: younger has {} values, older has {}.",
                younger.len(),
                older.len()
            ),
        ));
    }
    let index = influence_index(younger, older);
    Ok(if round { round1(index) } else { index })
}

/// Rewrite argv so `influence` defaults to `influence run`.
///
/// Rules:
/// - `influence`                      -> `influence run`
/// - `influence -c other.json ...`    -> `influence run -c other.json ...`
/// - `influence --help/--version/-h`  -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "filter" | "index" | "manual");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_run() {
        assert_eq!(rewrite_args(argv(&["influence"])), argv(&["influence", "run"]));
    }

    #[test]
    fn leading_flag_gets_run_inserted() {
        assert_eq!(
            rewrite_args(argv(&["influence", "-c", "other.json"])),
            argv(&["influence", "run", "-c", "other.json"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["influence", "manual"])),
            argv(&["influence", "manual"])
        );
        assert_eq!(
            rewrite_args(argv(&["influence", "--help"])),
            argv(&["influence", "--help"])
        );
    }

    #[test]
    fn manual_index_matches_calculator() {
        let index = manual_index(&[80.0, 80.0, 80.0], &[10.0, 35.0, 60.0], false).unwrap();
        assert_eq!(index, 25.0);

        let rounded = manual_index(&[23.9, 25.0, 20.98], &[18.79, 16.56, 22.58], true).unwrap();
        assert_eq!(rounded, -1.3);
    }

    #[test]
    fn manual_index_rejects_length_mismatch() {
        let err = manual_index(&[1.0, 2.0], &[1.0], false).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
