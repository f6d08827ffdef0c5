//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the cleaning/extraction/index code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::config::Config;
use crate::domain::FilterOptions;
use crate::index::round1;
use crate::report::{RegionOutcome, RegionResult};
use crate::table::FilterOutcome;

/// Format the run summary: filter targets, cohorts, and row/year accounting.
pub fn format_run_summary(
    outcome: &FilterOutcome,
    config: &Config,
    options: &FilterOptions,
    younger_code: &str,
    older_code: &str,
) -> String {
    let mut out = String::new();

    out.push_str("=== influence - Cohort Trend Influence ===\n");
    out.push_str(&format!(
        "Targets: indicator={} | unit={}\n",
        config.indic_is_value, config.unit_value
    ));
    out.push_str(&format!(
        "Cohorts: {} ({}) vs {} ({})\n",
        younger_code,
        config.cohort_label(younger_code),
        older_code,
        config.cohort_label(older_code),
    ));
    if let Some(min_year) = options.min_year {
        out.push_str(&format!("Minimum year: {min_year}\n"));
    }

    out.push_str(&format!(
        "Rows: read={} | kept={}\n",
        outcome.rows_read, outcome.rows_kept
    ));
    match outcome.table.year_bounds() {
        Some((oldest, newest)) => out.push_str(&format!(
            "Years: seen={} | window=[{oldest}, {newest}] ({} columns, newest first)\n",
            outcome.years_seen,
            outcome.table.years.len()
        )),
        None => out.push_str(&format!(
            "Years: seen={} | window=empty\n",
            outcome.years_seen
        )),
    }
    if let Some(year) = outcome.truncated_at {
        out.push_str(&format!(
            "Truncated at {year}: a retained row is missing that year\n"
        ));
    }
    out.push('\n');

    out
}

/// Format the per-region blocks: diagnostics + index, or a skip warning.
pub fn format_region_outcomes(
    outcomes: &[RegionOutcome],
    config: &Config,
    younger_code: &str,
    older_code: &str,
    round: bool,
) -> String {
    let mut out = String::new();

    for outcome in outcomes {
        match &outcome.result {
            RegionResult::Computed(idx) => {
                out.push_str(&format!("{}:\n", outcome.region));
                out.push_str(&format!(
                    "  {}: first={} last={}\n",
                    config.cohort_label(younger_code),
                    fmt_number(idx.younger_first),
                    fmt_number(idx.younger_last),
                ));
                out.push_str(&format!(
                    "  {}: first={} last={}\n",
                    config.cohort_label(older_code),
                    fmt_number(idx.older_first),
                    fmt_number(idx.older_last),
                ));
                let index = if round { round1(idx.index) } else { idx.index };
                out.push_str(&format!("  influence index: {}\n", fmt_number(index)));
            }
            RegionResult::Skipped(reason) => {
                out.push_str(&format!(
                    "(skipped {}) {}\n",
                    outcome.region,
                    reason.describe()
                ));
            }
        }
        out.push('\n');
    }

    out
}

fn fmt_number(v: f64) -> String {
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::config::Columns;
    use crate::domain::{CleanTable, SkipReason};
    use crate::report::RegionIndex;

    fn test_config() -> Config {
        Config {
            countries: BTreeMap::from([("LT".to_string(), "LT".to_string())]),
            columns: Columns {
                metadata: "meta".to_string(),
                freq: "freq".to_string(),
                indic_is: "indic_is".to_string(),
                unit: "unit".to_string(),
                ind_type: "ind_type".to_string(),
                geo: "geo".to_string(),
            },
            indic_is_value: "I_IUIF".to_string(),
            unit_value: "PC_IND".to_string(),
            age_groups: BTreeMap::from([
                ("Y16_24".to_string(), "16-24".to_string()),
                ("Y25_64".to_string(), "25-64".to_string()),
            ]),
            input_folder: "data".to_string(),
            output_folder: "out".to_string(),
            filtered_file: "filtered_data.tsv".to_string(),
        }
    }

    #[test]
    fn summary_reports_counts_and_window() {
        let outcome = FilterOutcome {
            table: CleanTable {
                years: vec![2023, 2022, 2021],
                rows: Vec::new(),
            },
            rows_read: 120,
            rows_kept: 4,
            years_seen: 9,
            truncated_at: Some(2020),
        };
        let options = FilterOptions {
            age_groups: None,
            min_year: Some(2015),
        };
        let text = format_run_summary(&outcome, &test_config(), &options, "Y16_24", "Y25_64");
        assert!(text.contains("read=120 | kept=4"));
        assert!(text.contains("window=[2021, 2023]"));
        assert!(text.contains("Minimum year: 2015"));
        assert!(text.contains("Truncated at 2020"));
        assert!(text.contains("Y16_24 (16-24)"));
    }

    #[test]
    fn outcomes_round_only_when_asked() {
        let outcomes = vec![RegionOutcome {
            region: "LT".to_string(),
            result: RegionResult::Computed(RegionIndex {
                younger_first: 87.0,
                younger_last: 96.0,
                older_first: 60.0,
                older_last: 85.0,
                index: 1.2345,
            }),
        }];
        let rounded =
            format_region_outcomes(&outcomes, &test_config(), "Y16_24", "Y25_64", true);
        assert!(rounded.contains("influence index: 1.2\n"));

        let exact = format_region_outcomes(&outcomes, &test_config(), "Y16_24", "Y25_64", false);
        assert!(exact.contains("influence index: 1.2345\n"));
        assert!(exact.contains("16-24: first=87 last=96"));
    }

    #[test]
    fn skipped_region_gets_warning_line() {
        let outcomes = vec![RegionOutcome {
            region: "LT".to_string(),
            result: RegionResult::Skipped(SkipReason::LengthMismatch),
        }];
        let text = format_region_outcomes(&outcomes, &test_config(), "Y16_24", "Y25_64", true);
        assert!(text.contains("(skipped LT) cohort series lengths differ"));
    }
}
