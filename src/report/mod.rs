//! Per-region outcomes.
//!
//! Regions are independent of each other (no region's computation reads
//! another's data), so the batch is evaluated in parallel; results keep the
//! configured region order.

use rayon::prelude::*;

use crate::domain::{CleanTable, RegionRule, SkipReason};
use crate::extract::extract_series;
use crate::index::influence_index;

pub mod format;

pub use format::*;

/// A computed index plus the first/last diagnostic values of both series.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionIndex {
    pub younger_first: f64,
    pub younger_last: f64,
    pub older_first: f64,
    pub older_last: f64,
    /// Unrounded index; rounding is applied at presentation time.
    pub index: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegionResult {
    Computed(RegionIndex),
    Skipped(SkipReason),
}

/// One region's outcome, computed or skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionOutcome {
    pub region: String,
    pub result: RegionResult,
}

/// Evaluate every configured region against the cleaned table.
///
/// Skips are collected as outcomes, never aborts: one region without data
/// must not stop the rest of the batch.
pub fn compute_region_outcomes(
    table: &CleanTable,
    regions: &[RegionRule],
    younger_code: &str,
    older_code: &str,
) -> Vec<RegionOutcome> {
    regions
        .par_iter()
        .map(|region| {
            let result = match extract_series(table, region, younger_code, older_code) {
                Ok(extraction) => RegionResult::Computed(RegionIndex {
                    younger_first: extraction.younger[0],
                    younger_last: extraction.younger[extraction.younger.len() - 1],
                    older_first: extraction.older[0],
                    older_last: extraction.older[extraction.older.len() - 1],
                    index: influence_index(&extraction.younger, &extraction.older),
                }),
                Err(reason) => RegionResult::Skipped(reason),
            };
            RegionOutcome {
                region: region.name.clone(),
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryKey, CleanRow, RegionMatch, Value};

    fn row(ind_type: &str, geo: &str, values: &[f64]) -> CleanRow {
        CleanRow {
            key: CategoryKey {
                freq: "A".to_string(),
                indic_is: "I_IUIF".to_string(),
                unit: "PC_IND".to_string(),
                ind_type: ind_type.to_string(),
                geo: geo.to_string(),
            },
            values: values.iter().map(|&v| Value::Number(v)).collect(),
        }
    }

    #[test]
    fn outcomes_keep_region_order_and_mix_skips() {
        // Values are newest-first, so chronological series rise here.
        let table = CleanTable {
            years: vec![2023, 2022, 2021],
            rows: vec![
                row("Y16_24", "EU27_2020", &[80.0, 80.0, 80.0]),
                row("Y25_64", "EU27_2020", &[60.0, 35.0, 10.0]),
            ],
        };
        let regions = vec![
            RegionRule {
                name: "EU27_2020".to_string(),
                code: "EU27_2020".to_string(),
                matching: RegionMatch::StartsWith,
            },
            RegionRule {
                name: "LT".to_string(),
                code: "LT".to_string(),
                matching: RegionMatch::Contains,
            },
        ];

        let outcomes = compute_region_outcomes(&table, &regions, "Y16_24", "Y25_64");
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].region, "EU27_2020");
        match &outcomes[0].result {
            RegionResult::Computed(idx) => {
                assert_eq!(idx.younger_first, 80.0);
                assert_eq!(idx.older_first, 10.0);
                assert_eq!(idx.older_last, 60.0);
                assert_eq!(idx.index, 25.0);
            }
            RegionResult::Skipped(_) => panic!("expected computed outcome"),
        }
        assert_eq!(
            outcomes[1].result,
            RegionResult::Skipped(SkipReason::MissingData)
        );
    }
}
