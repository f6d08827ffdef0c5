//! Shared domain types.
//!
//! These types are intentionally kept lightweight value data so they can be:
//!
//! - derived by pure transformation (no entity is mutated after creation)
//! - compared and asserted on directly in tests
//! - exported to TSV without any intermediate representation

/// A coerced cell: either a numeric observation or an explicit gap.
///
/// Missingness is a value, not an exception: cells that are the reserved
/// missing token *and* cells that fail to parse both end up here as
/// `Missing`, and callers are forced to handle that case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    Missing,
}

impl Value {
    pub fn as_number(self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(v),
            Value::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Value::Missing)
    }
}

/// A parsed (but not yet cleaned) tab-separated table: header names plus
/// string cells, exactly as they appear after the separator repair.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// The five typed category fields produced by splitting the composite
/// metadata column.
///
/// The split arity is a hard invariant: anything other than exactly five
/// comma-separated fields aborts the whole filtering operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryKey {
    pub freq: String,
    pub indic_is: String,
    pub unit: String,
    /// Cohort-type code (e.g. an age-range code like `Y16_24`).
    pub ind_type: String,
    /// Geography code (a country code or an aggregate code).
    pub geo: String,
}

/// One cleaned row: the category key plus coerced values aligned with the
/// owning table's year columns.
#[derive(Debug, Clone)]
pub struct CleanRow {
    pub key: CategoryKey,
    pub values: Vec<Value>,
}

/// A cleaned/filtered table.
///
/// `years` is ordered most-recent-first; after trailing-missing truncation
/// the year window is fully populated across all retained rows. Callers that
/// need chronological order reverse the per-row sequences (the extractor
/// does).
#[derive(Debug, Clone)]
pub struct CleanTable {
    pub years: Vec<i32>,
    pub rows: Vec<CleanRow>,
}

impl CleanTable {
    /// Year bounds as (oldest, newest), if any year columns remain.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let newest = *self.years.first()?;
        let oldest = *self.years.last()?;
        Some((oldest, newest))
    }
}

/// How a region rule compares itself against a row's geography code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionMatch {
    /// The geography code must start with the configured code. Used for
    /// aggregate codes (`EU27_2020` and the like), which appear verbatim or
    /// with suffixed variants.
    StartsWith,
    /// The geography code must contain the configured code. Used for
    /// two-letter country codes, which can appear inside composite codes.
    Contains,
}

/// A logical region: a display name plus a geography predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRule {
    pub name: String,
    pub code: String,
    pub matching: RegionMatch,
}

impl RegionRule {
    pub fn matches(&self, geo: &str) -> bool {
        match self.matching {
            RegionMatch::StartsWith => geo.starts_with(&self.code),
            RegionMatch::Contains => geo.contains(&self.code),
        }
    }
}

/// Why a region's index was not computed.
///
/// Skips are per-region and non-fatal: the batch continues with the next
/// region, and the skip is reported in the run output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No row matched the region/cohort selection.
    MissingData,
    /// A cohort row was found but carried no numeric values.
    NoValues,
    /// The two cohort sequences differ in length.
    LengthMismatch,
}

impl SkipReason {
    pub fn describe(self) -> &'static str {
        match self {
            SkipReason::MissingData => "no rows matched the region/cohort selection",
            SkipReason::NoValues => "a cohort row carried no numeric values",
            SkipReason::LengthMismatch => "cohort series lengths differ",
        }
    }
}

/// Options governing the cleaning/filtering pass (from CLI flags).
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Cohort-type codes to keep; `None` keeps every cohort.
    pub age_groups: Option<Vec<String>>,
    /// Drop year columns strictly older than this year; `None` keeps all.
    pub min_year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_accessors() {
        assert_eq!(Value::Number(3.5).as_number(), Some(3.5));
        assert_eq!(Value::Missing.as_number(), None);
        assert!(Value::Missing.is_missing());
        assert!(!Value::Number(0.0).is_missing());
    }

    #[test]
    fn region_rule_starts_with() {
        let rule = RegionRule {
            name: "EU27_2020".to_string(),
            code: "EU27_2020".to_string(),
            matching: RegionMatch::StartsWith,
        };
        assert!(rule.matches("EU27_2020"));
        assert!(rule.matches("EU27_2020_FOR"));
        assert!(!rule.matches("XEU27_2020"));
    }

    #[test]
    fn region_rule_contains() {
        let rule = RegionRule {
            name: "LT".to_string(),
            code: "LT".to_string(),
            matching: RegionMatch::Contains,
        };
        assert!(rule.matches("LT"));
        assert!(rule.matches("XLT"));
        assert!(!rule.matches("DE"));
    }

    #[test]
    fn year_bounds_newest_first() {
        let table = CleanTable {
            years: vec![2023, 2022, 2021],
            rows: Vec::new(),
        };
        assert_eq!(table.year_bounds(), Some((2021, 2023)));
    }
}
