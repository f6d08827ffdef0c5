//! JSON configuration loading.
//!
//! The configuration is an explicit value passed into each component, never
//! ambient/global state. It describes the *static* shape of the input table
//! (column names, filter targets, region codes, cohort labels) and the file
//! layout; everything run-specific (cohort pair, minimum year) comes from the
//! CLI.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{RegionMatch, RegionRule};
use crate::error::AppError;

/// Default file name of the raw statistics export inside `input_folder`.
pub const DEFAULT_INPUT_FILE: &str = "estat_isoc_ci_ac_i.tsv";

/// Physical column names, keyed by their logical role.
///
/// `metadata` is the composite column holding the comma-joined five-field
/// key; the other five are the names those fields get after the split (and
/// the names expected when re-reading a filtered file).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Columns {
    pub metadata: String,
    pub freq: String,
    pub indic_is: String,
    pub unit: String,
    pub ind_type: String,
    pub geo: String,
}

impl Columns {
    /// Category column names in their fixed split order.
    pub fn category_names(&self) -> [&str; 5] {
        [
            &self.freq,
            &self.indic_is,
            &self.unit,
            &self.ind_type,
            &self.geo,
        ]
    }
}

/// The full run configuration, loaded from `config.json`.
///
/// Unknown fields are rejected so a typo in the file surfaces as an error
/// instead of silently falling back to a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Logical region names mapped to geography codes/substrings.
    pub countries: BTreeMap<String, String>,
    pub columns: Columns,
    /// Target value of the indicator category field.
    pub indic_is_value: String,
    /// Target value of the unit category field.
    pub unit_value: String,
    /// Cohort-type codes mapped to display labels.
    pub age_groups: BTreeMap<String, String>,
    pub input_folder: String,
    pub output_folder: String,
    /// File name of the filtered table inside `output_folder`.
    pub filtered_file: String,
}

impl Config {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Config, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::new(
                2,
                format!("Failed to open config '{}': {e}", path.display()),
            )
        })?;
        let config: Config = serde_json::from_reader(file)
            .map_err(|e| AppError::new(2, format!("Invalid config '{}': {e}", path.display())))?;
        Ok(config)
    }

    /// Derive the ordered region list from `countries`.
    ///
    /// Aggregate codes (longer than two characters, e.g. `EU27_2020`) are
    /// matched by prefix; two-letter country codes are matched by substring
    /// so they also catch composite geography codes.
    pub fn region_rules(&self) -> Vec<RegionRule> {
        self.countries
            .iter()
            .map(|(name, code)| RegionRule {
                name: name.clone(),
                code: code.clone(),
                matching: if code.chars().count() > 2 {
                    RegionMatch::StartsWith
                } else {
                    RegionMatch::Contains
                },
            })
            .collect()
    }

    /// Display label for a cohort-type code, falling back to the code itself.
    pub fn cohort_label<'a>(&'a self, code: &'a str) -> &'a str {
        self.age_groups.get(code).map(String::as_str).unwrap_or(code)
    }

    /// Path of the raw input table (`input` overrides the default name).
    pub fn input_path(&self, input: Option<&Path>) -> PathBuf {
        match input {
            Some(path) => path.to_path_buf(),
            None => Path::new(&self.input_folder).join(DEFAULT_INPUT_FILE),
        }
    }

    /// Path of the filtered table inside `output_folder`.
    pub fn filtered_path(&self) -> PathBuf {
        Path::new(&self.output_folder).join(&self.filtered_file)
    }

    /// Path of a per-region readable export inside `output_folder`.
    pub fn readable_path(&self, region_name: &str) -> PathBuf {
        Path::new(&self.output_folder).join(format!("readable_{region_name}.tsv"))
    }
}
