//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - coerced cell values (`Value`)
//! - raw and cleaned table shapes (`RawTable`, `CleanRow`, `CleanTable`)
//! - region predicates (`RegionRule`, `RegionMatch`)
//! - per-region extraction outcomes (`SkipReason`)

pub mod types;

pub use types::*;
