//! Input/output helpers.
//!
//! - raw/filtered TSV reading + separator repair (`ingest`)
//! - filtered and readable TSV exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
