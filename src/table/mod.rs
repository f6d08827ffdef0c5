//! Table cleaning and filtering.
//!
//! - cell coercion to number-or-missing (`coerce`)
//! - the raw-table → clean-table filtering pass (`filter`)

pub mod coerce;
pub mod filter;

pub use coerce::*;
pub use filter::*;
