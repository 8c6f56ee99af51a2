//! Derived reports over the simulated distributions.
//!
//! Each report is a pure function of data already held by an analysis
//! result, returned as plain numbers so that rendering and export stay
//! outside the library.

mod bands;
mod capital;
mod stress;
mod target;

pub use bands::{PathBands, BAND_PERCENTILES};
pub use capital::CapitalAtRisk;
pub use stress::{tail_shift_table, TailShiftRow};
pub use target::{strike_guide, PriceBoundary, PriceZone, StrikeGuideRow, TargetPriceAnalysis};
