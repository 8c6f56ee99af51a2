//! Core time, price-history and error types.
//!
//! This module provides:
//! - `time`: [`Date`] wrapper and trading-calendar constants
//! - `history`: [`PriceHistory`], an immutable date-ordered close series
//! - `error`: Structured error types for dates and estimation
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod history;
pub mod time;

pub use error::{DateError, EstimationError};
pub use history::{PriceHistory, PricePoint};
pub use time::{Date, TRADING_DAYS_PER_YEAR};
