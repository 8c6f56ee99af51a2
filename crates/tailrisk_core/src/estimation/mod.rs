//! Historical volatility and drift estimation.
//!
//! The [`StatisticsEstimator`] turns the trailing `window` closes of a
//! [`PriceHistory`](crate::types::PriceHistory) into an annualised
//! volatility and a drift, where the drift source is an explicit
//! [`DriftMode`] rather than a silent default.

mod statistics;

pub use statistics::{
    DriftMode, HistoricalStatistics, StatisticsEstimator, DEGENERATE_VOLATILITY, MIN_WINDOW,
};
