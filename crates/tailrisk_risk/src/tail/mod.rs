//! Tail statistics of simulated terminal distributions.
//!
//! - [`PercentileAnalyzer`]: fixed percentile tables over returns and prices
//! - [`RiskMetrics`]: VaR and CVaR at 95% and 99% confidence

mod metrics;
mod percentiles;

pub use metrics::{conditional_value_at_risk, percentile_rank, value_at_risk, RiskMetrics};
pub use percentiles::{PercentileAnalyzer, PercentileRow, PercentileTable, STANDARD_PERCENTILES};
