//! Analysis pipeline: configuration, coordinator and result bundle.
//!
//! ```text
//! PriceHistory ─► StatisticsEstimator ─► PathSimulator (stress ladder)
//!                                              │
//!            AnalysisResult ◄─ percentiles, VaR/CVaR, risk state, reports
//! ```

mod config;
mod facade;
mod result;

pub use config::{AnalysisConfig, DriftModeSetting};
pub use facade::AnalysisFacade;
pub use result::{AnalysisResult, PriceSource};
