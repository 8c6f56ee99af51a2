//! # tailrisk_risk (L3: Analysis)
//!
//! Tail-risk analysis of simulated forward price distributions.
//!
//! This crate provides:
//! - Fixed-set percentile tables and VaR/CVaR at 95% and 99% (`tail`)
//! - The four-factor risk-state score and its regime label (`state`)
//! - Stress tail shift, capital at risk, target-price and strike reports,
//!   per-day price bands (`reports`)
//! - The analysis request, coordinator and immutable result (`analysis`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           tailrisk_risk (L3)            │
//! ├─────────────────────────────────────────┤
//! │  tail/      - percentiles, VaR, CVaR    │
//! │  state/     - risk-state scorer         │
//! │  reports/   - stress, capital, target   │
//! │  analysis/  - config, facade, result    │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │          tailrisk_engine (L2)           │
//! │  Student-t / EWMA / jump simulator      │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           tailrisk_core (L1)            │
//! │  price history, statistics estimator    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use tailrisk_core::types::{Date, PriceHistory};
//! use tailrisk_risk::analysis::{AnalysisConfig, AnalysisFacade, DriftModeSetting};
//!
//! let closes: Vec<f64> = (0..120).map(|i| 50.0 * (1.0 + 0.01 * (i as f64 * 0.7).cos())).collect();
//! let history = PriceHistory::from_closes(Date::from_ymd(2024, 1, 2).unwrap(), &closes).unwrap();
//!
//! let config = AnalysisConfig {
//!     historical_window: 100,
//!     days_to_simulate: 30,
//!     num_simulations: 2_000,
//!     drift_mode: DriftModeSetting::RiskFreeProxy,
//!     risk_free_rate: Some(0.04),
//!     target_price: Some(48.0),
//!     ..AnalysisConfig::default()
//! };
//!
//! let result = AnalysisFacade::default().run(&config, &history).unwrap();
//! let metrics = result.metrics();
//! assert!(metrics.cvar95 <= metrics.var95);
//! assert!(result.target().is_some());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialisation for tables, metrics, reports and `AnalysisResult`,
//!   deserialisation for `AnalysisConfig`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analysis;
pub mod error;
pub mod reports;
pub mod state;
pub mod tail;

pub use analysis::{AnalysisConfig, AnalysisFacade, AnalysisResult, DriftModeSetting, PriceSource};
pub use error::AnalysisError;
