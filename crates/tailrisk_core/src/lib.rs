//! # tailrisk_core: Foundation Layer
//!
//! ## Layer 1 (Foundation) Role
//!
//! tailrisk_core is the bottom layer of the tailrisk workspace, providing:
//! - Time types: `Date` (`types::time`)
//! - Price history container with construction-time validation (`types::history`)
//! - Error types: `EstimationError`, `DateError` (`types::error`)
//! - Sample statistics and empirical quantiles (`math::stats`)
//! - Historical volatility and drift estimation (`estimation`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other tailrisk_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - tracing: Structured diagnostics
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use tailrisk_core::estimation::{DriftMode, StatisticsEstimator};
//! use tailrisk_core::types::{Date, PriceHistory};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let closes = [100.0, 101.0, 99.5, 102.0, 103.5, 101.0];
//! let history = PriceHistory::from_closes(start, &closes).unwrap();
//!
//! let estimator = StatisticsEstimator::new(5, DriftMode::Historical).unwrap();
//! let stats = estimator.estimate(&history).unwrap();
//! assert!(stats.volatility > 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for Date, PriceHistory and HistoricalStatistics

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod estimation;
pub mod math;
pub mod types;
