//! Command-line front end for tailrisk.
//!
//! Wires CSV price loading, layered configuration (file, environment,
//! arguments) and report rendering around
//! [`AnalysisFacade`](tailrisk_risk::AnalysisFacade).

pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;

pub use error::{CliError, Result};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
