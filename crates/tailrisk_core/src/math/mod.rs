//! Mathematical utilities shared across the workspace.
//!
//! - [`stats`]: sample moments, simple returns, empirical quantiles and
//!   clamped normalisation

pub mod stats;
