//! Error types for the simulation engine.
//!
//! Configuration is validated once at construction; simulation itself is
//! infallible. Non-finite paths are reported on the resulting
//! [`PathEnsemble`](super::PathEnsemble) instead of failing the run.

use thiserror::Error;

/// Configuration error for the path simulator.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Path count outside valid range [1, 10_000_000].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Horizon outside valid range [1, 10_000] trading days.
    #[error("Invalid horizon {0}: must be in range [1, 10_000] trading days")]
    InvalidHorizon(usize),

    /// Path matrix would exceed the cell limit.
    #[error("Simulation too large: {num_paths} paths × {horizon} days exceeds {limit} cells")]
    TooLarge {
        /// Requested path count.
        num_paths: usize,
        /// Requested horizon.
        horizon: usize,
        /// Maximum number of cells.
        limit: usize,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// Stress ladder is empty, duplicated, or lacks the 1.0 base scenario.
    #[error("Invalid stress ladder: {0}")]
    InvalidStressLadder(String),
}
