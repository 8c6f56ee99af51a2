//! Analysis error types.
//!
//! Fatal conditions (short history, invalid configuration, a fully
//! overflowed ensemble) are returned as [`AnalysisError`]. Degenerate but
//! valid inputs, such as zero volatility, are ordinary data.

use tailrisk_core::types::EstimationError;
use tailrisk_engine::ConfigError;
use thiserror::Error;

/// Errors that can occur while analysing a price history.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Price history is shorter than the configured lookback.
    #[error("Insufficient data: need {required} observations, have {available}")]
    InsufficientData {
        /// Observations required by the lookback.
        required: usize,
        /// Observations available.
        available: usize,
    },

    /// Price history failed validation.
    #[error("Invalid price history: {0}")]
    InvalidHistory(String),

    /// Analysis configuration is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Simulation configuration was rejected by the engine.
    #[error("Invalid simulation configuration: {0}")]
    Simulation(#[from] ConfigError),

    /// Every simulated path produced a non-finite terminal value.
    #[error("Numeric overflow: {affected} of {total} paths are non-finite")]
    NumericOverflow {
        /// Paths with non-finite terminal values.
        affected: usize,
        /// Total paths simulated.
        total: usize,
    },

    /// No finite values to summarise.
    #[error("Distribution is empty")]
    EmptyDistribution,

    /// Parallel return and price vectors differ in length.
    #[error("Length mismatch: {returns} returns but {prices} prices")]
    LengthMismatch {
        /// Length of the return vector.
        returns: usize,
        /// Length of the price vector.
        prices: usize,
    },
}

impl AnalysisError {
    /// Returns `true` for configuration failures at either layer.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::Simulation(_))
    }
}

impl From<EstimationError> for AnalysisError {
    fn from(err: EstimationError) -> Self {
        match err {
            EstimationError::InsufficientData {
                required,
                available,
            } => Self::InsufficientData {
                required,
                available,
            },
            EstimationError::InvalidHistory(msg) => Self::InvalidHistory(msg),
            other @ (EstimationError::InvalidWindow(_) | EstimationError::InvalidDriftMode(_)) => {
                Self::InvalidConfig(other.to_string())
            }
        }
    }
}
