//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction and parsing
//! - `EstimationError`: Errors from price-history validation and
//!   volatility/drift estimation

use std::fmt;
use thiserror::Error;

/// Date-related errors.
///
/// Provides structured error handling for date construction and parsing
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
///
/// # Examples
/// ```
/// use tailrisk_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    ParseError(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::InvalidDate { year, month, day } => {
                write!(f, "Invalid date: {}-{}-{}", year, month, day)
            }
            DateError::ParseError(msg) => write!(f, "Date parse error: {}", msg),
        }
    }
}

impl std::error::Error for DateError {}

/// Errors raised while validating a price history or estimating
/// volatility and drift from it.
///
/// A flat (zero-variance) history is *not* an error: it is reported as
/// `volatility == 0.0` on the resulting statistics.
///
/// # Examples
/// ```
/// use tailrisk_core::types::EstimationError;
///
/// let err = EstimationError::InsufficientData { required: 252, available: 40 };
/// assert_eq!(
///     format!("{}", err),
///     "Insufficient data: need 252 observations, have 40"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimationError {
    /// The history holds fewer observations than the lookback requires.
    #[error("Insufficient data: need {required} observations, have {available}")]
    InsufficientData {
        /// Number of observations the lookback requires
        required: usize,
        /// Number of observations actually available
        available: usize,
    },

    /// The history violates its ordering or positivity invariants.
    #[error("Invalid price history: {0}")]
    InvalidHistory(String),

    /// Lookback window is too short to produce a sample standard deviation.
    #[error("Invalid lookback window {0}: must be at least 3 observations")]
    InvalidWindow(usize),

    /// Drift mode parameters are unusable (e.g. non-finite proxy rate).
    #[error("Invalid drift mode: {0}")]
    InvalidDriftMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_error_display() {
        let err = DateError::ParseError("bad".to_string());
        assert_eq!(format!("{}", err), "Date parse error: bad");
    }

    #[test]
    fn test_estimation_error_display() {
        let err = EstimationError::InvalidHistory("close must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid price history: close must be positive"
        );

        let err = EstimationError::InvalidWindow(1);
        assert!(err.to_string().contains("at least 3"));

        let err = EstimationError::InvalidDriftMode("rate is NaN".to_string());
        assert!(err.to_string().contains("rate is NaN"));
    }
}
