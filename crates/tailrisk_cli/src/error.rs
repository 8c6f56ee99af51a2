//! CLI error types

use tailrisk_core::types::EstimationError;
use tailrisk_risk::AnalysisError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `tailrisk` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid price data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Price history error: {0}")]
    History(#[from] EstimationError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let err = CliError::FileNotFound("prices.csv".to_string());
        assert_eq!(err.to_string(), "File not found: prices.csv");

        let err: CliError = AnalysisError::EmptyDistribution.into();
        assert!(err.to_string().starts_with("Analysis failed"));

        let err: CliError = ConfigError::InvalidLogLevel("loud".to_string()).into();
        assert!(err.to_string().contains("loud"));
    }
}
