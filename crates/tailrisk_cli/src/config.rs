//! CLI configuration management
//!
//! Loads an analysis request from a TOML file, environment variables and
//! command-line arguments.
//!
//! ```toml
//! log_level = "debug"
//!
//! [analysis]
//! symbol = "SPY"
//! days_to_simulate = 60
//! stress_multipliers = [1.0, 1.5, 2.0]
//! ```

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use tailrisk_risk::{AnalysisConfig, AnalysisError};
use thiserror::Error;

/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "TAILRISK_LOG_LEVEL";
/// Environment variable overriding the master seed.
pub const ENV_SEED: &str = "TAILRISK_SEED";
/// Environment variable overriding the paths per scenario.
pub const ENV_NUM_SIMULATIONS: &str = "TAILRISK_NUM_SIMULATIONS";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {var}={value} is invalid: {reason}")]
    EnvError {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Application configuration: logging plus one analysis request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Analysis request
    pub analysis: AnalysisConfig,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl AppConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.analysis.seed = parse_env(ENV_SEED, &seed)?;
        }
        if let Some(count) = lookup(ENV_NUM_SIMULATIONS) {
            self.analysis.num_simulations = parse_env(ENV_NUM_SIMULATIONS, &count)?;
        }
        Ok(())
    }

    /// Validate the analysis request
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(symbol) = &cli.symbol {
            self.analysis.symbol = symbol.clone();
        }
        if let Some(price) = cli.target_price {
            self.analysis.target_price = Some(price);
        }
        if let Some(price) = cli.custom_price {
            self.analysis.custom_price = Some(price);
        }
        if let Some(days) = cli.days_to_simulate {
            self.analysis.days_to_simulate = days;
        }
        if let Some(count) = cli.num_simulations {
            self.analysis.num_simulations = count;
        }
        if let Some(seed) = cli.seed {
            self.analysis.seed = seed;
        }
    }
}

fn parse_env<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Symbol override
    pub symbol: Option<String>,
    /// Target price to locate in the distribution
    pub target_price: Option<f64>,
    /// Starting price override
    pub custom_price: Option<f64>,
    /// Horizon override
    pub days_to_simulate: Option<usize>,
    /// Paths per scenario override
    pub num_simulations: Option<usize>,
    /// Master seed override
    pub seed: Option<u64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<AppConfig, ConfigError> {
    build_config_with(cli, |var| std::env::var(var).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    config.apply_overrides(lookup)?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tailrisk_risk::DriftModeSetting;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.analysis, AnalysisConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(format!("{}", LogLevel::Error), "error");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"

            [analysis]
            symbol = "SPY"
            starting_capital = 5000.0
            days_to_simulate = 60
            num_simulations = 2000
            historical_window = 756
            drift_mode = "risk_free_proxy"
            risk_free_rate = 0.043
            stress_multipliers = [1.0, 1.5, 2.0]
            target_price = 480.0
        "#;

        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.analysis.symbol, "SPY");
        assert_eq!(config.analysis.starting_capital, 5000.0);
        assert_eq!(config.analysis.days_to_simulate, 60);
        assert_eq!(config.analysis.num_simulations, 2000);
        assert_eq!(config.analysis.historical_window, 756);
        assert_eq!(config.analysis.drift_mode, DriftModeSetting::RiskFreeProxy);
        assert_eq!(config.analysis.risk_free_rate, Some(0.043));
        assert_eq!(config.analysis.stress_multipliers, vec![1.0, 1.5, 2.0]);
        assert_eq!(config.analysis.target_price, Some(480.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config = AppConfig::from_toml_str("[analysis]\nseed = 7\n").unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.analysis.seed, 7);
        assert_eq!(config.analysis.num_simulations, 10_000);
        assert_eq!(config.analysis.jump_prob, 0.02);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(matches!(
            AppConfig::from_toml_str("log_level = \"loud\""),
            Err(ConfigError::FileError(_))
        ));
        assert!(matches!(
            AppConfig::from_toml_str("[analysis]\ndrift_mode = \"neutral\""),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(env(&[
                (ENV_LOG_LEVEL, "warn"),
                (ENV_SEED, "1234"),
                (ENV_NUM_SIMULATIONS, " 500 "),
            ]))
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.analysis.seed, 1234);
        assert_eq!(config.analysis.num_simulations, 500);
    }

    #[test]
    fn test_invalid_env_value_names_variable() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(env(&[(ENV_SEED, "forty-two")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_SEED));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = AppConfig::default();
        let cli = CliArgs {
            log_level: Some(LogLevel::Trace),
            symbol: Some("QQQ".to_string()),
            target_price: Some(350.0),
            seed: Some(9),
            ..CliArgs::default()
        };
        config.merge_with_cli(&cli);

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.analysis.symbol, "QQQ");
        assert_eq!(config.analysis.target_price, Some(350.0));
        assert_eq!(config.analysis.seed, 9);
        assert_eq!(config.analysis.num_simulations, 10_000);
    }

    #[test]
    fn test_build_config_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_level = \"error\"\n[analysis]\nseed = 1\nnum_simulations = 100\nsymbol = \"FILE\""
        )
        .unwrap();

        let cli = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            seed: Some(3),
            ..CliArgs::default()
        };
        let config =
            build_config_with(&cli, env(&[(ENV_SEED, "2"), (ENV_NUM_SIMULATIONS, "200")])).unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.analysis.symbol, "FILE");
        assert_eq!(config.analysis.num_simulations, 200);
        assert_eq!(config.analysis.seed, 3);
    }

    #[test]
    fn test_build_config_validates_result() {
        let cli = CliArgs {
            num_simulations: Some(0),
            ..CliArgs::default()
        };
        assert!(matches!(
            build_config_with(&cli, env(&[])),
            Err(ConfigError::Analysis(_))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/tailrisk.toml")),
            ..CliArgs::default()
        };
        assert!(matches!(
            build_config_with(&cli, env(&[])),
            Err(ConfigError::FileError(_))
        ));
    }
}
