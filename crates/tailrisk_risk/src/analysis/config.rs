//! Analysis request configuration.

use tailrisk_core::estimation::DriftMode;

use crate::error::AnalysisError;

/// Drift source as named in configuration files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DriftModeSetting {
    /// Annualised sample mean of trailing returns.
    #[default]
    Historical,
    /// `risk_free_rate` used as drift.
    RiskFreeProxy,
}

impl std::str::FromStr for DriftModeSetting {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "historical" => Ok(Self::Historical),
            "risk_free_proxy" | "risk-free-proxy" => Ok(Self::RiskFreeProxy),
            other => Err(AnalysisError::InvalidConfig(format!(
                "unknown drift mode '{}': expected 'historical' or 'risk_free_proxy'",
                other
            ))),
        }
    }
}

/// Full analysis request.
///
/// All fields have defaults (see [`Default`]); [`validate`](Self::validate)
/// rejects out-of-range values before any work starts.
///
/// | Field | Default |
/// |-------|---------|
/// | `symbol` | `"UNKNOWN"` |
/// | `starting_capital` | 1000 |
/// | `days_to_simulate` | 90 |
/// | `num_simulations` | 10 000 |
/// | `historical_window` | 1512 (six trading years) |
/// | `max_tolerable_loss_pct` | 14 |
/// | `drift_mode` | historical |
/// | `jump_prob` / `jump_magnitude` | 0.02 / −0.04 |
/// | `degrees_of_freedom` | 5 |
/// | `ewma_decay` | 0.94 |
/// | `stress_multipliers` | [1.0, 1.25, 1.5] |
/// | `seed` | 42 |
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisConfig {
    /// Instrument identifier, used for labelling only.
    pub symbol: String,
    /// Capital allocated, for currency-denominated risk.
    pub starting_capital: f64,
    /// Horizon in trading days.
    pub days_to_simulate: usize,
    /// Paths per scenario.
    pub num_simulations: usize,
    /// Trailing observations used for statistics.
    pub historical_window: usize,
    /// Largest acceptable horizon loss, in percent.
    pub max_tolerable_loss_pct: f64,
    /// Starting-price override for backtests.
    pub custom_price: Option<f64>,
    /// Drift source.
    pub drift_mode: DriftModeSetting,
    /// Rate used when `drift_mode` is `RiskFreeProxy`.
    pub risk_free_rate: Option<f64>,
    /// Daily jump probability.
    pub jump_prob: f64,
    /// Additive jump return.
    pub jump_magnitude: f64,
    /// Student-t degrees of freedom.
    pub degrees_of_freedom: f64,
    /// EWMA decay λ.
    pub ewma_decay: f64,
    /// Volatility multipliers; must include 1.0.
    pub stress_multipliers: Vec<f64>,
    /// Master seed.
    pub seed: u64,
    /// Optional price to locate in the base distribution.
    pub target_price: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            symbol: "UNKNOWN".to_string(),
            starting_capital: 1_000.0,
            days_to_simulate: 90,
            num_simulations: 10_000,
            historical_window: 252 * 6,
            max_tolerable_loss_pct: 14.0,
            custom_price: None,
            drift_mode: DriftModeSetting::Historical,
            risk_free_rate: None,
            jump_prob: 0.02,
            jump_magnitude: -0.04,
            degrees_of_freedom: 5.0,
            ewma_decay: 0.94,
            stress_multipliers: vec![1.0, 1.25, 1.5],
            seed: 42,
            target_price: None,
        }
    }
}

impl AnalysisConfig {
    /// Resolves the drift setting into an estimator [`DriftMode`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when proxy mode is selected without a finite
    /// `risk_free_rate`.
    pub fn drift(&self) -> Result<DriftMode, AnalysisError> {
        match self.drift_mode {
            DriftModeSetting::Historical => Ok(DriftMode::Historical),
            DriftModeSetting::RiskFreeProxy => match self.risk_free_rate {
                Some(rate) if rate.is_finite() => Ok(DriftMode::RiskFreeProxy { rate }),
                Some(rate) => Err(AnalysisError::InvalidConfig(format!(
                    "risk_free_rate must be finite, got {}",
                    rate
                ))),
                None => Err(AnalysisError::InvalidConfig(
                    "risk_free_rate is required when drift_mode is risk_free_proxy".to_string(),
                )),
            },
        }
    }

    /// Validates every field.
    ///
    /// Range checks on the simulation parameters are repeated by the
    /// engine; failing here reports them with the configuration's field
    /// names.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        fn positive(name: &str, value: f64) -> Result<(), AnalysisError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(AnalysisError::InvalidConfig(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )))
            }
        }

        positive("starting_capital", self.starting_capital)?;
        positive("max_tolerable_loss_pct", self.max_tolerable_loss_pct)?;
        if let Some(price) = self.custom_price {
            positive("custom_price", price)?;
        }
        if let Some(price) = self.target_price {
            positive("target_price", price)?;
        }
        if self.days_to_simulate == 0 {
            return Err(AnalysisError::InvalidConfig(
                "days_to_simulate must be at least 1".to_string(),
            ));
        }
        if self.num_simulations == 0 {
            return Err(AnalysisError::InvalidConfig(
                "num_simulations must be at least 1".to_string(),
            ));
        }
        if self.historical_window < 3 {
            return Err(AnalysisError::InvalidConfig(format!(
                "historical_window must be at least 3, got {}",
                self.historical_window
            )));
        }
        if !(0.0..=1.0).contains(&self.jump_prob) {
            return Err(AnalysisError::InvalidConfig(format!(
                "jump_prob must lie in [0, 1], got {}",
                self.jump_prob
            )));
        }
        if !self.jump_magnitude.is_finite() {
            return Err(AnalysisError::InvalidConfig(format!(
                "jump_magnitude must be finite, got {}",
                self.jump_magnitude
            )));
        }
        if !(self.degrees_of_freedom.is_finite() && self.degrees_of_freedom > 2.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "degrees_of_freedom must be greater than 2, got {}",
                self.degrees_of_freedom
            )));
        }
        if !(self.ewma_decay > 0.0 && self.ewma_decay < 1.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "ewma_decay must lie strictly between 0 and 1, got {}",
                self.ewma_decay
            )));
        }
        if self.stress_multipliers.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "stress_multipliers must not be empty".to_string(),
            ));
        }
        for &m in &self.stress_multipliers {
            positive("stress multiplier", m)?;
        }
        self.drift()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.historical_window, 1512);
        assert_eq!(config.drift().unwrap(), DriftMode::Historical);
    }

    #[test]
    fn test_risk_free_proxy_requires_rate() {
        let mut config = AnalysisConfig {
            drift_mode: DriftModeSetting::RiskFreeProxy,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().unwrap_err().is_invalid_config());

        config.risk_free_rate = Some(0.043);
        assert_eq!(
            config.drift().unwrap(),
            DriftMode::RiskFreeProxy { rate: 0.043 }
        );
    }

    #[test]
    fn test_rejects_out_of_range_fields() {
        let cases = [
            AnalysisConfig {
                degrees_of_freedom: 2.0,
                ..AnalysisConfig::default()
            },
            AnalysisConfig {
                days_to_simulate: 0,
                ..AnalysisConfig::default()
            },
            AnalysisConfig {
                num_simulations: 0,
                ..AnalysisConfig::default()
            },
            AnalysisConfig {
                ewma_decay: 1.0,
                ..AnalysisConfig::default()
            },
            AnalysisConfig {
                jump_prob: -0.1,
                ..AnalysisConfig::default()
            },
            AnalysisConfig {
                custom_price: Some(-5.0),
                ..AnalysisConfig::default()
            },
            AnalysisConfig {
                starting_capital: 0.0,
                ..AnalysisConfig::default()
            },
            AnalysisConfig {
                stress_multipliers: vec![],
                ..AnalysisConfig::default()
            },
            AnalysisConfig {
                historical_window: 2,
                ..AnalysisConfig::default()
            },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(AnalysisError::InvalidConfig(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_drift_mode_from_str() {
        assert_eq!(
            "Historical".parse::<DriftModeSetting>().unwrap(),
            DriftModeSetting::Historical
        );
        assert_eq!(
            "risk_free_proxy".parse::<DriftModeSetting>().unwrap(),
            DriftModeSetting::RiskFreeProxy
        );
        assert!("neutral".parse::<DriftModeSetting>().is_err());
    }
}
