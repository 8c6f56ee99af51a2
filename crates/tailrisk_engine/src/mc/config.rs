//! Path simulation configuration.
//!
//! This module provides [`SimulationConfig`] and its builder. Every field
//! is validated at build time so the simulator itself never fails.

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum horizon in trading days.
pub const MAX_HORIZON: usize = 10_000;

/// Maximum number of cells (`num_paths × horizon`) in the price matrix.
pub const MAX_CELLS: usize = 200_000_000;

const DEFAULT_DEGREES_OF_FREEDOM: f64 = 5.0;
const DEFAULT_EWMA_DECAY: f64 = 0.94;
const DEFAULT_JUMP_PROBABILITY: f64 = 0.02;
const DEFAULT_JUMP_MAGNITUDE: f64 = -0.04;
const DEFAULT_SEED: u64 = 42;

/// Path simulation configuration.
///
/// Immutable configuration specifying the return model and ensemble size.
/// Use [`SimulationConfigBuilder`] to construct instances.
///
/// # Model Parameters
///
/// - `drift`, `volatility`: annualised, 252 trading days per year
/// - `degrees_of_freedom`: Student-t tail thickness, must exceed 2 so the
///   shocks can be rescaled to unit variance
/// - `ewma_decay`: persistence λ of the volatility recursion, in (0, 1)
/// - `jump_probability`, `jump_magnitude`: daily Bernoulli jump overlay;
///   a magnitude of `-0.04` adds a −4% return on jump days
///
/// # Examples
///
/// ```rust
/// use tailrisk_engine::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .starting_price(100.0)
///     .drift(0.04)
///     .volatility(0.30)
///     .horizon(90)
///     .num_paths(10_000)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.horizon(), 90);
/// assert_eq!(config.seed(), 42);
/// assert_eq!(config.degrees_of_freedom(), 5.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    starting_price: f64,
    drift: f64,
    volatility: f64,
    horizon: usize,
    num_paths: usize,
    degrees_of_freedom: f64,
    ewma_decay: f64,
    jump_probability: f64,
    jump_magnitude: f64,
    seed: u64,
}

impl SimulationConfig {
    /// Creates a new builder for configuration.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the price every path starts from.
    #[inline]
    pub fn starting_price(&self) -> f64 {
        self.starting_price
    }

    /// Returns the annual drift.
    #[inline]
    pub fn drift(&self) -> f64 {
        self.drift
    }

    /// Returns the annualised base volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the horizon in trading days.
    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Returns the number of paths.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Returns the Student-t degrees of freedom.
    #[inline]
    pub fn degrees_of_freedom(&self) -> f64 {
        self.degrees_of_freedom
    }

    /// Returns the EWMA decay λ.
    #[inline]
    pub fn ewma_decay(&self) -> f64 {
        self.ewma_decay
    }

    /// Returns the daily jump probability.
    #[inline]
    pub fn jump_probability(&self) -> f64 {
        self.jump_probability
    }

    /// Returns the additive jump return.
    #[inline]
    pub fn jump_magnitude(&self) -> f64 {
        self.jump_magnitude
    }

    /// Returns the master seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns a copy with the base volatility replaced.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` if `volatility` is negative
    /// or non-finite.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, ConfigError> {
        let config = Self {
            volatility,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `num_paths` is 0 or greater than 10,000,000
    /// - `horizon` is 0 or greater than 10,000
    /// - `num_paths × horizon` exceeds [`MAX_CELLS`]
    /// - any model parameter is out of its domain
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_paths == 0 || self.num_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.num_paths));
        }
        if self.horizon == 0 || self.horizon > MAX_HORIZON {
            return Err(ConfigError::InvalidHorizon(self.horizon));
        }
        if self.num_paths.saturating_mul(self.horizon) > MAX_CELLS {
            return Err(ConfigError::TooLarge {
                num_paths: self.num_paths,
                horizon: self.horizon,
                limit: MAX_CELLS,
            });
        }
        if !(self.starting_price.is_finite() && self.starting_price > 0.0) {
            return Err(invalid(
                "starting_price",
                format!("must be finite and positive, got {}", self.starting_price),
            ));
        }
        if !self.drift.is_finite() {
            return Err(invalid("drift", format!("must be finite, got {}", self.drift)));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(invalid(
                "volatility",
                format!("must be finite and non-negative, got {}", self.volatility),
            ));
        }
        if !(self.degrees_of_freedom.is_finite() && self.degrees_of_freedom > 2.0) {
            return Err(invalid(
                "degrees_of_freedom",
                format!("must be finite and greater than 2, got {}", self.degrees_of_freedom),
            ));
        }
        if !(self.ewma_decay > 0.0 && self.ewma_decay < 1.0) {
            return Err(invalid(
                "ewma_decay",
                format!("must lie strictly between 0 and 1, got {}", self.ewma_decay),
            ));
        }
        if !(0.0..=1.0).contains(&self.jump_probability) {
            return Err(invalid(
                "jump_probability",
                format!("must lie in [0, 1], got {}", self.jump_probability),
            ));
        }
        if !self.jump_magnitude.is_finite() {
            return Err(invalid(
                "jump_magnitude",
                format!("must be finite, got {}", self.jump_magnitude),
            ));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, value: String) -> ConfigError {
    ConfigError::InvalidParameter { name, value }
}

/// Builder for [`SimulationConfig`].
///
/// `starting_price`, `volatility`, `horizon` and `num_paths` are required;
/// everything else falls back to the defaults (drift 0, df 5, λ 0.94,
/// jump probability 0.02, jump magnitude −0.04, seed 42).
///
/// # Examples
///
/// ```rust
/// use tailrisk_engine::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .starting_price(50.0)
///     .volatility(0.2)
///     .horizon(20)
///     .num_paths(1_000)
///     .jump_probability(0.0)
///     .seed(12345)
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.jump_probability(), 0.0);
///
/// // Missing required fields are rejected.
/// assert!(SimulationConfig::builder().horizon(20).build().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    starting_price: Option<f64>,
    drift: Option<f64>,
    volatility: Option<f64>,
    horizon: Option<usize>,
    num_paths: Option<usize>,
    degrees_of_freedom: Option<f64>,
    ewma_decay: Option<f64>,
    jump_probability: Option<f64>,
    jump_magnitude: Option<f64>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Sets the starting price (finite, positive).
    #[inline]
    pub fn starting_price(mut self, starting_price: f64) -> Self {
        self.starting_price = Some(starting_price);
        self
    }

    /// Sets the annual drift (e.g. `0.04` for 4%).
    #[inline]
    pub fn drift(mut self, drift: f64) -> Self {
        self.drift = Some(drift);
        self
    }

    /// Sets the annualised base volatility (non-negative).
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the horizon in trading days, in [1, 10_000].
    #[inline]
    pub fn horizon(mut self, horizon: usize) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Sets the number of paths, in [1, 10_000_000].
    #[inline]
    pub fn num_paths(mut self, num_paths: usize) -> Self {
        self.num_paths = Some(num_paths);
        self
    }

    /// Sets the Student-t degrees of freedom (> 2).
    #[inline]
    pub fn degrees_of_freedom(mut self, degrees_of_freedom: f64) -> Self {
        self.degrees_of_freedom = Some(degrees_of_freedom);
        self
    }

    /// Sets the EWMA decay λ in (0, 1).
    #[inline]
    pub fn ewma_decay(mut self, ewma_decay: f64) -> Self {
        self.ewma_decay = Some(ewma_decay);
        self
    }

    /// Sets the daily jump probability in [0, 1].
    #[inline]
    pub fn jump_probability(mut self, jump_probability: f64) -> Self {
        self.jump_probability = Some(jump_probability);
        self
    }

    /// Sets the additive jump return.
    #[inline]
    pub fn jump_magnitude(mut self, jump_magnitude: f64) -> Self {
        self.jump_magnitude = Some(jump_magnitude);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required field is missing or any value
    /// fails [`SimulationConfig::validate`].
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let config = SimulationConfig {
            starting_price: self
                .starting_price
                .ok_or_else(|| invalid("starting_price", "must be specified".to_string()))?,
            drift: self.drift.unwrap_or(0.0),
            volatility: self
                .volatility
                .ok_or_else(|| invalid("volatility", "must be specified".to_string()))?,
            horizon: self
                .horizon
                .ok_or_else(|| invalid("horizon", "must be specified".to_string()))?,
            num_paths: self
                .num_paths
                .ok_or_else(|| invalid("num_paths", "must be specified".to_string()))?,
            degrees_of_freedom: self.degrees_of_freedom.unwrap_or(DEFAULT_DEGREES_OF_FREEDOM),
            ewma_decay: self.ewma_decay.unwrap_or(DEFAULT_EWMA_DECAY),
            jump_probability: self.jump_probability.unwrap_or(DEFAULT_JUMP_PROBABILITY),
            jump_magnitude: self.jump_magnitude.unwrap_or(DEFAULT_JUMP_MAGNITUDE),
            seed: self.seed.unwrap_or(DEFAULT_SEED),
        };

        config.validate()?;
        Ok(config)
    }
}
