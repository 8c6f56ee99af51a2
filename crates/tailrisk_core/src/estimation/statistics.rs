//! Sample-moment estimator for annualised volatility and drift.

use tracing::debug;

use crate::math::stats::{mean, sample_std, simple_returns};
use crate::types::{EstimationError, PriceHistory, TRADING_DAYS_PER_YEAR};

/// Smallest lookback that yields two returns, the minimum for a sample
/// standard deviation.
pub const MIN_WINDOW: usize = 3;

/// Annualised volatility at or below which the distribution is treated as
/// degenerate (zero width).
pub const DEGENERATE_VOLATILITY: f64 = 1e-12;

/// Source of the annual drift fed to the simulator.
///
/// # Variants
/// - `Historical`: annualised sample mean of the trailing daily returns
/// - `RiskFreeProxy`: a supplied constant rate, typically a risk-free yield
///
/// Historical drift is noisy and regime-fragile over short lookbacks, which
/// is why the proxy mode exists.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum DriftMode {
    /// Drift = mean daily return × 252.
    Historical,
    /// Drift = the supplied annual rate.
    RiskFreeProxy {
        /// Annual rate used as drift (e.g. 0.04 for 4%).
        rate: f64,
    },
}

impl DriftMode {
    /// Short label for logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            DriftMode::Historical => "historical",
            DriftMode::RiskFreeProxy { .. } => "risk_free_proxy",
        }
    }
}

/// Output of [`StatisticsEstimator::estimate`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoricalStatistics {
    /// Annualised volatility (sample std of daily returns × √252).
    pub volatility: f64,
    /// Annual drift according to `drift_mode`.
    pub drift: f64,
    /// Mean of the trailing daily returns (fraction per day).
    pub mean_daily_return: f64,
    /// Sample standard deviation of the trailing daily returns.
    pub daily_volatility: f64,
    /// Number of daily returns used.
    pub observations: usize,
    /// Drift source that produced `drift`.
    pub drift_mode: DriftMode,
}

impl HistoricalStatistics {
    /// Returns `true` when volatility is zero or numerically indistinguishable
    /// from it. Such statistics are valid input: the simulated distribution
    /// collapses onto the drift path.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.volatility <= DEGENERATE_VOLATILITY
    }
}

/// Estimates annualised volatility and drift from a trailing window.
///
/// # Examples
///
/// ```
/// use tailrisk_core::estimation::{DriftMode, StatisticsEstimator};
/// use tailrisk_core::types::{Date, PriceHistory};
///
/// let start = Date::from_ymd(2024, 1, 2).unwrap();
/// let flat = PriceHistory::from_closes(start, &[50.0; 30]).unwrap();
///
/// let estimator = StatisticsEstimator::new(20, DriftMode::RiskFreeProxy { rate: 0.04 }).unwrap();
/// let stats = estimator.estimate(&flat).unwrap();
///
/// assert_eq!(stats.volatility, 0.0);
/// assert_eq!(stats.drift, 0.04);
/// assert!(stats.is_degenerate());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatisticsEstimator {
    window: usize,
    drift_mode: DriftMode,
}

impl StatisticsEstimator {
    /// Creates an estimator over the trailing `window` closes.
    ///
    /// # Errors
    ///
    /// - `InvalidWindow` if `window < 3`
    /// - `InvalidDriftMode` if the proxy rate is not finite
    pub fn new(window: usize, drift_mode: DriftMode) -> Result<Self, EstimationError> {
        if window < MIN_WINDOW {
            return Err(EstimationError::InvalidWindow(window));
        }
        if let DriftMode::RiskFreeProxy { rate } = drift_mode {
            if !rate.is_finite() {
                return Err(EstimationError::InvalidDriftMode(format!(
                    "risk-free proxy rate must be finite, got {}",
                    rate
                )));
            }
        }
        Ok(Self { window, drift_mode })
    }

    /// Lookback length in observations.
    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Configured drift source.
    #[inline]
    pub fn drift_mode(&self) -> DriftMode {
        self.drift_mode
    }

    /// Computes statistics over the trailing window of `history`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when `history` is shorter than the window.
    pub fn estimate(&self, history: &PriceHistory) -> Result<HistoricalStatistics, EstimationError> {
        let tail = history.trailing(self.window)?;
        let closes: Vec<f64> = tail.iter().map(|p| p.close).collect();
        let returns = simple_returns(&closes);

        let daily_volatility = sample_std(&returns);
        let mean_daily_return = mean(&returns);
        let volatility = daily_volatility * TRADING_DAYS_PER_YEAR.sqrt();

        let drift = match self.drift_mode {
            DriftMode::Historical => mean_daily_return * TRADING_DAYS_PER_YEAR,
            DriftMode::RiskFreeProxy { rate } => rate,
        };

        debug!(
            window = self.window,
            observations = returns.len(),
            volatility,
            drift,
            drift_mode = self.drift_mode.label(),
            "Estimated historical statistics"
        );

        Ok(HistoricalStatistics {
            volatility,
            drift,
            mean_daily_return,
            daily_volatility,
            observations: returns.len(),
            drift_mode: self.drift_mode,
        })
    }
}
