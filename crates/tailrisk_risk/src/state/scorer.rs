use tailrisk_core::math::stats::{clamp_unit, normalise_clamped, percentile_sorted, sample_std, sorted_finite};
use tailrisk_core::types::TRADING_DAYS_PER_YEAR;
use tracing::debug;

use crate::tail::RiskMetrics;

/// Qualitative band of the composite score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskRegime {
    /// Score below 25.
    Calm,
    /// Score in [25, 50).
    Normal,
    /// Score in [50, 75).
    Elevated,
    /// Score of 75 or more.
    Stressed,
}

impl RiskRegime {
    /// Classifies a composite score in [0, 100].
    ///
    /// # Examples
    ///
    /// ```
    /// use tailrisk_risk::state::RiskRegime;
    ///
    /// assert_eq!(RiskRegime::from_score(0.0), RiskRegime::Calm);
    /// assert_eq!(RiskRegime::from_score(25.0), RiskRegime::Normal);
    /// assert_eq!(RiskRegime::from_score(74.9), RiskRegime::Elevated);
    /// assert_eq!(RiskRegime::from_score(100.0), RiskRegime::Stressed);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score < 25.0 {
            Self::Calm
        } else if score < 50.0 {
            Self::Normal
        } else if score < 75.0 {
            Self::Elevated
        } else {
            Self::Stressed
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Calm => "Calm",
            Self::Normal => "Normal",
            Self::Elevated => "Elevated",
            Self::Stressed => "Stressed",
        }
    }
}

/// Raw indicators, their normalised scores and the composite.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskState {
    /// Short-window over long-window realised volatility.
    pub volatility_ratio: f64,
    /// |CVaR99| / |VaR99|.
    pub tail_ratio: f64,
    /// Fraction of historical daily returns below the jump threshold.
    pub jump_frequency: f64,
    /// P95 − P5 of simulated terminal returns, in percentage points.
    pub distribution_width: f64,
    /// Normalised volatility-regime score in [0, 1].
    pub volatility_score: f64,
    /// Normalised tail-thickness score in [0, 1].
    pub tail_score: f64,
    /// Normalised jump-intensity score in [0, 1].
    pub jump_score: f64,
    /// Normalised distribution-width score in [0, 1].
    pub width_score: f64,
    /// Mean of the four scores × 100, in [0, 100].
    pub composite: f64,
    /// Band of `composite`.
    pub regime: RiskRegime,
}

/// Four-factor risk-state scorer.
///
/// Reference ranges are fixed; [`Default`] gives the standard calibration.
///
/// # Examples
///
/// ```
/// use tailrisk_risk::state::RiskStateScorer;
/// use tailrisk_risk::tail::RiskMetrics;
///
/// let history = vec![0.001; 150];
/// let simulated: Vec<f64> = (0..1000).map(|i| i as f64 / 50.0 - 10.0).collect();
/// let metrics = RiskMetrics::from_returns(&simulated).unwrap();
///
/// let state = RiskStateScorer::default().score(&history, &simulated, &metrics);
/// assert!((0.0..=100.0).contains(&state.composite));
/// assert_eq!(state.jump_frequency, 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskStateScorer {
    short_window: usize,
    long_window: usize,
    jump_threshold: f64,
    jump_reference_frequency: f64,
    volatility_ratio_range: (f64, f64),
    tail_ratio_range: (f64, f64),
    width_range: (f64, f64),
}

impl Default for RiskStateScorer {
    fn default() -> Self {
        Self {
            short_window: 20,
            long_window: 100,
            jump_threshold: -0.03,
            jump_reference_frequency: 0.03,
            volatility_ratio_range: (0.7, 1.5),
            tail_ratio_range: (1.1, 1.6),
            width_range: (10.0, 60.0),
        }
    }
}

impl RiskStateScorer {
    /// Scores the current regime.
    ///
    /// # Arguments
    ///
    /// * `historical_returns` - realised daily returns as fractions, oldest first
    /// * `simulated_returns` - terminal returns of the base ensemble, in percent
    /// * `metrics` - VaR/CVaR of `simulated_returns`
    ///
    /// Inputs too short or degenerate to define a ratio fall back to the
    /// neutral ratio of 1.0; the composite is always within [0, 100].
    pub fn score(
        &self,
        historical_returns: &[f64],
        simulated_returns: &[f64],
        metrics: &RiskMetrics,
    ) -> RiskState {
        let volatility_ratio = self.volatility_ratio(historical_returns);
        let tail_ratio = tail_ratio(metrics);
        let jump_frequency = self.jump_frequency(historical_returns);
        let distribution_width = distribution_width(simulated_returns);

        let volatility_score = normalise_clamped(
            volatility_ratio,
            self.volatility_ratio_range.0,
            self.volatility_ratio_range.1,
        );
        let tail_score = normalise_clamped(tail_ratio, self.tail_ratio_range.0, self.tail_ratio_range.1);
        let jump_score = clamp_unit(jump_frequency / self.jump_reference_frequency);
        let width_score = normalise_clamped(distribution_width, self.width_range.0, self.width_range.1);

        let composite = (volatility_score + tail_score + jump_score + width_score) / 4.0 * 100.0;
        let regime = RiskRegime::from_score(composite);

        debug!(
            volatility_ratio,
            tail_ratio,
            jump_frequency,
            distribution_width,
            composite,
            regime = regime.label(),
            "Scored risk state"
        );

        RiskState {
            volatility_ratio,
            tail_ratio,
            jump_frequency,
            distribution_width,
            volatility_score,
            tail_score,
            jump_score,
            width_score,
            composite,
            regime,
        }
    }

    fn volatility_ratio(&self, returns: &[f64]) -> f64 {
        let annualise = TRADING_DAYS_PER_YEAR.sqrt();
        let trailing_vol = |window: usize| {
            let start = returns.len().saturating_sub(window);
            sample_std(&returns[start..]) * annualise
        };
        let short = trailing_vol(self.short_window);
        let long = trailing_vol(self.long_window);
        if short.is_finite() && long.is_finite() && long > 0.0 {
            short / long
        } else {
            1.0
        }
    }

    fn jump_frequency(&self, returns: &[f64]) -> f64 {
        if returns.is_empty() {
            return 0.0;
        }
        let jumps = returns.iter().filter(|&&r| r < self.jump_threshold).count();
        jumps as f64 / returns.len() as f64
    }
}

fn tail_ratio(metrics: &RiskMetrics) -> f64 {
    let var = metrics.var99.abs();
    let cvar = metrics.cvar99.abs();
    if var > 0.0 && var.is_finite() && cvar.is_finite() {
        cvar / var
    } else {
        1.0
    }
}

fn distribution_width(returns: &[f64]) -> f64 {
    let sorted = sorted_finite(returns);
    if sorted.is_empty() {
        return 0.0;
    }
    (percentile_sorted(&sorted, 95.0) - percentile_sorted(&sorted, 5.0)).abs()
}
