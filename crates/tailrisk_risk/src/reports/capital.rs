//! Currency-denominated risk for a capital allocation.

use tailrisk_core::math::stats::fraction_at_or_below;

use crate::tail::RiskMetrics;

/// VaR/CVaR in currency units plus loss-tolerance checks.
///
/// Currency figures are `capital × metric / 100`, negative for losses.
///
/// # Examples
///
/// ```
/// use tailrisk_risk::reports::CapitalAtRisk;
/// use tailrisk_risk::tail::RiskMetrics;
///
/// let metrics = RiskMetrics { var95: -12.0, cvar95: -18.0, var99: -25.0, cvar99: -31.0 };
/// let returns = [-30.0, -20.0, -10.0, 0.0, 10.0];
///
/// let car = CapitalAtRisk::new(1_000.0, 14.0, &metrics, &returns);
/// assert_eq!(car.var95, -120.0);
/// assert_eq!(car.probability_exceeding_tolerance, 40.0);
/// assert!(!car.var95_breaches_tolerance);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapitalAtRisk {
    /// Capital allocated.
    pub capital: f64,
    /// Largest acceptable horizon loss, in percent (positive).
    pub max_tolerable_loss_pct: f64,
    /// 95% VaR in currency.
    pub var95: f64,
    /// 95% CVaR in currency.
    pub cvar95: f64,
    /// 99% VaR in currency.
    pub var99: f64,
    /// 99% CVaR in currency.
    pub cvar99: f64,
    /// Probability (%) that the horizon return is at or below the tolerated loss.
    pub probability_exceeding_tolerance: f64,
    /// `true` when the 95% VaR loss is larger than the tolerance.
    pub var95_breaches_tolerance: bool,
}

impl CapitalAtRisk {
    /// Scales `metrics` to `capital` and checks `returns` (percent) against
    /// `max_tolerable_loss_pct`.
    pub fn new(
        capital: f64,
        max_tolerable_loss_pct: f64,
        metrics: &RiskMetrics,
        returns: &[f64],
    ) -> Self {
        let to_currency = |pct: f64| capital * pct / 100.0;
        let threshold = -max_tolerable_loss_pct;
        let finite: Vec<f64> = returns.iter().copied().filter(|r| r.is_finite()).collect();
        let probability = fraction_at_or_below(&finite, threshold);

        Self {
            capital,
            max_tolerable_loss_pct,
            var95: to_currency(metrics.var95),
            cvar95: to_currency(metrics.cvar95),
            var99: to_currency(metrics.var99),
            cvar99: to_currency(metrics.cvar99),
            probability_exceeding_tolerance: if probability.is_nan() { 0.0 } else { probability },
            var95_breaches_tolerance: metrics.var95 < threshold,
        }
    }
}
