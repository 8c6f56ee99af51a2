//! Value-at-Risk and Conditional Value-at-Risk.
//!
//! Both are expressed as percentage returns, negative for losses. VaR at
//! confidence `c` is the `(100 − c)`th percentile of the returns; CVaR is
//! the mean of every return at or below that VaR.

use tailrisk_core::math::stats::{fraction_at_or_below, mean, percentile_sorted, sorted_finite};

use crate::error::AnalysisError;

/// VaR at `confidence` (e.g. `95.0`) of an ascending, finite slice.
///
/// `NaN` for an empty slice.
///
/// # Examples
///
/// ```
/// use tailrisk_risk::tail::value_at_risk;
///
/// let sorted: Vec<f64> = (1..=100).map(|i| i as f64 - 50.0).collect();
/// assert!((value_at_risk(&sorted, 95.0) - (-44.05)).abs() < 1e-9);
/// ```
pub fn value_at_risk(sorted: &[f64], confidence: f64) -> f64 {
    percentile_sorted(sorted, 100.0 - confidence)
}

/// CVaR (expected shortfall) at `confidence` of an ascending, finite slice.
///
/// Never exceeds the VaR at the same confidence. `NaN` for an empty slice.
///
/// # Examples
///
/// ```
/// use tailrisk_risk::tail::{conditional_value_at_risk, value_at_risk};
///
/// let sorted = [-20.0, -10.0, 0.0, 5.0, 10.0, 12.0, 15.0, 18.0, 20.0, 25.0];
/// let var = value_at_risk(&sorted, 90.0);
/// let cvar = conditional_value_at_risk(&sorted, 90.0);
/// assert!((var - (-11.0)).abs() < 1e-12);
/// assert_eq!(cvar, -20.0);
/// ```
pub fn conditional_value_at_risk(sorted: &[f64], confidence: f64) -> f64 {
    let var = value_at_risk(sorted, confidence);
    let tail_len = sorted.partition_point(|&r| r <= var);
    // Rounding in the tail sum can land a hair above the threshold.
    mean(&sorted[..tail_len]).min(var)
}

/// Percentage of `values` at or below `threshold`, ignoring non-finite entries.
///
/// # Examples
///
/// ```
/// use tailrisk_risk::tail::percentile_rank;
///
/// assert_eq!(percentile_rank(&[90.0, 95.0, 100.0, 105.0, 110.0], 95.0), 40.0);
/// ```
pub fn percentile_rank(values: &[f64], threshold: f64) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    fraction_at_or_below(&finite, threshold)
}

/// VaR and CVaR at 95% and 99% confidence, in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMetrics {
    /// 5th percentile return.
    pub var95: f64,
    /// Mean return at or below `var95`.
    pub cvar95: f64,
    /// 1st percentile return.
    pub var99: f64,
    /// Mean return at or below `var99`.
    pub cvar99: f64,
}

impl RiskMetrics {
    /// Computes the metrics from terminal returns in percent.
    ///
    /// Non-finite returns are ignored.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::EmptyDistribution` when no finite return remains.
    pub fn from_returns(returns: &[f64]) -> Result<Self, AnalysisError> {
        let sorted = sorted_finite(returns);
        Self::from_sorted(&sorted)
    }

    /// As [`from_returns`](Self::from_returns) for an ascending, finite slice.
    pub fn from_sorted(sorted: &[f64]) -> Result<Self, AnalysisError> {
        if sorted.is_empty() {
            return Err(AnalysisError::EmptyDistribution);
        }
        Ok(Self {
            var95: value_at_risk(sorted, 95.0),
            cvar95: conditional_value_at_risk(sorted, 95.0),
            var99: value_at_risk(sorted, 99.0),
            cvar99: conditional_value_at_risk(sorted, 99.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_metrics_on_uniform_grid() {
        let returns: Vec<f64> = (0..1000).map(|i| i as f64 / 10.0 - 50.0).collect();
        let metrics = RiskMetrics::from_returns(&returns).unwrap();
        assert_relative_eq!(metrics.var95, -45.005, epsilon = 1e-9);
        assert_relative_eq!(metrics.var99, -49.001, epsilon = 1e-9);
        // 50 values -50.0 ..= -45.1
        assert_relative_eq!(metrics.cvar95, -47.55, epsilon = 1e-9);
        assert!(metrics.cvar99 <= metrics.var99);
    }

    #[test]
    fn test_degenerate_distribution_collapses() {
        let metrics = RiskMetrics::from_returns(&[1.44; 100]).unwrap();
        assert_eq!(metrics.var95, 1.44);
        assert_eq!(metrics.var99, 1.44);
        assert_relative_eq!(metrics.cvar95, 1.44, epsilon = 1e-12);
        assert!(metrics.cvar95 <= metrics.var95);
    }

    #[test]
    fn test_empty_and_non_finite() {
        assert_eq!(
            RiskMetrics::from_returns(&[]),
            Err(AnalysisError::EmptyDistribution)
        );
        assert_eq!(
            RiskMetrics::from_returns(&[f64::NAN, f64::INFINITY]),
            Err(AnalysisError::EmptyDistribution)
        );
        let metrics = RiskMetrics::from_returns(&[f64::NAN, -5.0, 5.0]).unwrap();
        assert!(metrics.var95.is_finite());
    }

    #[test]
    fn test_percentile_rank_ignores_non_finite() {
        assert_eq!(percentile_rank(&[f64::NAN, 1.0, 2.0, 3.0, 4.0], 2.0), 50.0);
        assert!(percentile_rank(&[], 2.0).is_nan());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_cvar_not_above_var(
            returns in prop::collection::vec(-80.0..200.0f64, 2..400),
        ) {
            let m = RiskMetrics::from_returns(&returns).unwrap();
            prop_assert!(m.cvar95 <= m.var95);
            prop_assert!(m.cvar99 <= m.var99);
        }

        #[test]
        fn prop_tighter_confidence_is_further_in_tail(
            returns in prop::collection::vec(-80.0..200.0f64, 2..400),
        ) {
            let m = RiskMetrics::from_returns(&returns).unwrap();
            prop_assert!(m.var99 <= m.var95 + 1e-9);
            prop_assert!(m.cvar99 <= m.cvar95 + 1e-9);
        }
    }
}
