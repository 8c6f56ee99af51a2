//! Fixed-set percentile tables over terminal returns and prices.

use tailrisk_core::math::stats::{percentile_sorted, sorted_finite};
use tailrisk_engine::PathEnsemble;

use super::metrics::RiskMetrics;
use crate::error::AnalysisError;

/// Percentiles reported for every ensemble.
pub const STANDARD_PERCENTILES: [f64; 9] = [1.0, 5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 95.0, 99.0];

/// One row of a [`PercentileTable`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PercentileRow {
    /// Percentile in [0, 100].
    pub percentile: f64,
    /// Terminal return at that percentile, in percent.
    pub return_pct: f64,
    /// Terminal price at that percentile, when prices were supplied.
    pub price: Option<f64>,
}

/// Percentile rows in ascending percentile order, derived from one
/// ensemble.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PercentileTable {
    rows: Vec<PercentileRow>,
}

impl PercentileTable {
    /// Rows in ascending percentile order.
    #[inline]
    pub fn rows(&self) -> &[PercentileRow] {
        &self.rows
    }

    /// Row for an exact percentile, if present.
    pub fn get(&self, percentile: f64) -> Option<&PercentileRow> {
        self.rows.iter().find(|r| r.percentile == percentile)
    }

    /// Return at an exact percentile, if present.
    pub fn return_at(&self, percentile: f64) -> Option<f64> {
        self.get(percentile).map(|r| r.return_pct)
    }

    /// Price at an exact percentile, if present and priced.
    pub fn price_at(&self, percentile: f64) -> Option<f64> {
        self.get(percentile).and_then(|r| r.price)
    }

    /// Spread between the highest and lowest tabulated returns.
    ///
    /// Zero for a collapsed (zero-volatility) distribution.
    pub fn width(&self) -> f64 {
        match (self.rows.first(), self.rows.last()) {
            (Some(lo), Some(hi)) => hi.return_pct - lo.return_pct,
            _ => 0.0,
        }
    }
}

/// Reduces terminal distributions to a fixed percentile table.
///
/// Uses linear interpolation between closest ranks. Non-finite values are
/// excluded before sorting.
///
/// # Examples
///
/// ```
/// use tailrisk_risk::tail::PercentileAnalyzer;
///
/// let returns = [-10.0, -5.0, 0.0, 5.0, 10.0];
/// let prices = [90.0, 95.0, 100.0, 105.0, 110.0];
///
/// let analyzer = PercentileAnalyzer::default();
/// let table = analyzer.table(&returns, Some(&prices)).unwrap();
///
/// assert_eq!(table.return_at(50.0), Some(0.0));
/// assert_eq!(table.price_at(50.0), Some(100.0));
/// assert_eq!(table.rows().len(), 9);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PercentileAnalyzer {
    percentiles: Vec<f64>,
}

impl Default for PercentileAnalyzer {
    fn default() -> Self {
        Self {
            percentiles: STANDARD_PERCENTILES.to_vec(),
        }
    }
}

impl PercentileAnalyzer {
    /// Creates an analyzer for a custom percentile set.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if the set is empty, not
    /// strictly ascending, or contains a value outside [0, 100].
    pub fn new(percentiles: Vec<f64>) -> Result<Self, AnalysisError> {
        if percentiles.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "percentile set must not be empty".to_string(),
            ));
        }
        if percentiles.iter().any(|p| !(0.0..=100.0).contains(p)) {
            return Err(AnalysisError::InvalidConfig(
                "percentiles must lie in [0, 100]".to_string(),
            ));
        }
        if percentiles.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AnalysisError::InvalidConfig(
                "percentiles must be strictly ascending".to_string(),
            ));
        }
        Ok(Self { percentiles })
    }

    /// Percentiles in table order.
    #[inline]
    pub fn percentiles(&self) -> &[f64] {
        &self.percentiles
    }

    /// Tabulates `returns` and, optionally, the parallel `prices`.
    ///
    /// # Errors
    ///
    /// - `LengthMismatch` if `prices` differs in length from `returns`
    /// - `EmptyDistribution` if no finite return remains
    pub fn table(
        &self,
        returns: &[f64],
        prices: Option<&[f64]>,
    ) -> Result<PercentileTable, AnalysisError> {
        if let Some(prices) = prices {
            if prices.len() != returns.len() {
                return Err(AnalysisError::LengthMismatch {
                    returns: returns.len(),
                    prices: prices.len(),
                });
            }
        }

        let sorted_returns = sorted_finite(returns);
        if sorted_returns.is_empty() {
            return Err(AnalysisError::EmptyDistribution);
        }
        let sorted_prices = prices.map(|prices| {
            let paired: Vec<f64> = prices
                .iter()
                .zip(returns)
                .filter(|(p, r)| p.is_finite() && r.is_finite())
                .map(|(&p, _)| p)
                .collect();
            sorted_finite(&paired)
        });

        let rows = self
            .percentiles
            .iter()
            .map(|&p| PercentileRow {
                percentile: p,
                return_pct: percentile_sorted(&sorted_returns, p),
                price: sorted_prices
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .map(|s| percentile_sorted(s, p)),
            })
            .collect();

        Ok(PercentileTable { rows })
    }

    /// Tabulates an ensemble's terminal returns and prices.
    ///
    /// # Errors
    ///
    /// Returns `NumericOverflow` if every path is non-finite.
    pub fn ensemble_table(&self, ensemble: &PathEnsemble) -> Result<PercentileTable, AnalysisError> {
        check_overflow(ensemble)?;
        self.table(ensemble.final_returns(), Some(ensemble.final_prices()))
    }

    /// VaR/CVaR of an ensemble's terminal returns.
    ///
    /// # Errors
    ///
    /// Returns `NumericOverflow` if every path is non-finite.
    pub fn ensemble_metrics(&self, ensemble: &PathEnsemble) -> Result<RiskMetrics, AnalysisError> {
        check_overflow(ensemble)?;
        RiskMetrics::from_returns(ensemble.final_returns())
    }
}

fn check_overflow(ensemble: &PathEnsemble) -> Result<(), AnalysisError> {
    if ensemble.non_finite_paths() == ensemble.num_paths() {
        return Err(AnalysisError::NumericOverflow {
            affected: ensemble.non_finite_paths(),
            total: ensemble.num_paths(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_standard_rows() {
        let returns: Vec<f64> = (0..=100).map(f64::from).collect();
        let table = PercentileAnalyzer::default().table(&returns, None).unwrap();
        let percentiles: Vec<f64> = table.rows().iter().map(|r| r.percentile).collect();
        assert_eq!(percentiles, STANDARD_PERCENTILES.to_vec());
        for row in table.rows() {
            assert_relative_eq!(row.return_pct, row.percentile, epsilon = 1e-9);
            assert_eq!(row.price, None);
        }
        assert_relative_eq!(table.width(), 98.0, epsilon = 1e-9);
    }

    #[test]
    fn test_collapsed_distribution_has_zero_width() {
        let table = PercentileAnalyzer::default()
            .table(&[1.44; 50], Some(&[101.44; 50]))
            .unwrap();
        assert_eq!(table.width(), 0.0);
        assert!(table.rows().iter().all(|r| r.price == Some(101.44)));
    }

    #[test]
    fn test_length_mismatch() {
        let err = PercentileAnalyzer::default()
            .table(&[1.0, 2.0], Some(&[1.0]))
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::LengthMismatch {
                returns: 2,
                prices: 1
            }
        );
    }

    #[test]
    fn test_non_finite_paths_are_excluded() {
        let returns = [f64::NAN, -10.0, 0.0, 10.0, f64::INFINITY];
        let prices = [f64::NAN, 90.0, 100.0, 110.0, f64::INFINITY];
        let table = PercentileAnalyzer::default()
            .table(&returns, Some(&prices))
            .unwrap();
        assert_eq!(table.return_at(50.0), Some(0.0));
        assert_eq!(table.price_at(50.0), Some(100.0));
        assert_eq!(table.return_at(99.0).map(|r| r.is_finite()), Some(true));
    }

    #[test]
    fn test_custom_percentiles_validation() {
        assert!(PercentileAnalyzer::new(vec![]).is_err());
        assert!(PercentileAnalyzer::new(vec![5.0, 1.0]).is_err());
        assert!(PercentileAnalyzer::new(vec![50.0, 101.0]).is_err());
        let analyzer = PercentileAnalyzer::new(vec![2.5, 97.5]).unwrap();
        assert_eq!(analyzer.percentiles(), &[2.5, 97.5]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_table_is_monotonic(
            returns in prop::collection::vec(-95.0..400.0f64, 1..300),
        ) {
            let table = PercentileAnalyzer::default().table(&returns, None).unwrap();
            for pair in table.rows().windows(2) {
                prop_assert!(pair[0].return_pct <= pair[1].return_pct + 1e-9);
            }
        }
    }
}
