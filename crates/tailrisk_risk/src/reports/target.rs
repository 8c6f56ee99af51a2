//! Target-price interpretation and the strike probability guide.

use tailrisk_core::math::stats::fraction_at_or_below;

use crate::error::AnalysisError;
use crate::tail::{percentile_rank, PercentileTable};

/// Percentiles whose prices are reported as boundaries around a target.
const BOUNDARY_PERCENTILES: [f64; 5] = [1.0, 5.0, 10.0, 25.0, 50.0];

/// Where a target price falls in the simulated terminal distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceZone {
    /// Rank ≤ 1.
    ExtremeTail,
    /// Rank in (1, 5].
    ExtremeOversold,
    /// Rank in (5, 10].
    VeryOversold,
    /// Rank in (10, 25].
    Oversold,
    /// Rank in (25, 50].
    BelowMedian,
    /// Rank above 50.
    AboveMedian,
}

impl PriceZone {
    /// Classifies a percentile rank in [0, 100].
    pub fn from_rank(rank: f64) -> Self {
        if rank <= 1.0 {
            Self::ExtremeTail
        } else if rank <= 5.0 {
            Self::ExtremeOversold
        } else if rank <= 10.0 {
            Self::VeryOversold
        } else if rank <= 25.0 {
            Self::Oversold
        } else if rank <= 50.0 {
            Self::BelowMedian
        } else {
            Self::AboveMedian
        }
    }

    /// Short description.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::ExtremeTail => "extreme tail (at or below 1st percentile)",
            Self::ExtremeOversold => "extreme oversold (1st-5th percentile)",
            Self::VeryOversold => "very oversold (5th-10th percentile)",
            Self::Oversold => "oversold (10th-25th percentile)",
            Self::BelowMedian => "below median (25th-50th percentile)",
            Self::AboveMedian => "above median",
        }
    }
}

/// Price at a reference percentile.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceBoundary {
    /// Percentile.
    pub percentile: f64,
    /// Terminal price at that percentile.
    pub price: f64,
}

/// Position of a target price in the base scenario's terminal prices.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetPriceAnalysis {
    /// Price queried.
    pub target_price: f64,
    /// Percentage of terminal prices at or below the target.
    pub percentile_rank: f64,
    /// Zone of `percentile_rank`.
    pub zone: PriceZone,
    /// Prices at the 1st, 5th, 10th, 25th and 50th percentiles.
    pub boundaries: Vec<PriceBoundary>,
    /// `(median price / target − 1) × 100`.
    pub mean_reversion_pct: f64,
}

impl TargetPriceAnalysis {
    /// Locates `target_price` among `final_prices`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the target is not finite and positive
    /// - `EmptyDistribution` if no finite price exists
    ///
    /// # Examples
    ///
    /// ```
    /// use tailrisk_risk::reports::{PriceZone, TargetPriceAnalysis};
    /// use tailrisk_risk::tail::PercentileAnalyzer;
    ///
    /// let prices = [90.0, 95.0, 100.0, 105.0, 110.0];
    /// let returns = [-10.0, -5.0, 0.0, 5.0, 10.0];
    /// let table = PercentileAnalyzer::default().table(&returns, Some(&prices)).unwrap();
    ///
    /// let analysis = TargetPriceAnalysis::new(95.0, &prices, &table).unwrap();
    /// assert_eq!(analysis.percentile_rank, 40.0);
    /// assert_eq!(analysis.zone, PriceZone::BelowMedian);
    /// ```
    pub fn new(
        target_price: f64,
        final_prices: &[f64],
        table: &PercentileTable,
    ) -> Result<Self, AnalysisError> {
        if !(target_price.is_finite() && target_price > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "target price must be finite and positive, got {}",
                target_price
            )));
        }
        let rank = percentile_rank(final_prices, target_price);
        if rank.is_nan() {
            return Err(AnalysisError::EmptyDistribution);
        }

        let boundaries: Vec<PriceBoundary> = BOUNDARY_PERCENTILES
            .iter()
            .filter_map(|&p| {
                table
                    .price_at(p)
                    .map(|price| PriceBoundary { percentile: p, price })
            })
            .collect();
        let mean_reversion_pct = table
            .price_at(50.0)
            .map_or(f64::NAN, |median| (median / target_price - 1.0) * 100.0);

        Ok(Self {
            target_price,
            percentile_rank: rank,
            zone: PriceZone::from_rank(rank),
            boundaries,
            mean_reversion_pct,
        })
    }
}

/// One strike level derived from a percentile row.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeGuideRow {
    /// Percentile.
    pub percentile: f64,
    /// Terminal return at that percentile, in percent.
    pub return_pct: f64,
    /// `starting_price × (1 + return / 100)`.
    pub strike: f64,
    /// Percentage of terminal returns at or below `return_pct`.
    pub probability_at_or_below: f64,
}

/// Maps every row of `table` to a strike and its empirical probability of
/// finishing at or below it.
pub fn strike_guide(
    table: &PercentileTable,
    starting_price: f64,
    final_returns: &[f64],
) -> Vec<StrikeGuideRow> {
    let finite: Vec<f64> = final_returns.iter().copied().filter(|r| r.is_finite()).collect();
    table
        .rows()
        .iter()
        .map(|row| StrikeGuideRow {
            percentile: row.percentile,
            return_pct: row.return_pct,
            strike: starting_price * (1.0 + row.return_pct / 100.0),
            probability_at_or_below: fraction_at_or_below(&finite, row.return_pct),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tail::PercentileAnalyzer;
    use approx::assert_relative_eq;

    fn toy() -> (Vec<f64>, Vec<f64>) {
        let prices: Vec<f64> = (0..100).map(|i| 80.0 + i as f64 * 0.4).collect();
        let returns: Vec<f64> = prices.iter().map(|p| (p / 100.0 - 1.0) * 100.0).collect();
        (prices, returns)
    }

    #[test]
    fn test_zones() {
        assert_eq!(PriceZone::from_rank(0.0), PriceZone::ExtremeTail);
        assert_eq!(PriceZone::from_rank(1.0), PriceZone::ExtremeTail);
        assert_eq!(PriceZone::from_rank(1.5), PriceZone::ExtremeOversold);
        assert_eq!(PriceZone::from_rank(10.0), PriceZone::VeryOversold);
        assert_eq!(PriceZone::from_rank(25.0), PriceZone::Oversold);
        assert_eq!(PriceZone::from_rank(50.0), PriceZone::BelowMedian);
        assert_eq!(PriceZone::from_rank(50.1), PriceZone::AboveMedian);
    }

    #[test]
    fn test_boundaries_and_mean_reversion() {
        let (prices, returns) = toy();
        let table = PercentileAnalyzer::default()
            .table(&returns, Some(&prices))
            .unwrap();
        let analysis = TargetPriceAnalysis::new(84.0, &prices, &table).unwrap();

        // 80.0, 80.4, ..., 84.0 → 11 of 100 prices
        assert_relative_eq!(analysis.percentile_rank, 11.0, epsilon = 1e-9);
        assert_eq!(analysis.zone, PriceZone::Oversold);
        assert_eq!(analysis.boundaries.len(), 5);
        assert_eq!(analysis.boundaries[4].percentile, 50.0);

        let median = table.price_at(50.0).unwrap();
        assert_relative_eq!(
            analysis.mean_reversion_pct,
            (median / 84.0 - 1.0) * 100.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_invalid_target() {
        let (prices, returns) = toy();
        let table = PercentileAnalyzer::default()
            .table(&returns, Some(&prices))
            .unwrap();
        assert!(TargetPriceAnalysis::new(0.0, &prices, &table).is_err());
        assert!(TargetPriceAnalysis::new(f64::NAN, &prices, &table).is_err());
        assert_eq!(
            TargetPriceAnalysis::new(90.0, &[], &table),
            Err(AnalysisError::EmptyDistribution)
        );
    }

    #[test]
    fn test_strike_guide() {
        let returns = [-10.0, -5.0, 0.0, 5.0, 10.0];
        let prices = [90.0, 95.0, 100.0, 105.0, 110.0];
        let table = PercentileAnalyzer::default()
            .table(&returns, Some(&prices))
            .unwrap();
        let guide = strike_guide(&table, 100.0, &returns);

        assert_eq!(guide.len(), 9);
        let median = guide.iter().find(|r| r.percentile == 50.0).unwrap();
        assert_eq!(median.strike, 100.0);
        assert_eq!(median.probability_at_or_below, 60.0);
        for pair in guide.windows(2) {
            assert!(pair[0].strike <= pair[1].strike);
            assert!(pair[0].probability_at_or_below <= pair[1].probability_at_or_below);
        }
    }
}
