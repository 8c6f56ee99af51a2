//! Immutable analysis result bundle.

use tailrisk_core::estimation::HistoricalStatistics;
use tailrisk_engine::{SimulationConfig, StressLadderResult};

use super::config::AnalysisConfig;
use crate::reports::{CapitalAtRisk, PathBands, StrikeGuideRow, TailShiftRow, TargetPriceAnalysis};
use crate::state::RiskState;
use crate::tail::{percentile_rank, PercentileTable, RiskMetrics};

/// Origin of the simulation's starting price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PriceSource {
    /// `custom_price` from the configuration.
    Custom,
    /// Last close of the price history.
    LastClose,
}

/// Everything one analysis run produced.
///
/// Serialises to plain numbers and arrays. The full stress-ladder price
/// matrices are held in memory but left out of serialised output; the base
/// scenario's terminal prices and returns are kept so that
/// [`target_price_rank`](Self::target_price_rank) can be re-derived from
/// the serialised form.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnalysisResult {
    pub(super) config: AnalysisConfig,
    pub(super) simulation: SimulationConfig,
    pub(super) statistics: HistoricalStatistics,
    pub(super) starting_price: f64,
    pub(super) price_source: PriceSource,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    pub(super) ladder: StressLadderResult,
    pub(super) base_final_prices: Vec<f64>,
    pub(super) base_final_returns: Vec<f64>,
    pub(super) non_finite_paths: usize,
    pub(super) percentiles: PercentileTable,
    pub(super) metrics: RiskMetrics,
    pub(super) risk_state: RiskState,
    pub(super) tail_shift: Vec<TailShiftRow>,
    pub(super) capital: CapitalAtRisk,
    pub(super) strike_guide: Vec<StrikeGuideRow>,
    pub(super) target: Option<TargetPriceAnalysis>,
    pub(super) bands: PathBands,
}

impl AnalysisResult {
    /// Instrument label.
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// Request that produced this result.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Simulation parameters actually used.
    pub fn simulation(&self) -> &SimulationConfig {
        &self.simulation
    }

    /// Trailing-window statistics.
    pub fn statistics(&self) -> &HistoricalStatistics {
        &self.statistics
    }

    /// Price every path started from.
    pub fn starting_price(&self) -> f64 {
        self.starting_price
    }

    /// Where the starting price came from.
    pub fn price_source(&self) -> PriceSource {
        self.price_source
    }

    /// All stress scenarios with their ensembles.
    pub fn ladder(&self) -> &StressLadderResult {
        &self.ladder
    }

    /// Base scenario terminal prices.
    pub fn base_final_prices(&self) -> &[f64] {
        &self.base_final_prices
    }

    /// Base scenario terminal returns, in percent.
    pub fn base_final_returns(&self) -> &[f64] {
        &self.base_final_returns
    }

    /// Base scenario paths excluded for non-finite terminal values.
    pub fn non_finite_paths(&self) -> usize {
        self.non_finite_paths
    }

    /// Base scenario percentile table.
    pub fn percentiles(&self) -> &PercentileTable {
        &self.percentiles
    }

    /// Base scenario VaR/CVaR.
    pub fn metrics(&self) -> &RiskMetrics {
        &self.metrics
    }

    /// Composite risk state.
    pub fn risk_state(&self) -> &RiskState {
        &self.risk_state
    }

    /// Left tail of each stress scenario, in ladder order.
    pub fn tail_shift(&self) -> &[TailShiftRow] {
        &self.tail_shift
    }

    /// Currency risk for the configured capital.
    pub fn capital(&self) -> &CapitalAtRisk {
        &self.capital
    }

    /// Strike levels for each percentile row.
    pub fn strike_guide(&self) -> &[StrikeGuideRow] {
        &self.strike_guide
    }

    /// Target-price analysis, when a target was configured.
    pub fn target(&self) -> Option<&TargetPriceAnalysis> {
        self.target.as_ref()
    }

    /// Per-day price bands of the base scenario.
    pub fn bands(&self) -> &PathBands {
        &self.bands
    }

    /// Percentage of base-scenario terminal prices at or below `price`.
    ///
    /// `NaN` if the base scenario holds no finite price.
    pub fn target_price_rank(&self, price: f64) -> f64 {
        percentile_rank(&self.base_final_prices, price)
    }
}
