//! Coordinator running the full analysis pipeline once.

use tailrisk_core::estimation::StatisticsEstimator;
use tailrisk_core::types::PriceHistory;
use tailrisk_engine::{PathSimulator, SimulationConfig, StressLadder};
use tracing::{info, warn};

use super::config::AnalysisConfig;
use super::result::{AnalysisResult, PriceSource};
use crate::error::AnalysisError;
use crate::reports::{strike_guide, tail_shift_table, CapitalAtRisk, PathBands, TargetPriceAnalysis};
use crate::state::RiskStateScorer;
use crate::tail::PercentileAnalyzer;

/// Runs estimation, simulation and tail analysis in order.
///
/// The facade holds only the stateless analyzers; every call to
/// [`run`](Self::run) is independent.
///
/// # Examples
///
/// ```
/// use tailrisk_core::types::{Date, PriceHistory};
/// use tailrisk_risk::analysis::{AnalysisConfig, AnalysisFacade};
///
/// let closes: Vec<f64> = (0..300).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
/// let history = PriceHistory::from_closes(Date::from_ymd(2023, 1, 2).unwrap(), &closes).unwrap();
///
/// let config = AnalysisConfig {
///     symbol: "DEMO".to_string(),
///     historical_window: 250,
///     days_to_simulate: 20,
///     num_simulations: 1_000,
///     ..AnalysisConfig::default()
/// };
///
/// let result = AnalysisFacade::default().run(&config, &history).unwrap();
/// assert_eq!(result.base_final_returns().len(), 1_000);
/// assert_eq!(result.tail_shift().len(), 3);
/// assert!((0.0..=100.0).contains(&result.risk_state().composite));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AnalysisFacade {
    analyzer: PercentileAnalyzer,
    scorer: RiskStateScorer,
}

impl AnalysisFacade {
    /// Creates a facade with custom analyzers.
    pub fn new(analyzer: PercentileAnalyzer, scorer: RiskStateScorer) -> Self {
        Self { analyzer, scorer }
    }

    /// Analyses `history` under `config`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` / `Simulation` if the configuration is out of range
    /// - `InsufficientData` if `history` is shorter than `historical_window`
    /// - `NumericOverflow` if every base-scenario path is non-finite
    pub fn run(
        &self,
        config: &AnalysisConfig,
        history: &PriceHistory,
    ) -> Result<AnalysisResult, AnalysisError> {
        config.validate()?;
        let ladder = StressLadder::new(config.stress_multipliers.clone())?;

        let estimator = StatisticsEstimator::new(config.historical_window, config.drift()?)?;
        let statistics = estimator.estimate(history)?;
        info!(
            symbol = %config.symbol,
            volatility = statistics.volatility,
            drift = statistics.drift,
            drift_mode = statistics.drift_mode.label(),
            observations = statistics.observations,
            "Estimated historical statistics"
        );

        let (starting_price, price_source) = match config.custom_price {
            Some(price) => (price, PriceSource::Custom),
            None => (
                history.last_close().ok_or(AnalysisError::InsufficientData {
                    required: 1,
                    available: 0,
                })?,
                PriceSource::LastClose,
            ),
        };

        let simulation = SimulationConfig::builder()
            .starting_price(starting_price)
            .drift(statistics.drift)
            .volatility(statistics.volatility)
            .horizon(config.days_to_simulate)
            .num_paths(config.num_simulations)
            .degrees_of_freedom(config.degrees_of_freedom)
            .ewma_decay(config.ewma_decay)
            .jump_probability(config.jump_prob)
            .jump_magnitude(config.jump_magnitude)
            .seed(config.seed)
            .build()?;

        let simulator = PathSimulator::new(simulation.clone())?;
        let ladder_result = simulator.run_ladder(&ladder)?;
        info!(
            scenarios = ladder_result.len(),
            num_paths = simulation.num_paths(),
            horizon = simulation.horizon(),
            "Stress ladder complete"
        );

        let base = &ladder_result.base().ensemble;
        if base.has_non_finite() {
            warn!(
                affected = base.non_finite_paths(),
                total = base.num_paths(),
                "Excluding non-finite paths from percentile analysis"
            );
        }
        let percentiles = self.analyzer.ensemble_table(base)?;
        let metrics = self.analyzer.ensemble_metrics(base)?;
        info!(
            var95 = metrics.var95,
            cvar95 = metrics.cvar95,
            var99 = metrics.var99,
            cvar99 = metrics.cvar99,
            "Computed risk metrics"
        );

        let risk_state = self
            .scorer
            .score(&history.daily_returns(), base.final_returns(), &metrics);
        info!(
            composite = risk_state.composite,
            regime = risk_state.regime.label(),
            "Scored risk state"
        );

        let tail_shift = tail_shift_table(&ladder_result);
        let capital = CapitalAtRisk::new(
            config.starting_capital,
            config.max_tolerable_loss_pct,
            &metrics,
            base.final_returns(),
        );
        let guide = strike_guide(&percentiles, starting_price, base.final_returns());
        let target = config
            .target_price
            .map(|price| TargetPriceAnalysis::new(price, base.final_prices(), &percentiles))
            .transpose()?;
        let bands = PathBands::from_ensemble(base);

        let base_final_prices = base.final_prices().to_vec();
        let base_final_returns = base.final_returns().to_vec();
        let non_finite_paths = base.non_finite_paths();

        Ok(AnalysisResult {
            config: config.clone(),
            simulation,
            statistics,
            starting_price,
            price_source,
            ladder: ladder_result,
            base_final_prices,
            base_final_returns,
            non_finite_paths,
            percentiles,
            metrics,
            risk_state,
            tail_shift,
            capital,
            strike_guide: guide,
            target,
            bands,
        })
    }
}
