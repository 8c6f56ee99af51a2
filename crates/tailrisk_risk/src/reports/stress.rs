//! Tail shift across the stress ladder.

use rayon::prelude::*;
use tailrisk_core::math::stats::{percentile_sorted, sorted_finite};
use tailrisk_engine::{StressLadderResult, StressScenario};
use tracing::warn;

use crate::tail::RiskMetrics;

/// Left-tail summary of one stress scenario.
///
/// The tail metrics are `None` when every path of the scenario overflowed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TailShiftRow {
    /// Volatility multiplier.
    pub multiplier: f64,
    /// Scenario volatility (base × multiplier).
    pub volatility: f64,
    /// Paths excluded for a non-finite terminal value.
    pub non_finite_paths: usize,
    /// 5th percentile terminal return, in percent.
    pub p5: Option<f64>,
    /// 1st percentile terminal return, in percent.
    pub p1: Option<f64>,
    /// Mean terminal return at or below `p5`.
    pub cvar95: Option<f64>,
}

impl TailShiftRow {
    /// Returns `true` if the scenario had at least one finite path.
    pub fn is_available(&self) -> bool {
        self.p5.is_some()
    }

    fn from_scenario(scenario: &StressScenario) -> Self {
        let ensemble = &scenario.ensemble;
        let sorted = sorted_finite(ensemble.final_returns());
        let cvar95 = RiskMetrics::from_sorted(&sorted).ok().map(|m| m.cvar95);
        if cvar95.is_none() {
            warn!(
                multiplier = scenario.multiplier,
                volatility = scenario.volatility,
                total = ensemble.num_paths(),
                "Stress scenario has no finite paths; tail shift unavailable"
            );
        }
        let percentile = |p: f64| cvar95.map(|_| percentile_sorted(&sorted, p));

        Self {
            multiplier: scenario.multiplier,
            volatility: scenario.volatility,
            non_finite_paths: ensemble.non_finite_paths(),
            p5: percentile(5.0),
            p1: percentile(1.0),
            cvar95,
        }
    }
}

/// Tabulates the left tail of every scenario, in ladder order.
///
/// Scenarios are summarised in parallel with Rayon. A scenario whose paths
/// all overflowed keeps its row with the tail metrics unset, so the other
/// scenarios are still reported.
pub fn tail_shift_table(ladder: &StressLadderResult) -> Vec<TailShiftRow> {
    ladder
        .scenarios()
        .par_iter()
        .map(TailShiftRow::from_scenario)
        .collect()
}
