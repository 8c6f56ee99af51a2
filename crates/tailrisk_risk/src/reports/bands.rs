//! Per-day percentile bands of simulated prices (fan-chart data).

use rayon::prelude::*;
use tailrisk_core::math::stats::{percentile_sorted, sorted_finite};
use tailrisk_engine::PathEnsemble;

/// Percentiles tracked per day.
pub const BAND_PERCENTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Price percentiles per simulated day, normalised to 100 at the start.
///
/// `bands[k][t]` is percentile `percentiles[k]` on day `t + 1`. Days
/// where every path is non-finite hold `NaN`.
///
/// # Examples
///
/// ```
/// use tailrisk_engine::{PathSimulator, SimulationConfig};
/// use tailrisk_risk::reports::PathBands;
///
/// let config = SimulationConfig::builder()
///     .starting_price(250.0)
///     .volatility(0.2)
///     .horizon(10)
///     .num_paths(500)
///     .build()
///     .unwrap();
/// let ensemble = PathSimulator::new(config).unwrap().simulate();
///
/// let bands = PathBands::from_ensemble(&ensemble);
/// assert_eq!(bands.days(), 10);
/// assert!(bands.band(5.0).unwrap()[9] <= bands.band(95.0).unwrap()[9]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathBands {
    percentiles: Vec<f64>,
    bands: Vec<Vec<f64>>,
}

impl PathBands {
    /// Computes [`BAND_PERCENTILES`] for every day, one day per Rayon task.
    pub fn from_ensemble(ensemble: &PathEnsemble) -> Self {
        let start = ensemble.starting_price();
        let per_day: Vec<Vec<f64>> = (0..ensemble.horizon())
            .into_par_iter()
            .map(|t| {
                let normalised: Vec<f64> = ensemble
                    .day_prices(t)
                    .unwrap_or(&[])
                    .iter()
                    .map(|p| p / start * 100.0)
                    .collect();
                let sorted = sorted_finite(&normalised);
                BAND_PERCENTILES
                    .iter()
                    .map(|&p| percentile_sorted(&sorted, p))
                    .collect()
            })
            .collect();

        let bands = (0..BAND_PERCENTILES.len())
            .map(|k| per_day.iter().map(|day| day[k]).collect())
            .collect();

        Self {
            percentiles: BAND_PERCENTILES.to_vec(),
            bands,
        }
    }

    /// Percentiles in band order.
    #[inline]
    pub fn percentiles(&self) -> &[f64] {
        &self.percentiles
    }

    /// Number of simulated days.
    pub fn days(&self) -> usize {
        self.bands.first().map_or(0, Vec::len)
    }

    /// Series for an exact percentile, if tracked.
    pub fn band(&self, percentile: f64) -> Option<&[f64]> {
        self.percentiles
            .iter()
            .position(|&p| p == percentile)
            .map(|k| self.bands[k].as_slice())
    }
}
