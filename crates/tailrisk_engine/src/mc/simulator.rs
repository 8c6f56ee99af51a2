//! Path simulator: Student-t shocks, EWMA volatility and jump overlay.

use rand_distr::StudentT;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::config::SimulationConfig;
use super::ensemble::PathEnsemble;
use super::error::ConfigError;
use super::ladder::{StressLadder, StressLadderResult, StressScenario};
use super::workspace::SimulationWorkspace;
use crate::rng::SimRng;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Monte Carlo path simulator.
///
/// Holds a validated [`SimulationConfig`] and the shock distribution built
/// from it. Each call to [`simulate`](Self::simulate) owns its own RNG, so a
/// simulator can be shared across threads.
///
/// # Examples
///
/// ```rust
/// use tailrisk_engine::mc::{PathSimulator, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .starting_price(100.0)
///     .volatility(0.25)
///     .horizon(30)
///     .num_paths(2_000)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let simulator = PathSimulator::new(config).unwrap();
/// let first = simulator.simulate();
/// let second = simulator.simulate();
///
/// // Same seed, same ensemble.
/// assert_eq!(first, second);
/// assert_eq!(first.final_returns().len(), 2_000);
/// ```
#[derive(Clone, Debug)]
pub struct PathSimulator {
    config: SimulationConfig,
    shock_distribution: StudentT<f64>,
    shock_scale: f64,
}

impl PathSimulator {
    /// Creates a simulator for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` if the configuration fails
    /// validation or the Student-t distribution cannot be constructed.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let df = config.degrees_of_freedom();
        let shock_distribution = StudentT::new(df).map_err(|e| ConfigError::InvalidParameter {
            name: "degrees_of_freedom",
            value: e.to_string(),
        })?;
        // Student-t variance is df / (df − 2); rescale to unit variance.
        let shock_scale = ((df - 2.0) / df).sqrt();

        Ok(Self {
            config,
            shock_distribution,
            shock_scale,
        })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generates one ensemble at the configured volatility using the
    /// master seed.
    pub fn simulate(&self) -> PathEnsemble {
        let mut rng = SimRng::from_seed(self.config.seed());
        self.generate(self.config.volatility(), &mut rng)
    }

    /// Runs every scenario of `ladder` in parallel.
    ///
    /// The 1.0 scenario uses the master seed and is therefore identical to
    /// [`simulate`](Self::simulate). Each other scenario draws from its own
    /// stream derived from the master seed, so results do not depend on
    /// thread scheduling.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` if a stressed volatility is
    /// not finite.
    pub fn run_ladder(&self, ladder: &StressLadder) -> Result<StressLadderResult, ConfigError> {
        let seed = self.config.seed();
        let plan = ladder
            .multipliers()
            .iter()
            .enumerate()
            .map(|(position, &multiplier)| {
                let volatility = self.config.volatility() * multiplier;
                // Validates the stressed volatility.
                self.config.with_volatility(volatility)?;
                let stream = if position == ladder.base_index() {
                    0
                } else {
                    position as u64 + 1
                };
                Ok((multiplier, volatility, stream))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        debug!(
            scenarios = plan.len(),
            num_paths = self.config.num_paths(),
            horizon = self.config.horizon(),
            "Running stress ladder"
        );

        let scenarios: Vec<StressScenario> = plan
            .into_par_iter()
            .map(|(multiplier, volatility, stream)| {
                let mut rng = SimRng::for_stream(seed, stream);
                StressScenario {
                    multiplier,
                    volatility,
                    ensemble: self.generate(volatility, &mut rng),
                }
            })
            .collect();

        Ok(StressLadderResult::new(scenarios, ladder.base_index()))
    }

    fn generate(&self, volatility: f64, rng: &mut SimRng) -> PathEnsemble {
        let config = &self.config;
        let n = config.num_paths();
        let horizon = config.horizon();
        let start = config.starting_price();
        let daily_drift = config.drift() / TRADING_DAYS_PER_YEAR;
        let lambda = config.ewma_decay();
        let jump_probability = config.jump_probability();
        let jump_magnitude = config.jump_magnitude();

        debug!(
            num_paths = n,
            horizon,
            volatility,
            seed = rng.seed(),
            "Simulating price paths"
        );

        let mut prices = vec![0.0; n * horizon];
        let mut workspace = SimulationWorkspace::new(n);
        workspace.reset_sigma(volatility / TRADING_DAYS_PER_YEAR.sqrt());

        for t in 0..horizon {
            let shocks = workspace.shocks_mut();
            rng.fill_from(&self.shock_distribution, shocks);
            for z in shocks.iter_mut() {
                *z *= self.shock_scale;
            }
            if jump_probability > 0.0 {
                rng.fill_uniform(workspace.uniforms_mut());
            }

            let (done, rest) = prices.split_at_mut(t * n);
            let row = &mut rest[..n];
            let prev_row = if t == 0 { None } else { Some(&done[(t - 1) * n..]) };

            let (shocks, uniforms, sigma, prev_shocks) = workspace.rows_mut();
            for j in 0..n {
                if t > 0 {
                    let s = sigma[j];
                    let innovation = s * prev_shocks[j];
                    sigma[j] = (lambda * s * s + (1.0 - lambda) * innovation * innovation).sqrt();
                }
                let mut r = daily_drift + sigma[j] * shocks[j];
                if jump_probability > 0.0 && uniforms[j] < jump_probability {
                    r += jump_magnitude;
                }
                let prev = prev_row.map_or(start, |p| p[j]);
                row[j] = prev * (1.0 + r);
                prev_shocks[j] = shocks[j];
            }
        }

        let ensemble = PathEnsemble::from_parts(horizon, n, start, volatility, prices);
        if ensemble.has_non_finite() {
            warn!(
                non_finite = ensemble.non_finite_paths(),
                total = n,
                volatility,
                "Simulation produced non-finite terminal prices"
            );
        }
        ensemble
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config(volatility: f64, jump_probability: f64) -> SimulationConfig {
        SimulationConfig::builder()
            .starting_price(100.0)
            .drift(0.04)
            .volatility(volatility)
            .horizon(20)
            .num_paths(500)
            .jump_probability(jump_probability)
            .seed(11)
            .build()
            .unwrap()
    }

    #[test]
    fn test_zero_volatility_follows_drift() {
        let simulator = PathSimulator::new(config(0.0, 0.0)).unwrap();
        let ensemble = simulator.simulate();
        let expected = 100.0 * (1.0 + 0.04 / 252.0f64).powi(20);
        for &p in ensemble.final_prices() {
            assert_relative_eq!(p, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_certain_jump_with_zero_volatility() {
        let simulator = PathSimulator::new(config(0.0, 1.0)).unwrap();
        let ensemble = simulator.simulate();
        let daily: f64 = 0.04 / 252.0 - 0.04;
        let expected = 100.0 * (1.0 + daily).powi(20);
        for &p in ensemble.final_prices() {
            assert_relative_eq!(p, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_first_day_uses_base_volatility() {
        // With a single day there is no EWMA update, so day-1 returns are
        // drift + base daily sigma × scaled shock.
        let cfg = SimulationConfig::builder()
            .starting_price(100.0)
            .volatility(0.3)
            .horizon(1)
            .num_paths(50_000)
            .jump_probability(0.0)
            .build()
            .unwrap();
        let ensemble = PathSimulator::new(cfg).unwrap().simulate();
        let returns: Vec<f64> = ensemble.final_returns().iter().map(|r| r / 100.0).collect();
        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let std = (returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();
        let expected = 0.3 / 252f64.sqrt();
        assert!((std / expected - 1.0).abs() < 0.05, "std {} vs {}", std, expected);
    }

    #[test]
    fn test_paths_start_from_starting_price() {
        let simulator = PathSimulator::new(config(0.2, 0.02)).unwrap();
        let ensemble = simulator.simulate();
        let day0 = ensemble.day_prices(0).unwrap();
        // One day of moves cannot take a 20%-vol path far from the start.
        assert!(day0.iter().all(|&p| p > 70.0 && p < 130.0));
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = PathSimulator::new(config(0.2, 0.02)).unwrap().simulate();
        let cfg = SimulationConfig::builder()
            .starting_price(100.0)
            .drift(0.04)
            .volatility(0.2)
            .horizon(20)
            .num_paths(500)
            .seed(12)
            .build()
            .unwrap();
        let b = PathSimulator::new(cfg).unwrap().simulate();
        assert_ne!(a.final_prices(), b.final_prices());
    }

    #[test]
    fn test_ladder_base_matches_simulate() {
        let simulator = PathSimulator::new(config(0.25, 0.02)).unwrap();
        let result = simulator.run_ladder(&StressLadder::default()).unwrap();
        assert_eq!(result.base().ensemble, simulator.simulate());
        assert_eq!(result.base().multiplier, 1.0);
    }
}
