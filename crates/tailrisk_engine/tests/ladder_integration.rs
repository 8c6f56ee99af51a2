//! Integration tests for the simulator and stress ladder.
//!
//! These tests exercise the public API end to end:
//! - Reproducibility across runs and thread-pool sizes
//! - Volatility scaling between stress scenarios
//! - Degenerate (zero-volatility) collapse onto the drift path

use tailrisk_engine::{PathSimulator, SimulationConfig, StressLadder};

fn config(volatility: f64, jump_probability: f64, num_paths: usize) -> SimulationConfig {
    SimulationConfig::builder()
        .starting_price(100.0)
        .drift(0.04)
        .volatility(volatility)
        .horizon(90)
        .num_paths(num_paths)
        .jump_probability(jump_probability)
        .seed(42)
        .build()
        .unwrap()
}

fn sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_same_seed_same_ladder() {
    let simulator = PathSimulator::new(config(0.3, 0.02, 2_000)).unwrap();
    let ladder = StressLadder::default();
    let first = simulator.run_ladder(&ladder).unwrap();
    let second = simulator.run_ladder(&ladder).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_ladder_independent_of_thread_count() {
    let simulator = PathSimulator::new(config(0.3, 0.02, 2_000)).unwrap();
    let ladder = StressLadder::default();

    let parallel = simulator.run_ladder(&ladder).unwrap();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();
    let sequential = pool.install(|| simulator.run_ladder(&ladder)).unwrap();

    assert_eq!(parallel, sequential);
}

#[test]
fn test_ladder_order_does_not_change_base() {
    let simulator = PathSimulator::new(config(0.3, 0.02, 1_000)).unwrap();
    let forward = simulator.run_ladder(&StressLadder::default()).unwrap();
    let reversed = simulator
        .run_ladder(&StressLadder::new(vec![1.5, 1.25, 1.0]).unwrap())
        .unwrap();
    assert_eq!(forward.base(), reversed.base());
    assert_eq!(reversed.scenarios()[2].multiplier, 1.0);
}

// =============================================================================
// Scenario independence
// =============================================================================

#[test]
fn test_stressed_dispersion_scales_with_multiplier() {
    let simulator = PathSimulator::new(config(0.3, 0.0, 10_000)).unwrap();
    let result = simulator.run_ladder(&StressLadder::default()).unwrap();

    let base = sample_std(result.base().ensemble.final_returns());
    let stressed = result.get(1.25).unwrap();
    let ratio = sample_std(stressed.ensemble.final_returns()) / base;

    assert!((stressed.volatility - 0.375).abs() < 1e-12);
    assert!((ratio - 1.25).abs() < 0.1, "dispersion ratio {}", ratio);
}

#[test]
fn test_scenarios_use_distinct_streams() {
    let simulator = PathSimulator::new(config(0.3, 0.02, 500)).unwrap();
    let result = simulator.run_ladder(&StressLadder::default()).unwrap();

    // If scenarios shared a stream, the 1.5x paths would be an exact
    // rescaling of the base paths' shocks and the sign pattern of returns
    // would match path for path.
    let base = result.base().ensemble.final_returns();
    let stressed = result.get(1.5).unwrap().ensemble.final_returns();
    let same_sign = base
        .iter()
        .zip(stressed)
        .filter(|(a, b)| a.signum() == b.signum())
        .count();
    assert!(same_sign < 450, "{} of 500 paths share a sign", same_sign);
}

// =============================================================================
// Mean drift
// =============================================================================

#[test]
fn test_mean_terminal_return_matches_compounded_drift() {
    let simulator = PathSimulator::new(config(0.3, 0.0, 10_000)).unwrap();
    let ensemble = simulator.simulate();
    let returns = ensemble.final_returns();
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let expected = ((1.0 + 0.04 / 252.0f64).powi(90) - 1.0) * 100.0;
    assert!((mean - expected).abs() < 1.0, "mean {} vs {}", mean, expected);
}

// =============================================================================
// Degenerate volatility
// =============================================================================

#[test]
fn test_zero_volatility_collapses_every_scenario() {
    let simulator = PathSimulator::new(config(0.0, 0.0, 1_000)).unwrap();
    let result = simulator.run_ladder(&StressLadder::default()).unwrap();
    let expected = ((1.0 + 0.04 / 252.0f64).powi(90) - 1.0) * 100.0;

    for scenario in result.iter() {
        assert_eq!(scenario.volatility, 0.0);
        assert!(!scenario.ensemble.has_non_finite());
        for &r in scenario.ensemble.final_returns() {
            assert!((r - expected).abs() < 1e-9);
        }
    }
}
