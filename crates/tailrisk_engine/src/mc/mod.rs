//! # Monte Carlo Path Simulation
//!
//! Forward price-path generation under a fat-tailed, volatility-clustered,
//! jump-augmented return model.
//!
//! ## Model
//!
//! For each path and day `t`:
//!
//! ```text
//! z_t   ~ Student-t(df) × sqrt((df − 2) / df)
//! σ_0   = σ
//! σ_t²  = λ σ_{t−1}² + (1 − λ) (σ_{t−1} z_{t−1})²
//! r_t   = μ / 252 + σ_t / √252 × z_t + J_t
//! S_t   = S_{t−1} (1 + r_t)
//! ```
//!
//! where `J_t` equals the jump magnitude with probability `p` and zero
//! otherwise.
//!
//! ## Components
//!
//! - [`SimulationConfig`]: validated parameters with fluent builder
//! - [`PathSimulator`]: single-ensemble generation
//! - [`StressLadder`]: volatility multipliers run in parallel
//! - [`PathEnsemble`]: day-major price matrix plus terminal summaries

mod config;
mod ensemble;
mod error;
mod ladder;
mod simulator;
mod workspace;

pub use config::{SimulationConfig, SimulationConfigBuilder, MAX_CELLS, MAX_HORIZON, MAX_PATHS};
pub use ensemble::PathEnsemble;
pub use error::ConfigError;
pub use ladder::{StressLadder, StressLadderResult, StressScenario};
pub use simulator::PathSimulator;
pub use workspace::SimulationWorkspace;
