//! Volatility stress ladder.
//!
//! A ladder is a list of multipliers applied to the base volatility. Each
//! multiplier yields one [`StressScenario`]; all other parameters and the
//! master seed are shared.

use super::ensemble::PathEnsemble;
use super::error::ConfigError;

/// Multipliers run when none are supplied.
const DEFAULT_MULTIPLIERS: [f64; 3] = [1.0, 1.25, 1.5];

/// Validated set of volatility multipliers.
///
/// Multipliers must be finite, positive and distinct, and exactly one
/// must equal `1.0`: that entry is the base scenario.
///
/// # Examples
///
/// ```rust
/// use tailrisk_engine::mc::StressLadder;
///
/// let ladder = StressLadder::default();
/// assert_eq!(ladder.multipliers(), &[1.0, 1.25, 1.5]);
/// assert_eq!(ladder.base_index(), 0);
///
/// assert!(StressLadder::new(vec![1.25, 1.5]).is_err());
/// assert!(StressLadder::new(vec![0.5, 1.0, 2.0]).is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StressLadder {
    multipliers: Vec<f64>,
    base_index: usize,
}

impl StressLadder {
    /// Validates and wraps `multipliers`, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidStressLadder` if the list is empty,
    /// contains a non-finite, non-positive or duplicate value, or does not
    /// contain `1.0`.
    pub fn new(multipliers: Vec<f64>) -> Result<Self, ConfigError> {
        if multipliers.is_empty() {
            return Err(ConfigError::InvalidStressLadder(
                "at least one multiplier is required".to_string(),
            ));
        }
        for (i, &m) in multipliers.iter().enumerate() {
            if !(m.is_finite() && m > 0.0) {
                return Err(ConfigError::InvalidStressLadder(format!(
                    "multiplier {} must be finite and positive",
                    m
                )));
            }
            if multipliers[..i].contains(&m) {
                return Err(ConfigError::InvalidStressLadder(format!(
                    "duplicate multiplier {}",
                    m
                )));
            }
        }
        let base_index = multipliers
            .iter()
            .position(|&m| m == 1.0)
            .ok_or_else(|| {
                ConfigError::InvalidStressLadder("multiplier 1.0 (base scenario) is required".to_string())
            })?;

        Ok(Self {
            multipliers,
            base_index,
        })
    }

    /// Multipliers in run order.
    #[inline]
    pub fn multipliers(&self) -> &[f64] {
        &self.multipliers
    }

    /// Position of the `1.0` multiplier.
    #[inline]
    pub fn base_index(&self) -> usize {
        self.base_index
    }

    /// Number of scenarios.
    #[inline]
    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    /// Always `false`; an empty ladder cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}

impl Default for StressLadder {
    fn default() -> Self {
        Self {
            multipliers: DEFAULT_MULTIPLIERS.to_vec(),
            base_index: 0,
        }
    }
}

/// One stress scenario and its ensemble.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StressScenario {
    /// Volatility multiplier.
    pub multiplier: f64,
    /// Base volatility × multiplier.
    pub volatility: f64,
    /// Simulated paths at that volatility.
    pub ensemble: PathEnsemble,
}

/// Ensembles for every multiplier, in ladder order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StressLadderResult {
    scenarios: Vec<StressScenario>,
    base_index: usize,
}

impl StressLadderResult {
    pub(crate) fn new(scenarios: Vec<StressScenario>, base_index: usize) -> Self {
        Self {
            scenarios,
            base_index,
        }
    }

    /// The `1.0` scenario.
    #[inline]
    pub fn base(&self) -> &StressScenario {
        &self.scenarios[self.base_index]
    }

    /// Scenario for an exact multiplier, if present.
    pub fn get(&self, multiplier: f64) -> Option<&StressScenario> {
        self.scenarios.iter().find(|s| s.multiplier == multiplier)
    }

    /// Scenarios in ladder order.
    #[inline]
    pub fn scenarios(&self) -> &[StressScenario] {
        &self.scenarios
    }

    /// Iterates scenarios in ladder order.
    pub fn iter(&self) -> impl Iterator<Item = &StressScenario> {
        self.scenarios.iter()
    }

    /// Number of scenarios.
    #[inline]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Returns `true` if there are no scenarios.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_ladders() {
        for bad in [
            vec![],
            vec![1.25],
            vec![1.0, 1.0],
            vec![1.0, -1.0],
            vec![1.0, f64::NAN],
            vec![1.0, 0.0],
        ] {
            assert!(
                matches!(StressLadder::new(bad.clone()), Err(ConfigError::InvalidStressLadder(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_base_index_follows_position() {
        let ladder = StressLadder::new(vec![2.0, 1.5, 1.0]).unwrap();
        assert_eq!(ladder.base_index(), 2);
        assert_eq!(ladder.len(), 3);
        assert!(!ladder.is_empty());
    }

    #[test]
    fn test_default_matches_new() {
        assert_eq!(
            StressLadder::default(),
            StressLadder::new(vec![1.0, 1.25, 1.5]).unwrap()
        );
    }
}
