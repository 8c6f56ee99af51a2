//! Simulated price paths and their terminal summaries.

/// Output of a single simulation run.
///
/// Prices are stored day-major: the price of path `j` at the end of day
/// `t` (0-based, `t < horizon`) lives at `prices[t * num_paths + j]`. The
/// starting price is not stored in the matrix.
///
/// Final returns are in percent: `(final / start − 1) × 100`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathEnsemble {
    horizon: usize,
    num_paths: usize,
    starting_price: f64,
    volatility: f64,
    prices: Vec<f64>,
    final_prices: Vec<f64>,
    final_returns: Vec<f64>,
    non_finite_paths: usize,
}

impl PathEnsemble {
    pub(crate) fn from_parts(
        horizon: usize,
        num_paths: usize,
        starting_price: f64,
        volatility: f64,
        prices: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(prices.len(), horizon * num_paths);
        let last_row = (horizon - 1) * num_paths;
        let final_prices = prices[last_row..last_row + num_paths].to_vec();
        let final_returns: Vec<f64> = final_prices
            .iter()
            .map(|&p| (p / starting_price - 1.0) * 100.0)
            .collect();
        let non_finite_paths = final_returns.iter().filter(|r| !r.is_finite()).count();

        Self {
            horizon,
            num_paths,
            starting_price,
            volatility,
            prices,
            final_prices,
            final_returns,
            non_finite_paths,
        }
    }

    /// Horizon in trading days.
    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Number of paths.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Price every path started from.
    #[inline]
    pub fn starting_price(&self) -> f64 {
        self.starting_price
    }

    /// Base annual volatility the ensemble was generated with.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Full day-major price matrix.
    #[inline]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Prices of every path at the end of day `day` (0-based).
    ///
    /// Returns `None` when `day >= horizon`.
    pub fn day_prices(&self, day: usize) -> Option<&[f64]> {
        if day >= self.horizon {
            return None;
        }
        let start = day * self.num_paths;
        Some(&self.prices[start..start + self.num_paths])
    }

    /// Price trajectory of a single path, day 1 to day `horizon`.
    ///
    /// Returns `None` when `path >= num_paths`.
    pub fn path(&self, path: usize) -> Option<Vec<f64>> {
        if path >= self.num_paths {
            return None;
        }
        Some(
            (0..self.horizon)
                .map(|t| self.prices[t * self.num_paths + path])
                .collect(),
        )
    }

    /// Terminal price of every path.
    #[inline]
    pub fn final_prices(&self) -> &[f64] {
        &self.final_prices
    }

    /// Terminal return of every path, in percent.
    #[inline]
    pub fn final_returns(&self) -> &[f64] {
        &self.final_returns
    }

    /// Number of paths whose terminal value is not finite.
    #[inline]
    pub fn non_finite_paths(&self) -> usize {
        self.non_finite_paths
    }

    /// Returns `true` if any terminal value overflowed.
    #[inline]
    pub fn has_non_finite(&self) -> bool {
        self.non_finite_paths > 0
    }
}
