//! Pre-allocated row buffers for the day-by-day simulation loop.
//!
//! The simulator advances every path by one day at a time, so scratch
//! storage only needs to hold a single row of length `num_paths`:
//! - `shocks`: scaled Student-t draws for the current day
//! - `uniforms`: jump-trigger uniforms for the current day
//! - `sigma`: per-path daily volatility state
//! - `prev_shocks`: the previous day's shocks, consumed by the EWMA update

/// Pre-allocated scratch rows for path simulation.
///
/// All allocations occur in [`new`](Self::new); the simulation loop works
/// on slices only.
///
/// # Examples
///
/// ```rust
/// use tailrisk_engine::mc::SimulationWorkspace;
///
/// let mut workspace = SimulationWorkspace::new(1_000);
/// assert_eq!(workspace.shocks_mut().len(), 1_000);
/// assert_eq!(workspace.num_paths(), 1_000);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationWorkspace {
    shocks: Vec<f64>,
    uniforms: Vec<f64>,
    sigma: Vec<f64>,
    prev_shocks: Vec<f64>,
    num_paths: usize,
}

impl SimulationWorkspace {
    /// Creates a workspace sized for `num_paths` paths.
    pub fn new(num_paths: usize) -> Self {
        Self {
            shocks: vec![0.0; num_paths],
            uniforms: vec![0.0; num_paths],
            sigma: vec![0.0; num_paths],
            prev_shocks: vec![0.0; num_paths],
            num_paths,
        }
    }

    /// Row length.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Resets the volatility state to `daily_sigma` on every path.
    pub fn reset_sigma(&mut self, daily_sigma: f64) {
        let n = self.num_paths;
        self.sigma[..n].fill(daily_sigma);
        self.prev_shocks[..n].fill(0.0);
    }

    /// Current-day shock row.
    #[inline]
    pub fn shocks_mut(&mut self) -> &mut [f64] {
        let n = self.num_paths;
        &mut self.shocks[..n]
    }

    /// Current-day jump uniform row.
    #[inline]
    pub fn uniforms_mut(&mut self) -> &mut [f64] {
        let n = self.num_paths;
        &mut self.uniforms[..n]
    }

    /// Splits the workspace into its rows for a single day's update:
    /// `(shocks, uniforms, sigma, prev_shocks)`.
    #[inline]
    pub fn rows_mut(&mut self) -> (&[f64], &[f64], &mut [f64], &mut [f64]) {
        let n = self.num_paths;
        (
            &self.shocks[..n],
            &self.uniforms[..n],
            &mut self.sigma[..n],
            &mut self.prev_shocks[..n],
        )
    }
}
