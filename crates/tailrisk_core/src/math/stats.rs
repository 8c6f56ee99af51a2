//! Sample statistics and empirical quantiles.
//!
//! Quantiles use linear interpolation between closest ranks
//! (`idx = p × (n − 1)`), the same convention as the default estimator of
//! most numerical libraries. Slices passed to the `_sorted` variants must
//! already be sorted ascending and free of non-finite values.

use std::cmp::Ordering;

/// Day-over-day simple returns `p[i] / p[i-1] - 1`.
///
/// Returns an empty vector for fewer than two prices.
///
/// # Examples
///
/// ```
/// use tailrisk_core::math::stats::simple_returns;
///
/// let r = simple_returns(&[100.0, 105.0, 94.5]);
/// assert!((r[0] - 0.05).abs() < 1e-12);
/// assert!((r[1] + 0.10).abs() < 1e-12);
/// ```
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator).
///
/// Returns exactly `0.0` when every value is identical, so a flat series
/// never reports rounding noise as volatility. `NaN` for fewer than two
/// values.
///
/// # Examples
///
/// ```
/// use tailrisk_core::math::stats::sample_std;
///
/// assert_eq!(sample_std(&[0.1, 0.1, 0.1]), 0.0);
/// assert!((sample_std(&[1.0, 2.0, 3.0, 4.0]) - 1.2909944487358056).abs() < 1e-12);
/// assert!(sample_std(&[1.0]).is_nan());
/// ```
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let first = values[0];
    if values.iter().all(|&v| v == first) {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|&v| (v - m) * (v - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Sorts a copy of `values` ascending, dropping non-finite entries.
pub fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    finite.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    finite
}

/// Empirical percentile (`p` in [0, 100]) of an ascending slice using
/// linear interpolation. `NaN` for an empty slice.
///
/// # Examples
///
/// ```
/// use tailrisk_core::math::stats::percentile_sorted;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(percentile_sorted(&sorted, 50.0), 3.0);
/// assert!((percentile_sorted(&sorted, 5.0) - 1.2).abs() < 1e-12);
/// assert_eq!(percentile_sorted(&sorted, 100.0), 5.0);
/// ```
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }
    let idx = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi || hi >= n {
        return sorted[lo.min(n - 1)];
    }
    let w = idx - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * w
}

/// Empirical percentile of unsorted data; non-finite values are ignored.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    percentile_sorted(&sorted_finite(values), p)
}

/// Percentage (0–100) of `values` at or below `threshold`.
///
/// `NaN` for an empty slice.
///
/// # Examples
///
/// ```
/// use tailrisk_core::math::stats::fraction_at_or_below;
///
/// let prices = [90.0, 95.0, 100.0, 105.0, 110.0];
/// assert_eq!(fraction_at_or_below(&prices, 95.0), 40.0);
/// ```
pub fn fraction_at_or_below(values: &[f64], threshold: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let count = values.iter().filter(|&&v| v <= threshold).count();
    count as f64 / values.len() as f64 * 100.0
}

/// Clamps to [0, 1]; `NaN` maps to 0.
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Linear map of `x` from `[lo, hi]` onto [0, 1], saturating outside the range.
///
/// # Examples
///
/// ```
/// use tailrisk_core::math::stats::normalise_clamped;
///
/// assert!((normalise_clamped(1.1, 0.7, 1.5) - 0.5).abs() < 1e-12);
/// assert_eq!(normalise_clamped(3.0, 0.7, 1.5), 1.0);
/// assert_eq!(normalise_clamped(-3.0, 0.7, 1.5), 0.0);
/// ```
#[inline]
pub fn normalise_clamped(x: f64, lo: f64, hi: f64) -> f64 {
    clamp_unit((x - lo) / (hi - lo))
}
