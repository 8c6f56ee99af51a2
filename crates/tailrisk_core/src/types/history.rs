//! Immutable, date-ordered close-price history.
//!
//! A [`PriceHistory`] is validated once at construction: dates are strictly
//! increasing and every close is a finite positive number. All downstream
//! consumers can therefore rely on those invariants without re-checking.

use super::error::EstimationError;
use super::time::Date;

/// A single (date, close) observation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePoint {
    /// Observation date.
    pub date: Date,
    /// Closing price (strictly positive).
    pub close: f64,
}

impl PricePoint {
    /// Creates a new observation.
    #[inline]
    pub fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

/// Ordered sequence of daily closes.
///
/// # Examples
///
/// ```
/// use tailrisk_core::types::{Date, PriceHistory, PricePoint};
///
/// let d0 = Date::from_ymd(2024, 1, 2).unwrap();
/// let history = PriceHistory::new(vec![
///     PricePoint::new(d0, 100.0),
///     PricePoint::new(d0.add_days(1), 102.0),
/// ])
/// .unwrap();
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.last_close(), Some(102.0));
///
/// // Dates must be strictly increasing.
/// let unordered = PriceHistory::new(vec![
///     PricePoint::new(d0, 100.0),
///     PricePoint::new(d0, 101.0),
/// ]);
/// assert!(unordered.is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceHistory {
    points: Vec<PricePoint>,
}

impl PriceHistory {
    /// Builds a history from observations, validating ordering and prices.
    ///
    /// # Errors
    ///
    /// Returns `EstimationError::InvalidHistory` if dates are not strictly
    /// increasing or any close is non-positive or non-finite.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, EstimationError> {
        for (idx, point) in points.iter().enumerate() {
            if !(point.close.is_finite() && point.close > 0.0) {
                return Err(EstimationError::InvalidHistory(format!(
                    "close {} on {} must be finite and positive",
                    point.close, point.date
                )));
            }
            if idx > 0 && point.date <= points[idx - 1].date {
                return Err(EstimationError::InvalidHistory(format!(
                    "dates must be strictly increasing: {} follows {}",
                    point.date,
                    points[idx - 1].date
                )));
            }
        }
        Ok(Self { points })
    }

    /// Builds a history from closes on consecutive weekdays starting at `start`.
    ///
    /// Convenient for synthetic or already-aligned series where only the
    /// ordering of dates matters.
    pub fn from_closes(start: Date, closes: &[f64]) -> Result<Self, EstimationError> {
        let mut date = if start.is_weekend() {
            start.next_weekday()
        } else {
            start
        };
        let mut points = Vec::with_capacity(closes.len());
        for &close in closes {
            points.push(PricePoint::new(date, close));
            date = date.next_weekday();
        }
        Self::new(points)
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when the history holds no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All observations in date order.
    #[inline]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Most recent close, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// Date of the first and last observation.
    pub fn date_range(&self) -> Option<(Date, Date)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }

    /// The trailing `window` observations.
    ///
    /// # Errors
    ///
    /// Returns `EstimationError::InsufficientData` when fewer than `window`
    /// observations exist.
    pub fn trailing(&self, window: usize) -> Result<&[PricePoint], EstimationError> {
        if window > self.points.len() {
            return Err(EstimationError::InsufficientData {
                required: window,
                available: self.points.len(),
            });
        }
        Ok(&self.points[self.points.len() - window..])
    }

    /// Day-over-day simple returns across the whole history (fractions, not %).
    pub fn daily_returns(&self) -> Vec<f64> {
        crate::math::stats::simple_returns(&self.closes())
    }
}
