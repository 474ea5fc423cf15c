//! Tour length and optimality gap.

use crate::error::{Result, TspError};
use crate::geometry::{distance, City};

/// Total length of a closed tour.
///
/// Sums `distance(T[i], T[i-1])` for every `i`, with index `-1` wrapping
/// to the last city. Tours with fewer than two cities have length 0.
pub fn tour_length(tour: &[City]) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }
    let closing = distance(&tour[0], &tour[tour.len() - 1]);
    tour.windows(2)
        .map(|w| distance(&w[1], &w[0]))
        .fold(closing, |acc, d| acc + d)
}

/// Percentage gap of `achieved` relative to `optimal`:
/// `100 * (achieved - optimal) / optimal`.
///
/// The result is signed; a negative gap means the achieved tour beat the
/// reference.
///
/// # Errors
///
/// [`TspError::DegenerateReference`] when `optimal` is not a positive,
/// finite number.
pub fn gap(optimal: f64, achieved: f64) -> Result<f64> {
    if !(optimal.is_finite() && optimal > 0.0) {
        return Err(TspError::DegenerateReference { length: optimal });
    }
    Ok(100.0 * (achieved - optimal) / optimal)
}

/// Length of a tour and, when a reference length is known, its gap.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TourMetrics {
    /// Closed tour length.
    pub length: f64,
    /// Percentage gap against the reference, if one was supplied.
    pub gap: Option<f64>,
}

impl TourMetrics {
    /// Measures `tour`, computing the gap against `reference_length` when
    /// one is given.
    ///
    /// # Errors
    ///
    /// Propagates [`gap`] failures for a degenerate reference.
    pub fn evaluate(tour: &[City], reference_length: Option<f64>) -> Result<Self> {
        let length = tour_length(tour);
        let gap = reference_length.map(|opt| gap(opt, length)).transpose()?;
        Ok(Self { length, gap })
    }
}
