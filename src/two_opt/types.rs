//! 2-opt moves.

use crate::geometry::{distance, City};

/// Minimum length reduction for a move to count as improving. Smaller
/// gains are treated as floating-point noise.
pub const IMPROVEMENT_TOLERANCE: f64 = 1e-9;

/// Reversal of the tour segment `[i, j)`.
///
/// Replaces edges `(i-1, i)` and `(j-1, j mod n)` with `(i-1, j-1)` and
/// `(i, j mod n)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOptMove {
    /// First position of the reversed segment.
    pub i: usize,
    /// One past the last position of the reversed segment.
    pub j: usize,
    /// Change in closed tour length; negative when the move shortens it.
    pub delta: f64,
}

impl TwoOptMove {
    /// Evaluates the reversal of `[i, j)` on `tour`.
    ///
    /// Requires `1 <= i < j <= tour.len()`.
    pub fn evaluate(tour: &[City], i: usize, j: usize) -> Self {
        let n = tour.len();
        let a = &tour[i - 1];
        let b = &tour[i];
        let c = &tour[j - 1];
        let e = &tour[j % n];
        let delta = (distance(a, c) + distance(b, e)) - (distance(a, b) + distance(c, e));
        Self { i, j, delta }
    }

    /// Whether the move shortens the tour by more than
    /// [`IMPROVEMENT_TOLERANCE`].
    pub fn is_improving(&self) -> bool {
        self.delta < -IMPROVEMENT_TOLERANCE
    }

    /// Applies the reversal in place.
    pub fn apply(&self, tour: &mut [City]) {
        tour[self.i..self.j].reverse();
    }
}

/// First improving move in scan order, or `None` at a 2-opt local optimum.
///
/// Scans `i` in `1..n-2` and `j` in `i+2..n` (reversing a single city is
/// a no-op, so `j = i + 1` is skipped).
pub fn first_improving_move(tour: &[City]) -> Option<TwoOptMove> {
    let n = tour.len();
    for i in 1..n.saturating_sub(2) {
        for j in (i + 2)..n {
            let mv = TwoOptMove::evaluate(tour, i, j);
            if mv.is_improving() {
                return Some(mv);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::tour_length;

    fn crossing_square() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(1.0, 1.0),
            City::new(1.0, 0.0),
            City::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_delta_matches_full_recompute() {
        let tour = vec![
            City::new(0.0, 0.0),
            City::new(4.0, 3.0),
            City::new(1.0, 5.0),
            City::new(6.0, 1.0),
            City::new(2.0, 2.0),
            City::new(5.0, 5.0),
        ];
        let before = tour_length(&tour);
        for i in 1..tour.len() - 2 {
            for j in (i + 2)..=tour.len() {
                let mv = TwoOptMove::evaluate(&tour, i, j);
                let mut moved = tour.clone();
                mv.apply(&mut moved);
                let after = tour_length(&moved);
                assert!(
                    (after - before - mv.delta).abs() < 1e-9,
                    "delta mismatch at ({i}, {j})"
                );
            }
        }
    }

    #[test]
    fn test_first_move_uncrosses_square() {
        let mut tour = crossing_square();
        let mv = first_improving_move(&tour).unwrap();
        assert_eq!((mv.i, mv.j), (1, 3));
        mv.apply(&mut tour);
        assert!((tour_length(&tour) - 4.0).abs() < 1e-12);
        assert!(first_improving_move(&tour).is_none());
    }

    #[test]
    fn test_small_tours_have_no_moves() {
        assert!(first_improving_move(&[]).is_none());
        assert!(first_improving_move(&[City::new(0.0, 0.0)]).is_none());
        let three = [City::new(0.0, 0.0), City::new(5.0, 0.0), City::new(0.0, 5.0)];
        assert!(first_improving_move(&three).is_none());
    }

    #[test]
    fn test_whole_tail_reversal_is_not_improving() {
        // Reversing [1, n) only flips the direction of travel.
        let tour = crossing_square();
        let mv = TwoOptMove::evaluate(&tour, 1, tour.len());
        assert!(!mv.is_improving());
        assert!(mv.delta.abs() < 1e-12);
    }
}
