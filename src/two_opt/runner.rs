//! 2-opt refinement loop.
//!
//! # Algorithm (first improvement)
//!
//! 1. Start from the given tour
//! 2. Each pass scans `(i, j)` in index order and applies the first
//!    segment reversal that shortens the tour by more than the tolerance
//! 3. A pass that applies a move resets the no-improve counter; a pass
//!    that finds none increments it
//! 4. Stop once the counter reaches `max_no_improve`
//!
//! # Reference
//!
//! Croes, G. A. (1958). "A method for solving traveling-salesman problems",
//! *Operations Research* 6(6), 791-812.

use log::{debug, trace};

use super::config::TwoOptConfig;
use super::types::first_improving_move;
use crate::error::Result;
use crate::metrics::tour_length;
use crate::tour::Tour;

/// Result of a 2-opt run.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoOptResult {
    /// Refined tour.
    pub best: Tour,
    /// Length of the refined tour.
    pub best_length: f64,
    /// Length of the input tour.
    pub initial_length: f64,
    /// Passes counted toward termination, improving or not.
    pub passes: usize,
    /// Number of accepted moves.
    pub improving_moves: usize,
    /// Tour length before the first move and after every accepted move.
    pub length_history: Vec<f64>,
}

/// 2-opt local search runner.
pub struct TwoOptRunner;

impl TwoOptRunner {
    /// Refines `tour` until `config.max_no_improve` consecutive passes
    /// find no improving move.
    ///
    /// The result is never longer than the input and is a permutation of
    /// it.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidConfig`](crate::TspError::InvalidConfig) when
    /// `config` fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use som_tsp::two_opt::{TwoOptConfig, TwoOptRunner};
    /// use som_tsp::{City, Tour};
    ///
    /// // Crossed square.
    /// let tour = Tour::new(vec![
    ///     City::new(0.0, 0.0),
    ///     City::new(1.0, 1.0),
    ///     City::new(1.0, 0.0),
    ///     City::new(0.0, 1.0),
    /// ]);
    /// let result = TwoOptRunner::run(&tour, &TwoOptConfig::default()).unwrap();
    /// assert!((result.best_length - 4.0).abs() < 1e-9);
    /// ```
    pub fn run(tour: &Tour, config: &TwoOptConfig) -> Result<TwoOptResult> {
        config.validate()?;

        let mut best = tour.clone();
        let initial_length = tour.length();
        let mut best_length = initial_length;
        let mut length_history = vec![initial_length];
        let mut improving_moves = 0usize;
        let mut passes = 0usize;
        let mut no_improve = 0usize;

        while no_improve < config.max_no_improve {
            passes += 1;

            match first_improving_move(&best) {
                Some(mv) => {
                    mv.apply(best.cities_mut());
                    // Re-sum instead of accumulating deltas to avoid drift.
                    best_length = tour_length(&best);
                    improving_moves += 1;
                    length_history.push(best_length);
                    no_improve = 0;
                    trace!(
                        "2-opt: reversed [{}, {}), length {:.6}",
                        mv.i,
                        mv.j,
                        best_length
                    );
                }
                None => {
                    // The tour is unchanged, so every remaining pass would
                    // repeat this empty scan.
                    passes += config.max_no_improve - no_improve - 1;
                    no_improve = config.max_no_improve;
                }
            }
        }

        debug!(
            "2-opt: {} moves over {} passes, {:.3} -> {:.3}",
            improving_moves, passes, initial_length, best_length
        );

        Ok(TwoOptResult {
            best,
            best_length,
            initial_length,
            passes,
            improving_moves,
            length_history,
        })
    }
}
