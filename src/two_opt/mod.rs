//! 2-opt local search.
//!
//! Repeatedly reverses a tour segment whenever doing so shortens the
//! closed tour, taking the first improving reversal found in index order.
//! Segment lengths are evaluated from the two edges a reversal replaces,
//! so each candidate costs O(1).
//!
//! # References
//!
//! - Croes, G. A. (1958), "A method for solving traveling-salesman problems"
//! - Lin, S. (1965), "Computer solutions of the traveling salesman problem"

mod config;
mod runner;
mod types;

pub use config::TwoOptConfig;
pub use runner::{TwoOptResult, TwoOptRunner};
pub use types::{first_improving_move, TwoOptMove, IMPROVEMENT_TOLERANCE};
