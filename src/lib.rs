//! Heuristic tours for the planar Euclidean Traveling Salesman Problem.
//!
//! - **SOM construction** ([`som`]): a ring of virtual nodes learns an
//!   ordering of the cities through stochastic competitive updates with
//!   decaying learning rate and neighborhood radius.
//! - **2-opt refinement** ([`two_opt`]): first-improvement segment
//!   reversal until a run of passes finds nothing better.
//! - **Metrics** ([`metrics`]): closed tour length and percentage gap
//!   against a reference tour.
//! - **Pipeline** ([`pipeline`]): construction, refinement and
//!   measurement wired together, with loading and reporting injected.
//!
//! # Example
//!
//! ```
//! use som_tsp::som::{SomConfig, SomTrainer};
//! use som_tsp::two_opt::{TwoOptConfig, TwoOptRunner};
//! use som_tsp::City;
//!
//! let cities = vec![
//!     City::new(0.0, 0.0),
//!     City::new(1.0, 1.0),
//!     City::new(1.0, 0.0),
//!     City::new(0.0, 1.0),
//! ];
//! let som = SomTrainer::train(&cities, &SomConfig::default().with_epochs(1000)).unwrap();
//! let refined = TwoOptRunner::run(&som.tour, &TwoOptConfig::default()).unwrap();
//! assert!(refined.best_length <= som.tour.length());
//! ```

pub mod error;
pub mod geometry;
pub mod metrics;
pub mod pipeline;
pub mod som;
pub mod tour;
pub mod two_opt;

pub use error::{Result, TspError};
pub use geometry::{distance, City};
pub use metrics::{gap, tour_length, TourMetrics};
pub use tour::Tour;
