//! Self-Organizing Map (SOM) tour construction.
//!
//! A ring of virtual nodes is repeatedly pulled toward randomly drawn
//! cities. Neighboring nodes on the ring are pulled along with the winner,
//! so the ring unfolds over the instance while keeping its 1-D order.
//! Reading the cities off in ring order yields a tour.
//!
//! # References
//!
//! - Kohonen, T. (1982), "Self-organized formation of topologically correct feature maps"
//! - Angéniol, de La Croix Vaubois & Le Texier (1988), "Self-organizing feature maps
//!   and the travelling salesman problem"

mod config;
mod extract;
mod runner;
mod types;

pub use config::{DecaySchedule, SomConfig};
pub use extract::extract_tour;
pub use runner::{SomResult, SomTrainer};
pub use types::{IndexSampler, Ring, MIN_RADIUS_SQUARED};
