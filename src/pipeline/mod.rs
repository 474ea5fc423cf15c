//! End-to-end runs: load an instance, build a SOM tour, optionally refine
//! it with 2-opt, measure both, and hand the results to a reporter.
//!
//! Instance parsing and presentation are collaborators injected through
//! [`InstanceLoader`] and [`Reporter`]; this module holds no global state.

mod runner;
mod types;

pub use runner::Pipeline;
pub use types::{Instance, InstanceLoader, LogReporter, Reporter, RunReport, StageReport};
