//! Error types.

use thiserror::Error;

/// Errors reported by the tour construction core.
///
/// Every variant is a caller error: the computation itself is
/// deterministic and has no transient failure modes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TspError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The reference tour has a zero (or non-finite) length, so a gap
    /// cannot be computed.
    #[error("reference tour length must be positive, got {length}")]
    DegenerateReference {
        /// The offending reference length.
        length: f64,
    },

    /// The reference tour does not visit the same number of cities as
    /// the instance.
    #[error("reference tour has {reference} cities but the instance has {cities}")]
    MismatchedReference {
        /// Number of cities in the instance.
        cities: usize,
        /// Number of cities in the reference tour.
        reference: usize,
    },
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, TspError>;
