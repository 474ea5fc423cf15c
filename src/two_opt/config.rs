//! 2-opt configuration.

use crate::error::{Result, TspError};

/// Configuration for the 2-opt refiner.
///
/// # Examples
///
/// ```
/// use som_tsp::two_opt::TwoOptConfig;
///
/// let config = TwoOptConfig::default().with_max_no_improve(3);
/// assert_eq!(config.max_no_improve, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptConfig {
    /// Consecutive passes without an improving move before stopping.
    pub max_no_improve: usize,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self { max_no_improve: 5 }
    }
}

impl TwoOptConfig {
    /// Sets the number of consecutive non-improving passes that ends the
    /// search.
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_no_improve == 0 {
            return Err(TspError::InvalidConfig(
                "max_no_improve must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
