//! SOM configuration and parameter decay schedules.

use crate::error::{Result, TspError};

/// How the learning rate and neighborhood radius shrink over training.
///
/// Both schedules interpolate from a start value at step `0` to an end
/// value at step `epochs - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecaySchedule {
    /// Linear interpolation:
    /// `start + (end - start) * t / max(1, epochs - 1)`.
    #[default]
    Linear,

    /// Geometric interpolation:
    /// `start * (end / start)^(t / max(1, epochs - 1))`.
    ///
    /// Shrinks fast early and slowly late. Both endpoints must be
    /// strictly positive.
    Exponential,
}

impl DecaySchedule {
    /// Value of a parameter decaying from `start` to `end` at step `t` of
    /// `epochs`.
    pub fn value(&self, t: usize, epochs: usize, start: f64, end: f64) -> f64 {
        let frac = t as f64 / epochs.saturating_sub(1).max(1) as f64;
        match self {
            DecaySchedule::Linear => start + (end - start) * frac,
            DecaySchedule::Exponential => start * (end / start).powf(frac),
        }
    }
}

/// Configuration for SOM ring training.
///
/// # Examples
///
/// ```
/// use som_tsp::som::{DecaySchedule, SomConfig};
///
/// let config = SomConfig::default()
///     .with_nodes(64)
///     .with_epochs(4000)
///     .with_learning_rate(0.8, 0.05)
///     .with_decay(DecaySchedule::Linear)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.node_count(10), 64);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SomConfig {
    /// Number of ring nodes. `None` picks `ceil(8 * sqrt(n))`.
    pub n_nodes: Option<usize>,

    /// Number of training steps (one random city each).
    pub epochs: usize,

    /// Learning rate at the first step.
    pub lr_start: f64,

    /// Learning rate at the last step.
    pub lr_end: f64,

    /// Neighborhood radius (in ring hops) at the first step.
    /// `None` picks half the node count.
    pub radius_start: Option<f64>,

    /// Neighborhood radius at the last step.
    pub radius_end: f64,

    /// Decay policy shared by learning rate and radius.
    pub decay: DecaySchedule,

    /// Seed of the city sampler.
    pub seed: u64,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            n_nodes: None,
            epochs: 100_000,
            lr_start: 0.8,
            lr_end: 0.05,
            radius_start: None,
            radius_end: 1.0,
            decay: DecaySchedule::default(),
            seed: 0,
        }
    }
}

impl SomConfig {
    pub fn with_nodes(mut self, n: usize) -> Self {
        self.n_nodes = Some(n);
        self
    }

    pub fn with_epochs(mut self, n: usize) -> Self {
        self.epochs = n;
        self
    }

    /// Sets the learning rate at the first and last step.
    pub fn with_learning_rate(mut self, start: f64, end: f64) -> Self {
        self.lr_start = start;
        self.lr_end = end;
        self
    }

    /// Sets the neighborhood radius at the first and last step.
    pub fn with_radius(mut self, start: f64, end: f64) -> Self {
        self.radius_start = Some(start);
        self.radius_end = end;
        self
    }

    pub fn with_decay(mut self, decay: DecaySchedule) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Ring size used for an instance of `n_cities` cities.
    pub fn node_count(&self, n_cities: usize) -> usize {
        self.n_nodes
            .unwrap_or_else(|| (8.0 * (n_cities as f64).sqrt()).ceil() as usize)
    }

    /// Initial neighborhood radius for a ring of `n_nodes` nodes.
    pub fn initial_radius(&self, n_nodes: usize) -> f64 {
        self.radius_start.unwrap_or(n_nodes as f64 / 2.0)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.n_nodes == Some(0) {
            return Err(invalid("n_nodes must be at least 1"));
        }
        for (name, v) in [("lr_start", self.lr_start), ("lr_end", self.lr_end)] {
            if !v.is_finite() || v < 0.0 {
                return Err(invalid(format!("{name} must be non-negative, got {v}")));
            }
        }
        if let Some(r) = self.radius_start {
            if !r.is_finite() || r < 0.0 {
                return Err(invalid(format!(
                    "radius_start must be non-negative, got {r}"
                )));
            }
        }
        if !self.radius_end.is_finite() || self.radius_end < 0.0 {
            return Err(invalid(format!(
                "radius_end must be non-negative, got {}",
                self.radius_end
            )));
        }
        if self.decay == DecaySchedule::Exponential {
            let start_ok = self.radius_start.is_none_or(|r| r > 0.0);
            if !start_ok || self.radius_end <= 0.0 {
                return Err(invalid("exponential decay requires positive radii"));
            }
            if self.lr_start <= 0.0 || self.lr_end <= 0.0 {
                return Err(invalid("exponential decay requires positive learning rates"));
            }
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> TspError {
    TspError::InvalidConfig(msg.into())
}
