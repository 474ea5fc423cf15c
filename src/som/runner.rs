//! SOM training loop.
//!
//! # Algorithm
//!
//! 1. Place `m` nodes on a circle of radius `0.5 * spread` around the
//!    centroid of the cities
//! 2. For each of `epochs` steps:
//!    a. Draw a city uniformly at random (with replacement)
//!    b. Find its best matching unit (nearest node)
//!    c. Decay the learning rate and neighborhood radius
//!    d. Pull every node toward the city, weighted by a Gaussian of its
//!    ring distance to the BMU
//! 3. Order the cities by the index of their nearest node
//!
//! # Reference
//!
//! Angéniol, B., de La Croix Vaubois, G. & Le Texier, J.-Y. (1988).
//! "Self-organizing feature maps and the travelling salesman problem",
//! *Neural Networks* 1(4), 289-293.

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::config::SomConfig;
use super::extract::extract_tour;
use super::types::{IndexSampler, Ring};
use crate::error::{Result, TspError};
use crate::geometry::{centroid, spread, City};
use crate::tour::Tour;

/// Result of a SOM training run.
#[derive(Debug, Clone, PartialEq)]
pub struct SomResult {
    /// Node positions after the last training step.
    pub ring: Ring,

    /// Cities ordered along the ring.
    pub tour: Tour,

    /// Number of ring nodes used.
    pub n_nodes: usize,

    /// Number of training steps performed.
    pub epochs: usize,
}

/// Trains a SOM ring on a set of cities.
pub struct SomTrainer;

impl SomTrainer {
    /// Trains with the seeded default sampler.
    ///
    /// Two calls with equal inputs and configuration produce identical
    /// rings and tours.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidConfig`] when `config` fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use som_tsp::som::{SomConfig, SomTrainer};
    /// use som_tsp::City;
    ///
    /// let cities: Vec<City> = (0..12)
    ///     .map(|k| {
    ///         let a = std::f64::consts::TAU * k as f64 / 12.0;
    ///         City::new(a.cos(), a.sin())
    ///     })
    ///     .collect();
    /// let config = SomConfig::default().with_epochs(2000).with_seed(1);
    /// let result = SomTrainer::train(&cities, &config).unwrap();
    /// assert!(result.tour.is_permutation_of(&cities));
    /// ```
    pub fn train(cities: &[City], config: &SomConfig) -> Result<SomResult> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::train_with_sampler(cities, config, &mut rng)
    }

    /// Trains drawing city indices from `sampler`.
    ///
    /// `config.seed` is ignored; the sampler alone decides the draw
    /// sequence.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidConfig`] when `config` fails validation or the
    /// sampler returns an index outside `0..cities.len()`.
    pub fn train_with_sampler<S: IndexSampler + ?Sized>(
        cities: &[City],
        config: &SomConfig,
        sampler: &mut S,
    ) -> Result<SomResult> {
        config.validate()?;

        let n = cities.len();
        let Some(center) = centroid(cities) else {
            return Ok(SomResult {
                ring: Ring::default(),
                tour: Tour::empty(),
                n_nodes: 0,
                epochs: 0,
            });
        };

        let m = config.node_count(n);
        let mut ring = Ring::on_circle(center, 0.5 * spread(cities), m);
        let radius_start = config.initial_radius(m);

        debug!(
            "som: training {} nodes on {} cities for {} epochs ({:?} decay)",
            m, n, config.epochs, config.decay
        );

        for t in 0..config.epochs {
            let drawn = sampler.sample_index(n);
            let Some(&city) = cities.get(drawn) else {
                return Err(TspError::InvalidConfig(format!(
                    "sampler returned index {drawn} for {n} cities"
                )));
            };
            let Some(bmu) = ring.best_matching_unit(&city) else {
                break;
            };
            let lr = config
                .decay
                .value(t, config.epochs, config.lr_start, config.lr_end);
            let radius = config
                .decay
                .value(t, config.epochs, radius_start, config.radius_end);
            ring.pull(bmu, &city, lr, radius);
        }

        let tour = extract_tour(cities, &ring);
        debug!("som: tour length {:.3}", tour.length());

        Ok(SomResult {
            ring,
            tour,
            n_nodes: m,
            epochs: config.epochs,
        })
    }
}
