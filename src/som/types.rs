//! Ring topology and the sampling seam of the trainer.

use rand::Rng;
use std::f64::consts::TAU;

use crate::geometry::City;

/// Floor applied to the squared neighborhood radius so the Gaussian
/// weight stays defined when the radius decays to zero.
pub const MIN_RADIUS_SQUARED: f64 = 1e-9;

/// Source of uniform city indices for the training loop.
///
/// Every [`rand::Rng`] is a sampler. Custom implementations let callers
/// replay a fixed draw sequence.
pub trait IndexSampler {
    /// Returns an index drawn uniformly from `0..upper`. `upper > 0`.
    ///
    /// The trainer rejects indices outside `0..upper` with
    /// [`TspError::InvalidConfig`](crate::TspError::InvalidConfig).
    fn sample_index(&mut self, upper: usize) -> usize;
}

impl<R: Rng> IndexSampler for R {
    fn sample_index(&mut self, upper: usize) -> usize {
        self.random_range(0..upper)
    }
}

/// A closed chain of nodes in the plane.
///
/// Node `i` is adjacent to nodes `i - 1` and `i + 1` modulo the ring size.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ring {
    nodes: Vec<City>,
}

impl Ring {
    /// Places `n_nodes` nodes evenly on a circle, starting at angle 0 and
    /// going counter-clockwise.
    pub fn on_circle(center: City, radius: f64, n_nodes: usize) -> Self {
        let nodes = (0..n_nodes)
            .map(|k| {
                let angle = TAU * k as f64 / n_nodes as f64;
                City::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect();
        Self { nodes }
    }

    /// Node positions in ring order.
    pub fn nodes(&self) -> &[City] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the node nearest to `city`; ties go to the lowest index.
    /// `None` for an empty ring.
    pub fn best_matching_unit(&self, city: &City) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, node) in self.nodes.iter().enumerate() {
            let d = node.distance_squared(city);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Number of hops between nodes `i` and `j` along the shorter way
    /// around the ring.
    ///
    /// Indices are taken modulo the ring size; an empty ring has no hops.
    pub fn ring_distance(&self, i: usize, j: usize) -> usize {
        let m = self.nodes.len();
        if m == 0 {
            return 0;
        }
        let d = (i % m).abs_diff(j % m);
        d.min(m - d)
    }

    /// Gaussian neighborhood weight of a node `hops` away from the BMU.
    pub fn neighborhood_weight(hops: usize, radius: f64) -> f64 {
        let radius2 = (radius * radius).max(MIN_RADIUS_SQUARED);
        let d = hops as f64;
        (-(d * d) / (2.0 * radius2)).exp()
    }

    /// Moves every node toward `city` by
    /// `learning_rate * weight * (city - node)`, where the weight is the
    /// Gaussian of the node's ring distance to `bmu`.
    pub fn pull(&mut self, bmu: usize, city: &City, learning_rate: f64, radius: f64) {
        for i in 0..self.nodes.len() {
            let hops = self.ring_distance(i, bmu);
            let step = learning_rate * Self::neighborhood_weight(hops, radius);
            let node = &mut self.nodes[i];
            node.x += step * (city.x - node.x);
            node.y += step * (city.y - node.y);
        }
    }
}
