//! Converting a trained ring into a visiting order.

use super::types::Ring;
use crate::geometry::City;
use crate::tour::Tour;

/// Orders `cities` by the ring index of their nearest node.
///
/// Ties in node distance go to the lowest node index, and cities sharing
/// a node keep their input order (the sort is stable). Every input city
/// appears exactly once in the result. With an empty ring the input order
/// is returned unchanged.
pub fn extract_tour(cities: &[City], ring: &Ring) -> Tour {
    let mut assigned: Vec<(usize, City)> = cities
        .iter()
        .map(|c| (ring.best_matching_unit(c).unwrap_or(0), *c))
        .collect();
    assigned.sort_by_key(|&(node, _)| node);
    assigned.into_iter().map(|(_, c)| c).collect()
}
