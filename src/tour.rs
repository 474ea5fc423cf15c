//! Closed visiting orders.

use std::ops::Deref;

use crate::geometry::City;
use crate::metrics::tour_length;

/// An ordered visit of every city, implicitly closed (the last city
/// connects back to the first).
///
/// A `Tour` is always a full permutation of the cities it was built from;
/// the constructors in this crate never produce partial tours.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    cities: Vec<City>,
}

impl Tour {
    /// Wraps an ordered sequence of cities.
    pub fn new(cities: Vec<City>) -> Self {
        Self { cities }
    }

    /// The empty tour.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Cities in visiting order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Consumes the tour, returning the visiting order.
    pub fn into_cities(self) -> Vec<City> {
        self.cities
    }

    /// Closed tour length.
    pub fn length(&self) -> f64 {
        tour_length(&self.cities)
    }

    /// Whether this tour visits exactly the multiset `cities`.
    ///
    /// Coordinates are compared bit for bit, so coincident input cities
    /// must appear as many times as they were given.
    pub fn is_permutation_of(&self, cities: &[City]) -> bool {
        if self.cities.len() != cities.len() {
            return false;
        }
        let key = |c: &City| (c.x.to_bits(), c.y.to_bits());
        let mut ours: Vec<_> = self.cities.iter().map(key).collect();
        let mut theirs: Vec<_> = cities.iter().map(key).collect();
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs
    }

    pub(crate) fn cities_mut(&mut self) -> &mut [City] {
        &mut self.cities
    }
}

impl Deref for Tour {
    type Target = [City];

    fn deref(&self) -> &[City] {
        &self.cities
    }
}

impl From<Vec<City>> for Tour {
    fn from(cities: Vec<City>) -> Self {
        Tour::new(cities)
    }
}

impl FromIterator<City> for Tour {
    fn from_iter<I: IntoIterator<Item = City>>(iter: I) -> Self {
        Tour::new(iter.into_iter().collect())
    }
}
