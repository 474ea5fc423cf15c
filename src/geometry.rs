//! Planar points and the statistics the ring initialization needs.

/// Floor added to the coordinate spread so collinear or coincident
/// instances still get a ring of non-zero radius.
pub const SPREAD_EPSILON: f64 = 1e-9;

/// A city: an immutable point in the plane.
///
/// Cities are compared by value. Two cities with identical coordinates
/// are indistinguishable, which is fine: a tour only has to visit each
/// input entry once.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl City {
    /// Creates a city at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &City) -> f64 {
        distance(self, other)
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_squared(&self, other: &City) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        City::new(x, y)
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &City, b: &City) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Arithmetic mean of the cities, or `None` for an empty slice.
pub fn centroid(cities: &[City]) -> Option<City> {
    if cities.is_empty() {
        return None;
    }
    let n = cities.len() as f64;
    let (sx, sy) = cities
        .iter()
        .fold((0.0, 0.0), |(sx, sy), c| (sx + c.x, sy + c.y));
    Some(City::new(sx / n, sy / n))
}

/// Scale of the instance: the larger of the per-axis population standard
/// deviations, plus [`SPREAD_EPSILON`].
///
/// Returns [`SPREAD_EPSILON`] for an empty slice.
pub fn spread(cities: &[City]) -> f64 {
    let Some(center) = centroid(cities) else {
        return SPREAD_EPSILON;
    };
    let n = cities.len() as f64;
    let (vx, vy) = cities.iter().fold((0.0, 0.0), |(vx, vy), c| {
        let dx = c.x - center.x;
        let dy = c.y - center.y;
        (vx + dx * dx, vy + dy * dy)
    });
    (vx / n).sqrt().max((vy / n).sqrt()) + SPREAD_EPSILON
}
