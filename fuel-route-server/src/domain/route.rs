//! Driving route geometry.

use super::Coord;

/// An ordered sequence of coordinates approximating a driving path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline(Vec<Coord>);

impl Polyline {
    /// Wrap a sequence of points.
    pub fn new(points: Vec<Coord>) -> Self {
        Self(points)
    }

    /// The points, in path order.
    pub fn points(&self) -> &[Coord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of great-circle segment lengths, in miles.
    pub fn length_miles(&self) -> f64 {
        self.0.windows(2).map(|w| w[0].miles_to(&w[1])).sum()
    }

    /// The point a given fraction of the way along the path.
    ///
    /// Walks cumulative segment lengths and interpolates linearly within the
    /// segment containing the target. `fraction` is clamped to `[0, 1]`.
    /// Returns `None` for an empty polyline.
    pub fn point_at_fraction(&self, fraction: f64) -> Option<Coord> {
        let first = *self.0.first()?;
        let total = self.length_miles();
        if total <= 0.0 {
            return Some(first);
        }

        let target = fraction.clamp(0.0, 1.0) * total;
        let mut travelled = 0.0;

        for w in self.0.windows(2) {
            let seg = w[0].miles_to(&w[1]);
            if seg > 0.0 && travelled + seg >= target {
                return Some(w[0].lerp(&w[1], (target - travelled) / seg));
            }
            travelled += seg;
        }

        self.0.last().copied()
    }

    /// Uniformly down-sample to at most `max_points` points.
    ///
    /// The first and last points are always kept exactly. Polylines already
    /// within the limit are returned unchanged.
    pub fn simplify(&self, max_points: usize) -> Polyline {
        let n = self.0.len();
        if n <= max_points.max(2) {
            return self.clone();
        }
        if max_points < 2 {
            // Both ends are always kept.
            return Polyline(vec![self.0[0], self.0[n - 1]]);
        }

        let last = (n - 1) as f64;
        let steps = (max_points - 1) as f64;
        let points = (0..max_points)
            .map(|i| {
                let idx = ((i as f64) * last / steps).round() as usize;
                self.0[idx.min(n - 1)]
            })
            .collect();

        Polyline(points)
    }
}

impl FromIterator<Coord> for Polyline {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A resolved driving route between two named places.
///
/// Owned by the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Geocoded start position.
    pub start: Coord,

    /// Geocoded end position.
    pub end: Coord,

    /// Path geometry, possibly simplified.
    pub polyline: Polyline,

    /// Driving distance reported by the provider, in miles.
    pub distance_miles: f64,
}

impl RouteResult {
    /// Approximate position of the point `miles` along the route.
    ///
    /// The polyline is only an approximation of the road path, so the
    /// position is taken at the same *fraction* of the polyline's length as
    /// `miles` is of the reported driving distance. A route without geometry
    /// falls back to the straight segment between its endpoints.
    pub fn position_at(&self, miles: f64) -> Coord {
        let fraction = if self.distance_miles > 0.0 {
            miles / self.distance_miles
        } else {
            0.0
        };

        self.polyline
            .point_at_fraction(fraction)
            .unwrap_or_else(|| self.start.lerp(&self.end, fraction))
    }
}
