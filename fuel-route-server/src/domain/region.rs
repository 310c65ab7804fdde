//! Supported service region.

use super::Coord;

/// An axis-aligned longitude/latitude box, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Returns true if the coordinate lies inside the box.
    pub fn contains(&self, coord: &Coord) -> bool {
        (self.min_lon..=self.max_lon).contains(&coord.lon())
            && (self.min_lat..=self.max_lat).contains(&coord.lat())
    }
}

/// Contiguous United States.
const CONTIGUOUS_USA: BoundingBox = BoundingBox {
    min_lon: -125.0,
    max_lon: -66.0,
    min_lat: 24.0,
    max_lat: 49.0,
};

/// Alaska.
const ALASKA: BoundingBox = BoundingBox {
    min_lon: -180.0,
    max_lon: -130.0,
    min_lat: 51.0,
    max_lat: 71.0,
};

/// The set of boxes a resolved location must fall into.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRegion {
    boxes: Vec<BoundingBox>,
}

impl ServiceRegion {
    /// The USA: contiguous states plus Alaska.
    pub fn usa() -> Self {
        Self {
            boxes: vec![CONTIGUOUS_USA, ALASKA],
        }
    }

    /// Returns true if the coordinate falls in any of the region's boxes.
    pub fn contains(&self, coord: &Coord) -> bool {
        self.boxes.iter().any(|b| b.contains(coord))
    }
}

impl Default for ServiceRegion {
    fn default() -> Self {
        Self::usa()
    }
}
