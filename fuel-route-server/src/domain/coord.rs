//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing an invalid coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoord {
    reason: &'static str,
}

/// A WGS84 position, stored longitude-first to match GeoJSON.
///
/// Any `Coord` value has finite components with latitude in `[-90, 90]`
/// and longitude in `[-180, 180]`.
///
/// # Examples
///
/// ```
/// use fuel_route_server::domain::Coord;
///
/// let denver = Coord::new(-104.99, 39.74).unwrap();
/// assert_eq!(denver.lon(), -104.99);
/// assert_eq!(denver.lat(), 39.74);
///
/// // Latitude out of range is rejected
/// assert!(Coord::new(0.0, 91.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coord {
    lon: f64,
    lat: f64,
}

impl Coord {
    /// Create a coordinate from longitude and latitude in degrees.
    pub fn new(lon: f64, lat: f64) -> Result<Self, InvalidCoord> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(InvalidCoord {
                reason: "components must be finite",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoord {
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoord {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self { lon, lat })
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Great-circle distance to another coordinate, in miles.
    pub fn miles_to(&self, other: &Coord) -> f64 {
        haversine::distance(
            haversine::Location {
                latitude: self.lat,
                longitude: self.lon,
            },
            haversine::Location {
                latitude: other.lat,
                longitude: other.lon,
            },
            haversine::Units::Miles,
        )
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    ///
    /// Interpolating between two valid coordinates always yields a valid one.
    pub fn lerp(&self, other: &Coord, t: f64) -> Coord {
        let t = t.clamp(0.0, 1.0);
        Coord {
            lon: self.lon + (other.lon - self.lon) * t,
            lat: self.lat + (other.lat - self.lat) * t,
        }
    }

    /// The `[lon, lat]` pair used on the wire.
    pub fn to_pair(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl TryFrom<[f64; 2]> for Coord {
    type Error = InvalidCoord;

    fn try_from([lon, lat]: [f64; 2]) -> Result<Self, Self::Error> {
        Coord::new(lon, lat)
    }
}

impl From<Coord> for [f64; 2] {
    fn from(coord: Coord) -> Self {
        coord.to_pair()
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}, {})", self.lon, self.lat)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lon, self.lat)
    }
}
