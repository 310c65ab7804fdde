//! Fuel station records and state codes.

use std::fmt;

use super::{Coord, PricePerGallon};

/// Error returned when parsing an invalid state code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid state code: {reason}")]
pub struct InvalidStateCode {
    reason: &'static str,
}

/// A two-letter US postal state code (e.g. `TX`).
///
/// Always two uppercase ASCII letters.
///
/// # Examples
///
/// ```
/// use fuel_route_server::domain::StateCode;
///
/// let tx = StateCode::parse("TX").unwrap();
/// assert_eq!(tx.as_str(), "TX");
///
/// // Lowercase is rejected by `parse` but accepted by `parse_normalized`
/// assert!(StateCode::parse("tx").is_err());
/// assert_eq!(StateCode::parse_normalized(" tx ").unwrap(), tx);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateCode([u8; 2]);

impl StateCode {
    /// Parse a state code, which must be exactly 2 uppercase letters.
    pub fn parse(s: &str) -> Result<Self, InvalidStateCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidStateCode {
                reason: "must be exactly 2 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidStateCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(StateCode([bytes[0], bytes[1]]))
    }

    /// Parse after trimming whitespace and uppercasing.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStateCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Debug for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateCode({})", self.as_str())
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fuel station from the static price dataset.
///
/// Created once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: StateCode,
    pub price: PricePerGallon,
    pub position: Coord,
}

impl StationRecord {
    /// Straight-line distance from this station to a point, in miles.
    pub fn miles_from(&self, point: &Coord) -> f64 {
        self.position.miles_to(point)
    }
}
