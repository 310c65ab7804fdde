//! Fuel price type.

use std::fmt;

/// Error returned when constructing an invalid price.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid price: {reason}")]
pub struct InvalidPrice {
    reason: &'static str,
}

/// A retail fuel price in USD per gallon.
///
/// Always finite and strictly positive.
///
/// # Examples
///
/// ```
/// use fuel_route_server::domain::PricePerGallon;
///
/// let p = PricePerGallon::new(3.199).unwrap();
/// assert_eq!(p.value(), 3.199);
///
/// assert!(PricePerGallon::new(0.0).is_err());
/// assert!(PricePerGallon::new(-1.5).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct PricePerGallon(f64);

impl PricePerGallon {
    /// Create a price, rejecting zero, negative and non-finite values.
    pub fn new(value: f64) -> Result<Self, InvalidPrice> {
        if !value.is_finite() {
            return Err(InvalidPrice {
                reason: "must be finite",
            });
        }

        if value <= 0.0 {
            return Err(InvalidPrice {
                reason: "must be greater than zero",
            });
        }

        Ok(Self(value))
    }

    /// The price in USD.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Debug for PricePerGallon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PricePerGallon({})", self.0)
    }
}

impl fmt::Display for PricePerGallon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.3}", self.0)
    }
}
