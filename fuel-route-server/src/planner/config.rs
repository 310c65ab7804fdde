//! Fuel planning policy constants.

/// Policy parameters for stop selection and cost estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelPlanConfig {
    /// Distance between refuelling checkpoints (miles).
    pub interval_miles: f64,

    /// Straight-line tolerance around a checkpoint within which a station
    /// counts as "near" it (miles).
    pub search_radius_miles: f64,

    /// Fixed vehicle consumption rate.
    pub miles_per_gallon: f64,

    /// Price used for the summary when no stops were selected (USD/gal).
    pub default_price_per_gallon: f64,
}

impl FuelPlanConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        interval_miles: f64,
        search_radius_miles: f64,
        miles_per_gallon: f64,
        default_price_per_gallon: f64,
    ) -> Self {
        Self {
            interval_miles,
            search_radius_miles,
            miles_per_gallon,
            default_price_per_gallon,
        }
    }

    /// Set the checkpoint search radius.
    pub fn with_search_radius(mut self, miles: f64) -> Self {
        self.search_radius_miles = miles;
        self
    }

    /// Set the fallback price.
    pub fn with_default_price(mut self, price: f64) -> Self {
        self.default_price_per_gallon = price;
        self
    }
}

impl Default for FuelPlanConfig {
    fn default() -> Self {
        Self {
            interval_miles: 500.0,
            search_radius_miles: 100.0,
            miles_per_gallon: 10.0,
            default_price_per_gallon: 3.50,
        }
    }
}
