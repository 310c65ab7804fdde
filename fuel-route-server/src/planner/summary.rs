//! Trip fuel cost estimation.

use super::config::FuelPlanConfig;
use super::stops::FuelStop;

/// Fuel totals for a trip.
///
/// Values are unrounded; presentation rounding happens in the web layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelSummary {
    pub total_gallons_needed: f64,
    pub average_price_per_gallon: f64,
    pub total_fuel_cost: f64,
}

/// Compute gallons and cost for a trip of `distance_miles`.
///
/// The average price is the mean over the selected stops, or the
/// configured default price when there are none.
pub fn compute_summary(
    distance_miles: f64,
    stops: &[FuelStop<'_>],
    config: &FuelPlanConfig,
) -> FuelSummary {
    let total_gallons_needed = distance_miles / config.miles_per_gallon;

    let average_price_per_gallon = if stops.is_empty() {
        config.default_price_per_gallon
    } else {
        let sum: f64 = stops.iter().map(|s| s.station.price.value()).sum();
        sum / stops.len() as f64
    };

    FuelSummary {
        total_gallons_needed,
        average_price_per_gallon,
        total_fuel_cost: total_gallons_needed * average_price_per_gallon,
    }
}
