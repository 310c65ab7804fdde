//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::StationRecord;
use crate::planner::{FuelStop, FuelSummary};
use crate::trip::TripPlan;

/// Round a figure to cents / hundredths of a mile for display.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Request body for `POST /api/calculate-route/`.
///
/// Fields are optional here so a missing field is reported by name
/// rather than as a JSON shape error.
#[derive(Debug, Default, Deserialize)]
pub struct CalculateRouteRequest {
    /// Start location, e.g. "Los Angeles, CA"
    pub start_location: Option<String>,

    /// End location, e.g. "Denver, CO"
    pub end_location: Option<String>,
}

/// Successful route calculation.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub route: RouteView,
    pub fuel_stops: Vec<FuelStopView>,
    pub fuel_summary: FuelSummaryView,
}

/// The resolved route.
#[derive(Debug, Serialize)]
pub struct RouteView {
    /// Start location as given by the caller
    pub start: String,

    /// End location as given by the caller
    pub end: String,

    /// Resolved start position, `[lon, lat]`
    pub start_coordinates: [f64; 2],

    /// Resolved end position, `[lon, lat]`
    pub end_coordinates: [f64; 2],

    /// Driving distance in miles
    pub distance_miles: f64,

    /// Simplified path, `[[lon, lat], ...]`
    pub geometry: Vec<[f64; 2]>,
}

/// A recommended refuelling stop.
#[derive(Debug, Serialize)]
pub struct FuelStopView {
    pub stop_number: usize,
    pub station_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub price_per_gallon: f64,
    pub distance_from_start: f64,
}

/// Fuel totals for the trip.
#[derive(Debug, Serialize)]
pub struct FuelSummaryView {
    pub total_gallons_needed: f64,
    pub average_price_per_gallon: f64,
    pub total_fuel_cost: f64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Query for `GET /api/stations/`.
#[derive(Debug, Deserialize)]
pub struct StationsQuery {
    /// Two-letter state code (case-insensitive)
    pub state: Option<String>,

    /// Maximum results (default 5, max 50)
    pub limit: Option<usize>,
}

/// Cheapest stations in a state.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub state: String,
    pub stations: Vec<StationView>,
}

/// A catalog station.
#[derive(Debug, Serialize)]
pub struct StationView {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub price_per_gallon: f64,
    pub coordinates: [f64; 2],
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Expected input form, when the caller can fix the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

// Conversion implementations

impl RouteResponse {
    /// Build the response body for a planned trip.
    pub fn from_plan(plan: &TripPlan<'_>) -> Self {
        Self {
            route: RouteView {
                start: plan.request.start_location().to_string(),
                end: plan.request.end_location().to_string(),
                start_coordinates: plan.route.start.to_pair(),
                end_coordinates: plan.route.end.to_pair(),
                distance_miles: round2(plan.route.distance_miles),
                geometry: plan.route.polyline.points().iter().map(|c| c.to_pair()).collect(),
            },
            fuel_stops: plan.stops.iter().map(FuelStopView::from_stop).collect(),
            fuel_summary: FuelSummaryView::from_summary(&plan.summary),
        }
    }
}

impl FuelStopView {
    /// Create from a selected stop.
    pub fn from_stop(stop: &FuelStop<'_>) -> Self {
        Self {
            stop_number: stop.stop_number,
            station_name: stop.station.name.clone(),
            address: stop.station.address.clone(),
            city: stop.station.city.clone(),
            state: stop.station.state.as_str().to_string(),
            price_per_gallon: round2(stop.station.price.value()),
            distance_from_start: round2(stop.distance_from_start),
        }
    }
}

impl FuelSummaryView {
    /// Create from an unrounded summary.
    pub fn from_summary(summary: &FuelSummary) -> Self {
        Self {
            total_gallons_needed: round2(summary.total_gallons_needed),
            average_price_per_gallon: round2(summary.average_price_per_gallon),
            total_fuel_cost: round2(summary.total_fuel_cost),
        }
    }
}

impl StationView {
    /// Create from a catalog record.
    pub fn from_station(station: &StationRecord) -> Self {
        Self {
            name: station.name.clone(),
            address: station.address.clone(),
            city: station.city.clone(),
            state: station.state.as_str().to_string(),
            price_per_gallon: round2(station.price.value()),
            coordinates: station.position.to_pair(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, PricePerGallon, StateCode};

    fn station() -> StationRecord {
        StationRecord {
            name: "LOVES TRAVEL STOP #461".into(),
            address: "I-70, EXIT 40".into(),
            city: "Richfield".into(),
            state: StateCode::parse("UT").unwrap(),
            price: PricePerGallon::new(3.459).unwrap(),
            position: Coord::new(-112.0841, 38.7725).unwrap(),
        }
    }

    #[test]
    fn round2_rounds_half_away() {
        assert_eq!(round2(101.916), 101.92);
        assert_eq!(round2(23.94), 23.94);
        assert_eq!(round2(352.5448), 352.54);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn fuel_stop_view_from_stop() {
        let station = station();
        let stop = FuelStop {
            stop_number: 1,
            station: &station,
            distance_from_start: 500.0,
        };

        let view = FuelStopView::from_stop(&stop);

        assert_eq!(view.stop_number, 1);
        assert_eq!(view.station_name, "LOVES TRAVEL STOP #461");
        assert_eq!(view.city, "Richfield");
        assert_eq!(view.state, "UT");
        assert_eq!(view.price_per_gallon, 3.46);
        assert_eq!(view.distance_from_start, 500.0);
    }

    #[test]
    fn station_view_price_is_rounded() {
        let view = StationView::from_station(&station());

        assert_eq!(view.price_per_gallon, 3.46);
    }

    #[test]
    fn summary_view_is_rounded() {
        let view = FuelSummaryView::from_summary(&FuelSummary {
            total_gallons_needed: 101.92,
            average_price_per_gallon: 3.354,
            total_fuel_cost: 341.839_68,
        });

        assert_eq!(view.total_gallons_needed, 101.92);
        assert_eq!(view.average_price_per_gallon, 3.35);
        assert_eq!(view.total_fuel_cost, 341.84);
    }

    #[test]
    fn error_hint_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse {
            error: "boom".into(),
            hint: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"error": "boom"}));
    }

    #[test]
    fn request_fields_optional() {
        let req: CalculateRouteRequest =
            serde_json::from_str(r#"{"start_location": "Dallas, TX"}"#).unwrap();
        assert_eq!(req.start_location.as_deref(), Some("Dallas, TX"));
        assert!(req.end_location.is_none());
    }

    #[test]
    fn station_view_coordinates_are_lon_lat() {
        let view = StationView::from_station(&station());
        assert_eq!(view.coordinates, [-112.0841, 38.7725]);
    }
}
