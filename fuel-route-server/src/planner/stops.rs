//! Fuel stop selection along a route.
//!
//! Checkpoints are placed every `interval_miles` along the reported driving
//! distance. Each checkpoint is projected onto the route polyline, and the
//! cheapest catalog station within `search_radius_miles` (great-circle) of
//! that position becomes a stop. Checkpoints with no station in range are
//! skipped silently.

use tracing::{debug, trace};

use crate::catalog::StationCatalog;
use crate::domain::{Coord, RouteResult, StationRecord};

use super::config::FuelPlanConfig;

/// A recommended refuelling stop.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelStop<'a> {
    /// 1-based position in the stop sequence.
    pub stop_number: usize,

    /// The selected station.
    pub station: &'a StationRecord,

    /// Checkpoint distance along the route (miles).
    pub distance_from_start: f64,
}

/// Checkpoint distances `interval, 2·interval, …` not exceeding `distance_miles`.
///
/// Yields `floor(distance_miles / interval_miles)` checkpoints; a route
/// shorter than one interval has none.
pub fn checkpoints(distance_miles: f64, interval_miles: f64) -> Vec<f64> {
    if !distance_miles.is_finite() || !interval_miles.is_finite() || interval_miles <= 0.0 {
        return Vec::new();
    }

    let count = (distance_miles / interval_miles).floor().max(0.0) as usize;
    (1..=count).map(|i| i as f64 * interval_miles).collect()
}

/// The cheapest station within `radius_miles` of `point`.
///
/// Ties go to the station that appears first in the catalog.
pub fn cheapest_near<'a>(
    catalog: &'a StationCatalog,
    point: &Coord,
    radius_miles: f64,
) -> Option<&'a StationRecord> {
    catalog
        .iter()
        .filter(|s| s.miles_from(point) <= radius_miles)
        // min_by keeps the first of equal elements
        .min_by(|a, b| a.price.value().total_cmp(&b.price.value()))
}

/// Select refuelling stops for a route.
///
/// Stops come out in checkpoint order, so `distance_from_start` is strictly
/// increasing and `stop_number` runs 1..=N.
pub fn select_stops<'a>(
    route: &RouteResult,
    catalog: &'a StationCatalog,
    config: &FuelPlanConfig,
) -> Vec<FuelStop<'a>> {
    let mut stops = Vec::new();

    for checkpoint in checkpoints(route.distance_miles, config.interval_miles) {
        let position = route.position_at(checkpoint);

        let Some(station) = cheapest_near(catalog, &position, config.search_radius_miles) else {
            debug!(checkpoint, %position, "no station within radius, skipping checkpoint");
            continue;
        };

        trace!(checkpoint, station = %station.name, price = %station.price, "selected stop");
        stops.push(FuelStop {
            stop_number: stops.len() + 1,
            station,
            distance_from_start: checkpoint,
        });
    }

    stops
}
