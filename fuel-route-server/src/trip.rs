//! Trip planning: validate a request, resolve its route, pick fuel stops
//! and summarise the cost.

use tracing::{info, warn};

use crate::cache::CachedRouteProvider;
use crate::catalog::StationCatalog;
use crate::domain::RouteResult;
use crate::planner::{FuelPlanConfig, FuelStop, FuelSummary, compute_summary, select_stops};
use crate::routing::RoutingError;

/// Expected shape of a location string, shown to callers on bad input.
pub const LOCATION_HINT: &str = "City, ST (e.g. \"Dallas, TX\")";

/// Request failures, in the taxonomy exposed to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    /// A required field is missing or blank
    #[error("{field} is required")]
    InvalidInput { field: &'static str },

    /// A location resolved outside the supported region
    #[error("location '{location}' is outside the USA")]
    OutOfBoundsLocation { location: String },

    /// The provider could not geocode a location
    #[error("location not found: '{location}'")]
    LocationNotFound { location: String },

    /// No route could be obtained from the provider
    #[error("route unavailable: {message}")]
    RouteUnavailable { message: String },
}

impl TripError {
    /// Whether the failure is due to the caller's input.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, TripError::RouteUnavailable { .. })
    }
}

impl From<RoutingError> for TripError {
    fn from(e: RoutingError) -> Self {
        match e {
            RoutingError::LocationNotFound { name } => TripError::LocationNotFound { location: name },
            RoutingError::OutOfBounds { name, .. } => TripError::OutOfBoundsLocation { location: name },
            other => TripError::RouteUnavailable {
                message: other.to_string(),
            },
        }
    }
}

/// A validated trip request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    start_location: String,
    end_location: String,
}

impl TripRequest {
    /// Validate raw request fields.
    ///
    /// Both locations must be present and non-blank; they are trimmed.
    pub fn new(start_location: Option<&str>, end_location: Option<&str>) -> Result<Self, TripError> {
        Ok(Self {
            start_location: required("start_location", start_location)?,
            end_location: required("end_location", end_location)?,
        })
    }

    pub fn start_location(&self) -> &str {
        &self.start_location
    }

    pub fn end_location(&self) -> &str {
        &self.end_location
    }
}

fn required(field: &'static str, value: Option<&str>) -> Result<String, TripError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(TripError::InvalidInput { field }),
    }
}

/// A planned trip, borrowing its stations from the catalog.
#[derive(Debug, Clone)]
pub struct TripPlan<'a> {
    pub request: TripRequest,
    pub route: RouteResult,
    pub stops: Vec<FuelStop<'a>>,
    pub summary: FuelSummary,
}

/// Plan a trip: resolve the route, select stops, compute the summary.
pub async fn plan_trip<'a>(
    request: TripRequest,
    routes: &CachedRouteProvider,
    catalog: &'a StationCatalog,
    config: &FuelPlanConfig,
) -> Result<TripPlan<'a>, TripError> {
    let route = routes
        .resolve_route(request.start_location(), request.end_location())
        .await
        .map_err(|e| {
            warn!(
                start = request.start_location(),
                end = request.end_location(),
                error = %e,
                "route resolution failed"
            );
            TripError::from(e)
        })?;

    let stops = select_stops(&route, catalog, config);
    let summary = compute_summary(route.distance_miles, &stops, config);

    info!(
        start = request.start_location(),
        end = request.end_location(),
        distance_miles = route.distance_miles,
        stops = stops.len(),
        "planned trip"
    );

    Ok(TripPlan {
        request,
        route,
        stops,
        summary,
    })
}
