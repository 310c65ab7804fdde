//! Mock route provider for testing without API access.
//!
//! Serves a fixed table of locations and routes, either built in code or
//! loaded from a JSON fixture, and counts every call it receives.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::Coord;

use super::error::RoutingError;
use super::provider::{ProviderRoute, RouteProvider};

/// JSON fixture layout.
///
/// ```json
/// {
///   "locations": { "Dallas, TX": [-96.797, 32.7767] },
///   "routes": [
///     { "from": "Dallas, TX", "to": "Houston, TX",
///       "distance_miles": 239.4, "geometry": [[-96.797, 32.7767], [-95.3698, 29.7604]] }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
struct Fixture {
    locations: HashMap<String, Coord>,
    #[serde(default)]
    routes: Vec<FixtureRoute>,
}

#[derive(Debug, Deserialize)]
struct FixtureRoute {
    from: String,
    to: String,
    distance_miles: f64,
    #[serde(default)]
    geometry: Vec<Coord>,
}

/// Lookup key for a place name: trimmed and lowercased.
fn location_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Mock provider that serves data from memory.
///
/// Routes are stored in one direction only; requesting the reverse
/// direction is unroutable unless it was added too.
#[derive(Debug, Clone, Default)]
pub struct MockRouteProvider {
    locations: HashMap<String, Coord>,
    routes: Vec<(Coord, Coord, ProviderRoute)>,
    geocode_calls: Arc<AtomicUsize>,
    route_calls: Arc<AtomicUsize>,
}

impl MockRouteProvider {
    /// Create an empty provider; every lookup fails until data is added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load locations and routes from a JSON fixture file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RoutingError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| RoutingError::Json {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_json(&json)
    }

    /// Load locations and routes from a JSON fixture string.
    pub fn from_json(json: &str) -> Result<Self, RoutingError> {
        let fixture: Fixture = serde_json::from_str(json).map_err(|e| RoutingError::Json {
            message: e.to_string(),
        })?;

        let mut provider = Self::new();
        for (name, coord) in fixture.locations {
            provider = provider.with_location(&name, coord);
        }

        for route in fixture.routes {
            let from = provider.lookup(&route.from).ok_or_else(|| RoutingError::Json {
                message: format!("route references unknown location '{}'", route.from),
            })?;
            let to = provider.lookup(&route.to).ok_or_else(|| RoutingError::Json {
                message: format!("route references unknown location '{}'", route.to),
            })?;
            provider = provider.with_route(from, to, route.distance_miles, route.geometry);
        }

        Ok(provider)
    }

    /// Add a geocodable location.
    pub fn with_location(mut self, name: &str, coord: Coord) -> Self {
        self.locations.insert(location_key(name), coord);
        self
    }

    /// Add a route between two coordinates.
    ///
    /// An empty geometry is replaced by the straight segment `[from, to]`.
    pub fn with_route(
        mut self,
        from: Coord,
        to: Coord,
        distance_miles: f64,
        geometry: Vec<Coord>,
    ) -> Self {
        let geometry = if geometry.is_empty() {
            vec![from, to]
        } else {
            geometry
        };

        self.routes.push((
            from,
            to,
            ProviderRoute {
                geometry,
                distance_miles,
            },
        ));
        self
    }

    /// Number of `geocode` calls received so far.
    pub fn geocode_calls(&self) -> usize {
        self.geocode_calls.load(Ordering::SeqCst)
    }

    /// Number of `route` calls received so far.
    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }

    /// Number of known locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    fn lookup(&self, name: &str) -> Option<Coord> {
        self.locations.get(&location_key(name)).copied()
    }
}

#[async_trait]
impl RouteProvider for MockRouteProvider {
    async fn geocode(&self, name: &str) -> Result<Coord, RoutingError> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(name)
            .ok_or_else(|| RoutingError::LocationNotFound {
                name: name.to_string(),
            })
    }

    async fn route(&self, from: Coord, to: Coord) -> Result<ProviderRoute, RoutingError> {
        self.route_calls.fetch_add(1, Ordering::SeqCst);
        self.routes
            .iter()
            .find(|(f, t, _)| *f == from && *t == to)
            .map(|(_, _, route)| route.clone())
            .ok_or_else(|| RoutingError::Unroutable {
                from,
                to,
                message: "no mock route between these points".to_string(),
            })
    }
}
