//! The routing capability consumed by the adapter.

use async_trait::async_trait;

use crate::domain::Coord;

use super::error::RoutingError;

/// A driving route as reported by a provider, before simplification.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRoute {
    /// Full path geometry, start to end.
    pub geometry: Vec<Coord>,

    /// Total driving distance in miles.
    pub distance_miles: f64,
}

/// External geocoding and routing capability.
///
/// Implementations perform a single attempt per call; timeouts, retries and
/// caching are layered on top by [`crate::cache::CachedRouteProvider`].
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Resolve a place name to a coordinate.
    ///
    /// Returns `RoutingError::LocationNotFound` when there is no match.
    async fn geocode(&self, name: &str) -> Result<Coord, RoutingError>;

    /// Find a driving route between two coordinates.
    ///
    /// Returns `RoutingError::Unroutable` when the points cannot be connected.
    async fn route(&self, from: Coord, to: Coord) -> Result<ProviderRoute, RoutingError>;
}
