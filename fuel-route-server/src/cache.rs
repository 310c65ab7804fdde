//! Route provider adapter with a geocode cache.
//!
//! Place names are normalized (trimmed, lowercased) and their resolved
//! coordinates cached for the life of the process. Only successful,
//! in-region lookups are cached; failures are retried on the next request.
//!
//! Routes themselves are not cached: each request gets a fresh route from
//! the provider, simplified for the response payload.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

use crate::domain::{Coord, Polyline, RouteResult, ServiceRegion};
use crate::routing::{RouteProvider, RoutingError};

/// Configuration for the adapter.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Timeout applied to each individual provider call.
    pub call_timeout: Duration,

    /// Attempts per provider call, including the first. Clamped to 1..=2.
    pub max_attempts: u32,

    /// Maximum number of points kept in the returned route geometry.
    pub geometry_points: usize,

    /// Region every resolved location must fall into.
    pub region: ServiceRegion,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(10),
            max_attempts: 2,
            geometry_points: 50,
            region: ServiceRegion::usa(),
        }
    }
}

/// Process-wide cache of normalized place name → coordinate.
///
/// Created at startup and never persisted. Entries are never evicted.
pub struct GeocodeCache {
    entries: MokaCache<String, Coord>,
}

impl GeocodeCache {
    /// Create an empty, unbounded cache.
    pub fn new() -> Self {
        Self {
            entries: MokaCache::builder().build(),
        }
    }

    /// Normalize a place name into a cache key.
    pub fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Look up a normalized key.
    pub async fn get(&self, key: &str) -> Option<Coord> {
        self.entries.get(key).await
    }

    /// Return the cached coordinate for `key`, or resolve it with `init`.
    ///
    /// Concurrent callers missing on the same key share one `init` run.
    /// Only `Ok` results are stored.
    pub async fn get_or_try_insert<F>(&self, key: String, init: F) -> Result<Coord, RoutingError>
    where
        F: Future<Output = Result<Coord, RoutingError>>,
    {
        self.entries
            .try_get_with(key, init)
            .await
            .map_err(|shared| Arc::try_unwrap(shared).unwrap_or_else(|e| e.duplicate()))
    }

    /// Approximate number of cached entries.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

impl Default for GeocodeCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Route provider with geocode caching, bounded timeouts and retries.
///
/// Wraps any [`RouteProvider`], so the concrete provider can be swapped
/// without touching the planner.
pub struct CachedRouteProvider {
    provider: Arc<dyn RouteProvider>,
    cache: GeocodeCache,
    config: AdapterConfig,
}

impl CachedRouteProvider {
    /// Create a new adapter around a provider.
    pub fn new(provider: Arc<dyn RouteProvider>, config: AdapterConfig) -> Self {
        Self {
            provider,
            cache: GeocodeCache::new(),
            config,
        }
    }

    /// Resolve two place names into a driving route.
    ///
    /// Both names are geocoded concurrently (through the cache), checked
    /// against the service region, and then routed. The returned polyline is
    /// simplified; `distance_miles` is the provider's reported total.
    pub async fn resolve_route(
        &self,
        start_name: &str,
        end_name: &str,
    ) -> Result<RouteResult, RoutingError> {
        let (start, end) =
            futures::future::try_join(self.geocode(start_name), self.geocode(end_name)).await?;

        let route = self
            .call("route", || self.provider.route(start, end))
            .await?;

        let polyline = Polyline::new(route.geometry).simplify(self.config.geometry_points);

        debug!(
            start_name,
            end_name,
            distance_miles = route.distance_miles,
            points = polyline.len(),
            "resolved route"
        );

        Ok(RouteResult {
            start,
            end,
            polyline,
            distance_miles: route.distance_miles,
        })
    }

    /// Geocode a place name, using the cache if available.
    pub async fn geocode(&self, name: &str) -> Result<Coord, RoutingError> {
        let key = GeocodeCache::normalize(name);

        // Try cache first
        if let Some(coord) = self.cache.get(&key).await {
            debug!(name, "geocode cache hit");
            return Ok(coord);
        }

        debug!(name, cached = self.cache.entry_count(), "geocode cache miss");
        self.cache
            .get_or_try_insert(key, async {
                let coord = self.call("geocode", || self.provider.geocode(name)).await?;

                if !self.config.region.contains(&coord) {
                    return Err(RoutingError::OutOfBounds {
                        name: name.to_string(),
                        coord,
                    });
                }

                Ok(coord)
            })
            .await
    }

    /// Run one provider operation with a per-attempt timeout and bounded
    /// retries of transient failures.
    async fn call<T, F, Fut>(&self, operation: &'static str, mut f: F) -> Result<T, RoutingError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RoutingError>>,
    {
        let attempts = self.config.max_attempts.clamp(1, 2);
        let mut attempt = 1;

        loop {
            let result = match tokio::time::timeout(self.config.call_timeout, f()).await {
                Ok(result) => result,
                Err(_) => Err(RoutingError::Timeout { operation }),
            };

            match result {
                Err(e) if e.is_transient() && attempt < attempts => {
                    warn!(operation, attempt, error = %e, "provider call failed, retrying");
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Get the geocode cache (for monitoring).
    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::routing::{MockRouteProvider, ProviderRoute};

    fn coord(lon: f64, lat: f64) -> Coord {
        Coord::new(lon, lat).unwrap()
    }

    fn dallas() -> Coord {
        coord(-96.797, 32.7767)
    }

    fn houston() -> Coord {
        coord(-95.3698, 29.7604)
    }

    fn texas_provider() -> MockRouteProvider {
        MockRouteProvider::new()
            .with_location("Dallas, TX", dallas())
            .with_location("Houston, TX", houston())
            .with_location("Paris, France", coord(2.3522, 48.8566))
            .with_route(dallas(), houston(), 239.4, vec![])
    }

    fn adapter(provider: &MockRouteProvider) -> CachedRouteProvider {
        CachedRouteProvider::new(Arc::new(provider.clone()), AdapterConfig::default())
    }

    #[test]
    fn default_config() {
        let config = AdapterConfig::default();
        assert_eq!(config.call_timeout, Duration::from_secs(10));
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.geometry_points, 50);
        assert_eq!(config.region, ServiceRegion::usa());
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(GeocodeCache::normalize("  Los Angeles, CA "), "los angeles, ca");
        assert_eq!(
            GeocodeCache::normalize("DENVER, co"),
            GeocodeCache::normalize("denver, CO")
        );
    }

    #[test]
    fn cache_creation() {
        let cache = GeocodeCache::new();
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn resolve_route_uses_reported_distance() {
        let provider = texas_provider();
        let adapter = adapter(&provider);

        let route = adapter.resolve_route("Dallas, TX", "Houston, TX").await.unwrap();
        assert_eq!(route.start, dallas());
        assert_eq!(route.end, houston());
        assert_eq!(route.distance_miles, 239.4);
        assert_eq!(route.polyline.points(), &[dallas(), houston()]);
    }

    #[tokio::test]
    async fn repeated_resolution_hits_cache() {
        let provider = texas_provider();
        let adapter = adapter(&provider);

        let first = adapter.resolve_route("Dallas, TX", "Houston, TX").await.unwrap();
        assert_eq!(provider.geocode_calls(), 2);

        let second = adapter
            .resolve_route("  dallas, tx", "HOUSTON, TX ")
            .await
            .unwrap();

        assert_eq!(first.start, second.start);
        assert_eq!(first.end, second.end);
        // No additional geocode calls; routing is not cached
        assert_eq!(provider.geocode_calls(), 2);
        assert_eq!(provider.route_calls(), 2);
    }

    #[tokio::test]
    async fn failed_lookups_are_not_cached() {
        let provider = texas_provider();
        let adapter = adapter(&provider);

        for _ in 0..2 {
            let err = adapter.geocode("Atlantis").await.unwrap_err();
            assert!(matches!(err, RoutingError::LocationNotFound { .. }));
        }
        assert_eq!(provider.geocode_calls(), 2);
    }

    #[tokio::test]
    async fn out_of_region_is_rejected_and_not_cached() {
        let provider = texas_provider();
        let adapter = adapter(&provider);

        for _ in 0..2 {
            let err = adapter.resolve_route("Paris, France", "Dallas, TX").await;
            assert!(matches!(err, Err(RoutingError::OutOfBounds { .. })));
        }
        assert!(adapter.cache().get("paris, france").await.is_none());
        assert_eq!(provider.route_calls(), 0);
    }

    #[tokio::test]
    async fn unroutable_pair() {
        let provider = texas_provider();
        let adapter = adapter(&provider);

        let err = adapter
            .resolve_route("Houston, TX", "Dallas, TX")
            .await
            .unwrap_err();
        assert!(matches!(err, RoutingError::Unroutable { .. }));
        // Definite answers are not retried
        assert_eq!(provider.route_calls(), 1);
    }

    #[tokio::test]
    async fn geometry_is_simplified() {
        let geometry: Vec<Coord> = (0..=200)
            .map(|i| coord(-96.797 + 1.4272 * i as f64 / 200.0, 32.7767 - 3.0163 * i as f64 / 200.0))
            .collect();
        let provider = MockRouteProvider::new()
            .with_location("Dallas, TX", geometry[0])
            .with_location("Houston, TX", geometry[200])
            .with_route(geometry[0], geometry[200], 239.4, geometry.clone());
        let adapter = adapter(&provider);

        let route = adapter.resolve_route("Dallas, TX", "Houston, TX").await.unwrap();
        assert_eq!(route.polyline.len(), 50);
        assert_eq!(route.polyline.points().first(), geometry.first());
        assert_eq!(route.polyline.points().last(), geometry.last());
        assert_eq!(route.distance_miles, 239.4);
    }

    /// Provider whose calls fail a fixed number of times, then succeed.
    struct FlakyProvider {
        failures: usize,
        calls: AtomicUsize,
        delay: Duration,
    }

    #[async_trait]
    impl RouteProvider for FlakyProvider {
        async fn geocode(&self, _name: &str) -> Result<Coord, RoutingError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if n < self.failures {
                Err(RoutingError::Api {
                    status: 503,
                    message: "unavailable".into(),
                })
            } else {
                Ok(coord(-96.797, 32.7767))
            }
        }

        async fn route(&self, from: Coord, to: Coord) -> Result<ProviderRoute, RoutingError> {
            Ok(ProviderRoute {
                geometry: vec![from, to],
                distance_miles: 1.0,
            })
        }
    }

    fn flaky(failures: usize, delay: Duration) -> Arc<FlakyProvider> {
        Arc::new(FlakyProvider {
            failures,
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    #[tokio::test]
    async fn transient_failure_is_retried_once() {
        let provider = flaky(1, Duration::ZERO);
        let adapter = CachedRouteProvider::new(provider.clone(), AdapterConfig::default());

        assert!(adapter.geocode("Dallas, TX").await.is_ok());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retries_are_bounded() {
        let provider = flaky(10, Duration::ZERO);
        let config = AdapterConfig {
            max_attempts: 5,
            ..AdapterConfig::default()
        };
        let adapter = CachedRouteProvider::new(provider.clone(), config);

        let err = adapter.geocode("Dallas, TX").await.unwrap_err();
        assert!(matches!(err, RoutingError::Api { status: 503, .. }));
        // Clamped to two attempts
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out() {
        let provider = flaky(0, Duration::from_secs(60));
        let config = AdapterConfig {
            call_timeout: Duration::from_secs(1),
            max_attempts: 1,
            ..AdapterConfig::default()
        };
        let adapter = CachedRouteProvider::new(provider, config);

        let err = adapter.geocode("Dallas, TX").await.unwrap_err();
        assert!(matches!(
            err,
            RoutingError::Timeout {
                operation: "geocode"
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_misses_share_one_lookup() {
        let provider = flaky(0, Duration::from_secs(1));
        let adapter = CachedRouteProvider::new(provider.clone(), AdapterConfig::default());

        let (a, b) = tokio::join!(adapter.geocode("Dallas, TX"), adapter.geocode(" dallas, tx"));

        assert_eq!(a.unwrap(), dallas());
        assert_eq!(b.unwrap(), dallas());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(adapter.cache().get("dallas, tx").await, Some(dallas()));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_failure_reaches_every_caller() {
        let provider = flaky(10, Duration::from_secs(1));
        let config = AdapterConfig {
            max_attempts: 1,
            ..AdapterConfig::default()
        };
        let adapter = CachedRouteProvider::new(provider.clone(), config);

        let (a, b) = tokio::join!(adapter.geocode("Dallas, TX"), adapter.geocode("DALLAS, TX"));

        assert!(matches!(a, Err(RoutingError::Api { status: 503, .. })));
        assert!(matches!(b, Err(RoutingError::Api { status: 503, .. })));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(adapter.cache().entry_count(), 0);
    }
}
