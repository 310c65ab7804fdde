//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedRouteProvider;
use crate::catalog::StationCatalog;
use crate::planner::FuelPlanConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route provider adapter with geocode cache
    pub routes: Arc<CachedRouteProvider>,

    /// Fuel station catalog, read-only after startup
    pub catalog: Arc<StationCatalog>,

    /// Fuel planning policy
    pub config: Arc<FuelPlanConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(routes: CachedRouteProvider, catalog: StationCatalog, config: FuelPlanConfig) -> Self {
        Self {
            routes: Arc::new(routes),
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}
