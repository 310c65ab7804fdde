use std::sync::Arc;

use tracing::{error, info};

use fuel_route_server::cache::CachedRouteProvider;
use fuel_route_server::catalog::StationCatalog;
use fuel_route_server::config::{ProviderSource, ServerConfig};
use fuel_route_server::routing::{MockRouteProvider, OrsClient, OrsConfig, RouteProvider};
use fuel_route_server::web::{AppState, create_router};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ServerConfig::from_env()?;

    let catalog = StationCatalog::from_path(&config.stations_csv).map_err(|e| {
        error!(error = %e, path = %config.stations_csv.display(), "failed to load station catalog");
        e
    })?;

    let provider: Arc<dyn RouteProvider> = match &config.provider {
        ProviderSource::Mock { path } => {
            let mock = MockRouteProvider::from_path(path)?;
            info!(
                path = %path.display(),
                locations = mock.location_count(),
                "using offline mock provider"
            );
            Arc::new(mock)
        }
        ProviderSource::Ors { base_url, .. } => {
            let ors_config: OrsConfig = config.ors_config().ok_or("missing provider settings")?;
            info!(%base_url, "using OpenRouteService provider");
            Arc::new(OrsClient::new(ors_config)?)
        }
    };

    let routes = CachedRouteProvider::new(provider, config.adapter_config());
    let plan_config = config.plan_config();
    info!(
        stations = catalog.len(),
        skipped = catalog.skipped(),
        search_radius_miles = plan_config.search_radius_miles,
        "station catalog ready"
    );

    let app = create_router(AppState::new(routes, catalog, plan_config));

    info!(addr = %config.bind, "fuel route planner listening");
    info!("  POST /api/calculate-route/ - plan fuel stops");
    info!("  GET  /api/stations/        - cheapest stations in a state");
    info!("  GET  /api/health/          - health check");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
