//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::StateCode;
use crate::trip::{LOCATION_HINT, TripError, TripRequest, plan_trip};

use super::dto::*;
use super::state::AppState;

/// Default and maximum number of stations returned by the stations endpoint.
const DEFAULT_STATION_LIMIT: usize = 5;
const MAX_STATION_LIMIT: usize = 50;

const STATE_HINT: &str = "two-letter state code, e.g. ?state=TX";

/// Create the application router.
///
/// Every endpoint is served with and without a trailing slash.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health/", get(health))
        .route("/api/health", get(health))
        .route("/api/calculate-route/", post(calculate_route))
        .route("/api/calculate-route", post(calculate_route))
        .route("/api/stations/", get(cheapest_stations))
        .route("/api/stations", get(cheapest_stations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Plan fuel stops between two locations.
async fn calculate_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RouteResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: CalculateRouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
            hint: None,
        }
    })?;

    let request = TripRequest::new(req.start_location.as_deref(), req.end_location.as_deref())?;
    let plan = plan_trip(request, &state.routes, &state.catalog, &state.config).await?;

    Ok(Json(RouteResponse::from_plan(&plan)))
}

/// Cheapest catalog stations in a state.
async fn cheapest_stations(
    State(state): State<AppState>,
    query: Result<Query<StationsQuery>, QueryRejection>,
) -> Result<Json<StationsResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
        hint: Some(STATE_HINT.to_string()),
    })?;

    let raw = query.state.unwrap_or_default();
    if raw.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "state is required".to_string(),
            hint: Some(STATE_HINT.to_string()),
        });
    }

    let code = StateCode::parse_normalized(&raw).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
        hint: Some(STATE_HINT.to_string()),
    })?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_STATION_LIMIT)
        .min(MAX_STATION_LIMIT);

    let stations = state
        .catalog
        .cheapest_in_state(code, limit)
        .into_iter()
        .map(StationView::from_station)
        .collect();

    Ok(Json(StationsResponse {
        state: code.as_str().to_string(),
        stations,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest {
        message: String,
        hint: Option<String>,
    },
    NotFound {
        message: String,
        hint: Option<String>,
    },
    BadGateway {
        message: String,
    },
}

impl From<TripError> for AppError {
    fn from(e: TripError) -> Self {
        let message = e.to_string();
        match e {
            TripError::InvalidInput { .. } | TripError::OutOfBoundsLocation { .. } => {
                AppError::BadRequest {
                    message,
                    hint: Some(LOCATION_HINT.to_string()),
                }
            }
            TripError::LocationNotFound { .. } => AppError::NotFound {
                message,
                hint: Some(LOCATION_HINT.to_string()),
            },
            TripError::RouteUnavailable { .. } => AppError::BadGateway { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, hint) = match self {
            AppError::BadRequest { message, hint } => (StatusCode::BAD_REQUEST, message, hint),
            AppError::NotFound { message, hint } => (StatusCode::NOT_FOUND, message, hint),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message, None),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: message,
            hint,
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::cache::{AdapterConfig, CachedRouteProvider};
    use crate::catalog::StationCatalog;
    use crate::planner::FuelPlanConfig;
    use crate::routing::MockRouteProvider;

    fn app_with(provider: &MockRouteProvider) -> Router {
        let routes = CachedRouteProvider::new(Arc::new(provider.clone()), AdapterConfig::default());
        let catalog = StationCatalog::from_path("data/fuel_prices.csv").unwrap();
        create_router(AppState::new(routes, catalog, FuelPlanConfig::default()))
    }

    fn app() -> Router {
        app_with(&MockRouteProvider::from_path("data/mock_routes.json").unwrap())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn calculate(start: &str, end: &str) -> Request<Body> {
        post_json(
            "/api/calculate-route/",
            json!({"start_location": start, "end_location": end}),
        )
    }

    #[tokio::test]
    async fn health_with_and_without_slash() {
        for uri in ["/api/health/", "/api/health"] {
            let (status, body) = send(app(), get(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"status": "ok"}));
        }
    }

    #[tokio::test]
    async fn short_route_response() {
        let (status, body) = send(app(), calculate("Dallas, TX", "Houston, TX")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["route"]["start"], "Dallas, TX");
        assert_eq!(body["route"]["end"], "Houston, TX");
        assert_eq!(body["route"]["distance_miles"], 239.4);
        assert_eq!(body["route"]["start_coordinates"], json!([-96.797, 32.7767]));
        assert_eq!(body["fuel_stops"], json!([]));
        assert_eq!(body["fuel_summary"]["total_gallons_needed"], 23.94);
        assert_eq!(body["fuel_summary"]["average_price_per_gallon"], 3.5);
        assert_eq!(body["fuel_summary"]["total_fuel_cost"], 83.79);
    }

    #[tokio::test]
    async fn long_route_response() {
        let (status, body) = send(app(), calculate("Los Angeles, CA", "Denver, CO")).await;

        assert_eq!(status, StatusCode::OK);

        let stops = body["fuel_stops"].as_array().unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0]["stop_number"], 1);
        assert_eq!(stops[0]["city"], "Richfield");
        assert_eq!(stops[0]["state"], "UT");
        assert_eq!(stops[0]["price_per_gallon"], 3.46);
        assert_eq!(stops[0]["distance_from_start"], 500.0);
        assert_eq!(stops[1]["stop_number"], 2);
        assert_eq!(stops[1]["city"], "Aurora");
        assert_eq!(stops[1]["distance_from_start"], 1000.0);

        assert_eq!(body["fuel_summary"]["total_gallons_needed"], 101.92);

        let geometry = body["route"]["geometry"].as_array().unwrap();
        assert_eq!(geometry.len(), 11);
        assert_eq!(geometry[0], json!([-118.2437, 34.0522]));
        assert_eq!(geometry[10], json!([-104.9903, 39.7392]));
    }

    #[tokio::test]
    async fn route_without_trailing_slash() {
        let request = post_json(
            "/api/calculate-route",
            json!({"start_location": "Dallas, TX", "end_location": "Houston, TX"}),
        );
        let (status, _) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_start_is_bad_request_without_provider_calls() {
        let provider = MockRouteProvider::from_path("data/mock_routes.json").unwrap();

        let (status, body) = send(app_with(&provider), calculate("", "Denver, CO")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "start_location is required");
        assert!(body["hint"].is_string());
        assert_eq!(provider.geocode_calls(), 0);
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let request = post_json("/api/calculate-route/", json!({"start_location": "Dallas, TX"}));
        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "end_location is required");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/calculate-route/")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn foreign_location_is_bad_request() {
        let (status, body) = send(app(), calculate("Paris, France", "Denver, CO")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("outside the USA"));
    }

    #[tokio::test]
    async fn unknown_location_is_not_found() {
        let (status, body) = send(app(), calculate("Atlantis", "Denver, CO")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("Atlantis"));
    }

    #[tokio::test]
    async fn unroutable_is_bad_gateway() {
        let (status, body) = send(app(), calculate("Houston, TX", "Dallas, TX")).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.get("hint").is_none());
    }

    #[tokio::test]
    async fn cheapest_stations_in_state() {
        let (status, body) = send(app(), get("/api/stations/?state=tx&limit=2")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "TX");
        let stations = body["stations"].as_array().unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0]["city"], "Madisonville");
        assert_eq!(stations[0]["price_per_gallon"], 2.88);
        assert_eq!(stations[1]["city"], "Terrell");
    }

    #[tokio::test]
    async fn stations_default_limit() {
        let (status, body) = send(app(), get("/api/stations?state=TX")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stations"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn stations_require_state() {
        let (status, body) = send(app(), get("/api/stations/")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "state is required");

        let (status, _) = send(app(), get("/api/stations/?state=Texas")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_stations_query_is_json_bad_request() {
        let (status, body) = send(app(), get("/api/stations/?state=TX&limit=abc")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(body["hint"], STATE_HINT);
    }
}
