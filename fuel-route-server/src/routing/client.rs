//! OpenRouteService HTTP client.
//!
//! Geocodes place names with the Pelias search endpoint (restricted to the
//! USA) and fetches driving routes as GeoJSON.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::json;
use tracing::debug;

use crate::domain::Coord;

use super::error::RoutingError;
use super::provider::{ProviderRoute, RouteProvider};
use super::types::{DirectionsResponse, ErrorDetail, ErrorResponse, GeocodeResponse};

/// Default base URL for the OpenRouteService API.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Miles per metre.
const MILES_PER_METRE: f64 = 0.000621371;

/// Configuration for the OpenRouteService client.
#[derive(Debug, Clone)]
pub struct OrsConfig {
    /// API key, sent in the `Authorization` header
    pub api_key: String,
    /// Base URL for the API (defaults to the public endpoint)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Routing profile, e.g. `driving-car` or `driving-hgv`
    pub profile: String,
}

impl OrsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            profile: "driving-car".to_string(),
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the routing profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }
}

/// OpenRouteService API client.
#[derive(Debug, Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
}

impl OrsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OrsConfig) -> Result<Self, RoutingError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| RoutingError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(AUTHORIZATION, api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("fuel-route-server/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            profile: config.profile,
        })
    }

    /// Map a non-success status to an error, consuming the response body.
    async fn status_error(response: reqwest::Response) -> RoutingError {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return RoutingError::Unauthorized;
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return RoutingError::RateLimited;
        }

        let body = response.text().await.unwrap_or_default();
        RoutingError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        }
    }
}

/// Extract the provider's error message from a body, falling back to the
/// (truncated) raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error: ErrorDetail::Structured {
                code: Some(code),
                message,
            },
        }) => format!("{message} (code {code})"),
        Ok(resp) => resp.error.message().to_string(),
        Err(_) => body.chars().take(500).collect(),
    }
}

#[async_trait]
impl RouteProvider for OrsClient {
    async fn geocode(&self, name: &str) -> Result<Coord, RoutingError> {
        let url = format!("{}/geocode/search", self.base_url);
        debug!(name, "geocoding via OpenRouteService");

        let response = self
            .http
            .get(&url)
            .query(&[("text", name), ("boundary.country", "US"), ("size", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body = response.text().await?;
        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Json {
                message: e.to_string(),
            })?;

        let feature = parsed
            .features
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::LocationNotFound {
                name: name.to_string(),
            })?;

        if let Some(label) = &feature.properties.label {
            debug!(name, label, "geocode match");
        }

        let [lon, lat] = feature.geometry.coordinates;
        Coord::new(lon, lat).map_err(|e| RoutingError::Json {
            message: e.to_string(),
        })
    }

    async fn route(&self, from: Coord, to: Coord) -> Result<ProviderRoute, RoutingError> {
        let url = format!("{}/v2/directions/{}/geojson", self.base_url, self.profile);
        debug!(%from, %to, "routing via OpenRouteService");

        let response = self
            .http
            .post(&url)
            .json(&json!({ "coordinates": [from.to_pair(), to.to_pair()] }))
            .send()
            .await?;

        let status = response.status();
        // The directions endpoint answers 404 (and sometimes 400) when no
        // routable point or connecting route exists.
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Unroutable {
                from,
                to,
                message: error_message(&body),
            });
        }

        if !status.is_success() {
            return Err(Self::status_error(response).await);
        }

        let body = response.text().await?;
        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Json {
                message: e.to_string(),
            })?;

        let feature = parsed
            .features
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::Unroutable {
                from,
                to,
                message: "no route in response".to_string(),
            })?;

        let geometry = feature
            .geometry
            .coordinates
            .into_iter()
            .map(Coord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RoutingError::Json {
                message: e.to_string(),
            })?;

        Ok(ProviderRoute {
            geometry,
            distance_miles: feature.properties.summary.distance * MILES_PER_METRE,
        })
    }
}
