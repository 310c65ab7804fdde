//! OpenRouteService response types.
//!
//! Only the fields the server reads are modelled; everything else in the
//! GeoJSON responses is ignored.

use serde::Deserialize;

/// `GET /geocode/search` response (GeoJSON feature collection).
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeFeature {
    pub geometry: PointGeometry,
    #[serde(default)]
    pub properties: GeocodeProperties,
}

#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    /// `[lon, lat]`
    pub coordinates: [f64; 2],
}

#[derive(Debug, Default, Deserialize)]
pub struct GeocodeProperties {
    pub label: Option<String>,
}

/// `POST /v2/directions/{profile}/geojson` response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub features: Vec<DirectionsFeature>,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsFeature {
    pub geometry: LineGeometry,
    pub properties: DirectionsProperties,
}

#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// `[[lon, lat], ...]`
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsProperties {
    pub summary: DirectionsSummary,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsSummary {
    /// Metres. Omitted by the API for zero-length routes.
    #[serde(default)]
    pub distance: f64,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Structured { code: Option<u32>, message: String },
    Plain(String),
}

impl ErrorDetail {
    pub fn message(&self) -> &str {
        match self {
            ErrorDetail::Structured { message, .. } => message,
            ErrorDetail::Plain(message) => message,
        }
    }
}
