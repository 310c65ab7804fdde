//! Geocoding and driving-route providers.
//!
//! The [`RouteProvider`] trait is the seam between the planner and whichever
//! external service resolves place names and driving paths. Two
//! implementations ship with the server:
//! - [`OrsClient`] calls the OpenRouteService HTTP API and needs an API key
//! - [`MockRouteProvider`] serves fixed locations and routes for tests and
//!   offline development

mod client;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{OrsClient, OrsConfig};
pub use error::RoutingError;
pub use mock::MockRouteProvider;
pub use provider::{ProviderRoute, RouteProvider};
