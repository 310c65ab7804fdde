//! Routing provider error types.

use crate::domain::Coord;

/// Errors from geocoding and routing.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// Geocoding returned no match for the name
    #[error("location not found: '{name}'")]
    LocationNotFound { name: String },

    /// The name resolved to a point outside the supported region
    #[error("location '{name}' at {coord} is outside the supported region")]
    OutOfBounds { name: String, coord: Coord },

    /// The provider could not connect the two points
    #[error("no driving route between {from} and {to}: {message}")]
    Unroutable {
        from: Coord,
        to: Coord,
        message: String,
    },

    /// A provider call did not complete within the configured timeout
    #[error("{operation} timed out")]
    Timeout { operation: &'static str },

    /// HTTP request failed (network error, connect failure, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure reported to a caller that shared another's lookup
    #[error("HTTP error: {message}")]
    Transport { message: String },

    /// Provider returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the provider
    #[error("rate limited by routing provider")]
    RateLimited,

    /// Invalid or missing API key
    #[error("unauthorized: check ORS_API_KEY")]
    Unauthorized,

    /// Response body did not match the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl RoutingError {
    /// Whether repeating the same call might succeed.
    ///
    /// Lookups are read-only, so transient transport failures are safe to
    /// retry. Definite answers (not found, unroutable, out of bounds) and
    /// credential problems are not.
    pub fn is_transient(&self) -> bool {
        match self {
            RoutingError::Timeout { .. }
            | RoutingError::Http(_)
            | RoutingError::Transport { .. }
            | RoutingError::RateLimited => true,
            RoutingError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// An owned copy of this error.
    ///
    /// `reqwest::Error` cannot be cloned, so `Http` becomes `Transport`
    /// with the same message.
    pub fn duplicate(&self) -> RoutingError {
        match self {
            RoutingError::LocationNotFound { name } => {
                RoutingError::LocationNotFound { name: name.clone() }
            }
            RoutingError::OutOfBounds { name, coord } => RoutingError::OutOfBounds {
                name: name.clone(),
                coord: *coord,
            },
            RoutingError::Unroutable { from, to, message } => RoutingError::Unroutable {
                from: *from,
                to: *to,
                message: message.clone(),
            },
            RoutingError::Timeout { operation } => RoutingError::Timeout {
                operation: *operation,
            },
            RoutingError::Http(e) => RoutingError::Transport {
                message: e.to_string(),
            },
            RoutingError::Transport { message } => RoutingError::Transport {
                message: message.clone(),
            },
            RoutingError::Api { status, message } => RoutingError::Api {
                status: *status,
                message: message.clone(),
            },
            RoutingError::RateLimited => RoutingError::RateLimited,
            RoutingError::Unauthorized => RoutingError::Unauthorized,
            RoutingError::Json { message } => RoutingError::Json {
                message: message.clone(),
            },
        }
    }
}
