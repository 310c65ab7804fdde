//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::AdapterConfig;
use crate::planner::FuelPlanConfig;
use crate::routing::OrsConfig;

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or blank
    #[error("{name} must be set (or set FUEL_ROUTE_MOCK_DATA to run offline)")]
    Missing { name: &'static str },

    /// A variable could not be parsed
    #[error("invalid {name}='{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Where route and geocode lookups go.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderSource {
    /// OpenRouteService with an API key
    Ors { api_key: String, base_url: String },

    /// Offline fixture file
    Mock { path: PathBuf },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub stations_csv: PathBuf,
    pub provider: ProviderSource,
    pub provider_timeout_secs: u64,
    pub provider_max_attempts: u32,
    pub search_radius_miles: f64,
    pub default_price_per_gallon: f64,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let provider = match var("FUEL_ROUTE_MOCK_DATA") {
            Some(path) => ProviderSource::Mock { path: path.into() },
            None => ProviderSource::Ors {
                api_key: var("ORS_API_KEY").ok_or(ConfigError::Missing { name: "ORS_API_KEY" })?,
                base_url: var("ORS_BASE_URL")
                    .unwrap_or_else(|| "https://api.openrouteservice.org".to_string()),
            },
        };

        let search_radius_miles: f64 = parse_or("SEARCH_RADIUS_MILES", var("SEARCH_RADIUS_MILES"), 100.0)?;
        positive("SEARCH_RADIUS_MILES", search_radius_miles)?;

        let default_price_per_gallon: f64 =
            parse_or("DEFAULT_PRICE_PER_GALLON", var("DEFAULT_PRICE_PER_GALLON"), 3.50)?;
        positive("DEFAULT_PRICE_PER_GALLON", default_price_per_gallon)?;

        let provider_timeout_secs: u64 = parse_or("PROVIDER_TIMEOUT_SECS", var("PROVIDER_TIMEOUT_SECS"), 10)?;
        if provider_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "PROVIDER_TIMEOUT_SECS",
                value: provider_timeout_secs.to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }

        let provider_max_attempts: u32 = parse_or("PROVIDER_MAX_ATTEMPTS", var("PROVIDER_MAX_ATTEMPTS"), 2)?;
        if !(1..=2).contains(&provider_max_attempts) {
            return Err(ConfigError::Invalid {
                name: "PROVIDER_MAX_ATTEMPTS",
                value: provider_max_attempts.to_string(),
                reason: "must be 1 or 2".to_string(),
            });
        }

        Ok(Self {
            bind: parse_or(
                "FUEL_ROUTE_BIND",
                var("FUEL_ROUTE_BIND"),
                SocketAddr::from(([127, 0, 0, 1], 8000)),
            )?,
            stations_csv: var("FUEL_PRICES_CSV")
                .unwrap_or_else(|| "data/fuel_prices.csv".to_string())
                .into(),
            provider,
            provider_timeout_secs,
            provider_max_attempts,
            search_radius_miles,
            default_price_per_gallon,
        })
    }

    /// Adapter settings derived from this configuration.
    pub fn adapter_config(&self) -> AdapterConfig {
        AdapterConfig {
            call_timeout: Duration::from_secs(self.provider_timeout_secs),
            max_attempts: self.provider_max_attempts,
            ..AdapterConfig::default()
        }
    }

    /// Fuel planning policy derived from this configuration.
    pub fn plan_config(&self) -> FuelPlanConfig {
        FuelPlanConfig::default()
            .with_search_radius(self.search_radius_miles)
            .with_default_price(self.default_price_per_gallon)
    }

    /// OpenRouteService client settings, unless running offline.
    pub fn ors_config(&self) -> Option<OrsConfig> {
        match &self.provider {
            ProviderSource::Ors { api_key, base_url } => Some(
                OrsConfig::new(api_key.as_str())
                    .with_base_url(base_url.as_str())
                    .with_timeout(self.provider_timeout_secs),
            ),
            ProviderSource::Mock { .. } => None,
        }
    }
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value: v,
        }),
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "must be a positive number".to_string(),
        })
    }
}
