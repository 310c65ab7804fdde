//! Fuel station catalog.
//!
//! The catalog is loaded once at startup from a CSV price dataset and is
//! read-only afterwards, so it can be shared between requests without
//! synchronization.

mod error;
mod loader;
mod stations;

pub use error::CatalogError;
pub use loader::REQUIRED_COLUMNS;
pub use stations::StationCatalog;
