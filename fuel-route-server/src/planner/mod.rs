//! Fuel stop planning.
//!
//! Given a resolved route and the station catalog, this module picks the
//! cheapest nearby station at each refuelling checkpoint and estimates the
//! fuel needed and its cost for the whole trip.

mod config;
mod stops;
mod summary;

pub use config::FuelPlanConfig;
pub use stops::{FuelStop, checkpoints, cheapest_near, select_stops};
pub use summary::{FuelSummary, compute_summary};
