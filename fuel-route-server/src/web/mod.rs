//! Web layer for the fuel route planner.
//!
//! Provides HTTP endpoints for route calculation, station lookup and
//! health checks.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
