//! Domain types for the fuel route planner.
//!
//! This module contains the validated value types shared by the catalog,
//! the routing adapter and the stop planner. All types enforce their
//! invariants at construction time, so code that receives these types can
//! trust their validity.

mod coord;
mod price;
mod region;
mod route;
mod station;

pub use coord::{Coord, InvalidCoord};
pub use price::{InvalidPrice, PricePerGallon};
pub use region::{BoundingBox, ServiceRegion};
pub use route::{Polyline, RouteResult};
pub use station::{InvalidStateCode, StateCode, StationRecord};
