//! Fuel route planner server.
//!
//! A web service that answers: "driving from here to there, where should
//! I stop for fuel, and what will it cost?"

pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod planner;
pub mod routing;
pub mod trip;
pub mod web;
