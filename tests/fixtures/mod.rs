//! Test fixtures for coverage-planner.
//!
//! Provides:
//! - Floor plans (area boundary plus obstacles) in metres
//! - An ASCII grid builder for hand-drawn occupancy grids

pub mod floor_plans;

pub use floor_plans::*;
