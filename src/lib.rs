//! coverage-planner core
//!
//! Rasterizes an area and its obstacles into an occupancy grid, decomposes
//! free space into boustrophedon sweeps, stitches them with shortest
//! connectors, and keeps the strategy with the best coverage.

pub mod error;
pub mod geometry;
pub mod grid;
pub mod sweep;
pub mod connector;
pub mod metrics;
pub mod planner;
pub mod traits;
pub mod memory;
pub mod cache;
pub mod service;

pub use error::{PlannerError, Result};
pub use grid::{build_grid, Cell, CellState, OccupancyGrid};
pub use planner::{plan, plan_with, Candidate, PlanOptions, PlanResult};
