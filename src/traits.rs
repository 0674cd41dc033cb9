//! Collaborator traits for the coverage planner.
//!
//! These are intentionally minimal. The layer that owns areas and obstacles
//! implements them for its own storage.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::geometry::Polygon;

/// Identifier of a coverage area.
pub trait AreaId: Clone + Eq + Hash + Debug {}

impl<T> AreaId for T where T: Clone + Eq + Hash + Debug {}

/// Boundary and obstacles of one area, as currently stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGeometry {
    pub area: Polygon,
    pub obstacles: Vec<Polygon>,
}

impl AreaGeometry {
    pub fn new(area: Polygon, obstacles: Vec<Polygon>) -> Self {
        Self { area, obstacles }
    }
}

/// Supplies the current geometry for an area.
pub trait GeometryProvider {
    type AreaId: AreaId;

    /// Returns `None` if the area does not exist.
    fn geometry_for(&self, area_id: &Self::AreaId) -> Option<AreaGeometry>;
}
