//! Map-backed geometry provider.
//!
//! Holds areas in memory. Useful for tests and for callers that load their
//! geometry up front. Mutating an area here does not touch any grid cache;
//! callers must invalidate the cache themselves.

use std::collections::HashMap;

use crate::geometry::Polygon;
use crate::traits::{AreaGeometry, AreaId, GeometryProvider};

#[derive(Debug, Clone)]
pub struct InMemoryGeometry<K: AreaId> {
    areas: HashMap<K, AreaGeometry>,
}

impl<K: AreaId> Default for InMemoryGeometry<K> {
    fn default() -> Self {
        Self {
            areas: HashMap::new(),
        }
    }
}

impl<K: AreaId> InMemoryGeometry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an area boundary, clearing its obstacles.
    pub fn insert_area(&mut self, area_id: K, area: Polygon) {
        self.areas.insert(area_id, AreaGeometry::new(area, Vec::new()));
    }

    /// Adds an obstacle. Returns false if the area is unknown.
    pub fn add_obstacle(&mut self, area_id: &K, obstacle: Polygon) -> bool {
        match self.areas.get_mut(area_id) {
            Some(geometry) => {
                geometry.obstacles.push(obstacle);
                true
            }
            None => false,
        }
    }

    pub fn remove_area(&mut self, area_id: &K) -> Option<AreaGeometry> {
        self.areas.remove(area_id)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

impl<K: AreaId> GeometryProvider for InMemoryGeometry<K> {
    type AreaId = K;

    fn geometry_for(&self, area_id: &K) -> Option<AreaGeometry> {
        self.areas.get(area_id).cloned()
    }
}
