//! Grid cache keyed by area and resolution.
//!
//! Each `(area_id, resolution)` key owns a slot. The first caller to find a
//! slot empty builds the grid while holding that slot's lock, so concurrent
//! lookups for the same key wait for one build instead of racing. Other keys
//! are not blocked.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::{PlannerError, Result};
use crate::grid::{build_grid, check_resolution, OccupancyGrid};
use crate::traits::{AreaId, GeometryProvider};

type Slot = Arc<Mutex<Option<Arc<OccupancyGrid>>>>;

/// Resolutions are keyed by their bit pattern.
type ResolutionKey = u64;

pub struct GridCache<K: AreaId> {
    slots: Mutex<HashMap<K, HashMap<ResolutionKey, Slot>>>,
}

impl<K: AreaId> Default for GridCache<K> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: AreaId> GridCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, area_id: &K, resolution: f64) -> Slot {
        let mut slots = self.slots.lock();
        slots
            .entry(area_id.clone())
            .or_default()
            .entry(resolution.to_bits())
            .or_default()
            .clone()
    }

    /// Returns the cached grid for the key, building it from `provider` on a miss.
    ///
    /// Failed builds are not cached.
    pub fn build_or_get_grid<P>(
        &self,
        area_id: &K,
        provider: &P,
        resolution: f64,
    ) -> Result<Arc<OccupancyGrid>>
    where
        P: GeometryProvider<AreaId = K>,
    {
        check_resolution(resolution)?;
        let slot = self.slot(area_id, resolution);
        let mut cached = slot.lock();

        if let Some(grid) = cached.as_ref() {
            debug!("GridCache: using cached grid for area {:?} at {}", area_id, resolution);
            return Ok(Arc::clone(grid));
        }

        info!("GridCache: building new grid for area {:?} at {}", area_id, resolution);
        match Self::build(area_id, provider, resolution) {
            Ok(grid) => {
                *cached = Some(Arc::clone(&grid));
                Ok(grid)
            }
            Err(err) => {
                drop(cached);
                self.discard_empty_slot(area_id, resolution, &slot);
                Err(err)
            }
        }
    }

    fn build<P>(area_id: &K, provider: &P, resolution: f64) -> Result<Arc<OccupancyGrid>>
    where
        P: GeometryProvider<AreaId = K>,
    {
        let geometry = provider
            .geometry_for(area_id)
            .ok_or_else(|| PlannerError::UnknownArea(format!("{:?}", area_id)))?;
        Ok(Arc::new(build_grid(&geometry.area, &geometry.obstacles, resolution)?))
    }

    /// Removes a slot left empty by a failed build. A slot another caller is
    /// currently holding is left alone.
    fn discard_empty_slot(&self, area_id: &K, resolution: f64, slot: &Slot) {
        let mut slots = self.slots.lock();
        let Some(by_resolution) = slots.get_mut(area_id) else {
            return;
        };
        let key = resolution.to_bits();
        let removable = by_resolution.get(&key).is_some_and(|current| {
            Arc::ptr_eq(current, slot) && current.try_lock().is_some_and(|grid| grid.is_none())
        });
        if removable {
            by_resolution.remove(&key);
        }
        if by_resolution.is_empty() {
            slots.remove(area_id);
        }
    }

    /// Looks up a grid without building one.
    pub fn get(&self, area_id: &K, resolution: f64) -> Option<Arc<OccupancyGrid>> {
        let slot = {
            let slots = self.slots.lock();
            slots.get(area_id)?.get(&resolution.to_bits())?.clone()
        };
        let cached = slot.lock();
        cached.clone()
    }

    /// Stores a grid produced elsewhere, e.g. loaded from persistence.
    pub fn insert(&self, area_id: &K, grid: OccupancyGrid) -> Arc<OccupancyGrid> {
        let grid = Arc::new(grid);
        let slot = self.slot(area_id, grid.resolution());
        *slot.lock() = Some(Arc::clone(&grid));
        grid
    }

    /// Drops every cached resolution for an area. Returns how many grids were dropped.
    ///
    /// A build already running for the area finishes into its detached slot;
    /// the next lookup starts from an empty slot and rebuilds.
    pub fn invalidate(&self, area_id: &K) -> usize {
        let removed = self.slots.lock().remove(area_id);
        let dropped = removed
            .map(|slots| slots.values().filter(|slot| slot.lock().is_some()).count())
            .unwrap_or(0);
        debug!("GridCache: invalidated {} grids for area {:?}", dropped, area_id);
        dropped
    }

    /// Number of cached grids.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = self
            .slots
            .lock()
            .values()
            .flat_map(|by_resolution| by_resolution.values().cloned())
            .collect();
        slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
