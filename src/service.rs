//! Planning entry point for service layers: resolve a cached grid, then plan.

use std::sync::Arc;

use tracing::info;

use crate::cache::GridCache;
use crate::error::Result;
use crate::grid::OccupancyGrid;
use crate::planner::{plan_with, PlanOptions, PlanResult};
use crate::traits::{AreaId, GeometryProvider};

pub struct PlannerService<K: AreaId> {
    cache: GridCache<K>,
    options: PlanOptions,
}

impl<K: AreaId> Default for PlannerService<K> {
    fn default() -> Self {
        Self::new(PlanOptions::default())
    }
}

impl<K: AreaId> PlannerService<K> {
    pub fn new(options: PlanOptions) -> Self {
        Self {
            cache: GridCache::new(),
            options,
        }
    }

    pub fn options(&self) -> &PlanOptions {
        &self.options
    }

    pub fn cache(&self) -> &GridCache<K> {
        &self.cache
    }

    /// Resolves the grid for `area_id` (cached or freshly built).
    pub fn build_or_get_grid<P>(&self, area_id: &K, provider: &P, resolution: f64) -> Result<Arc<OccupancyGrid>>
    where
        P: GeometryProvider<AreaId = K>,
    {
        self.cache.build_or_get_grid(area_id, provider, resolution)
    }

    /// Plans coverage for an area at the given resolution.
    pub fn run_plan<P>(&self, area_id: &K, provider: &P, resolution: f64) -> Result<PlanResult>
    where
        P: GeometryProvider<AreaId = K>,
    {
        info!("PlannerService: starting plan for area {:?} with resolution {}", area_id, resolution);
        let grid = self.build_or_get_grid(area_id, provider, resolution)?;
        let result = plan_with(&grid, &self.options)?;
        info!(
            "PlannerService: plan complete with {} candidates, best {}",
            result.candidates.len(),
            result.best.strategy
        );
        Ok(result)
    }

    /// Handles a geometry change for an area: its cached grids are dropped.
    pub fn invalidate(&self, area_id: &K) -> usize {
        self.cache.invalidate(area_id)
    }
}
