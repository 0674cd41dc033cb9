//! Occupancy grid rasterization.
//!
//! Cells are sampled at `origin + index * resolution` on each axis: the
//! column index runs along x and the row index along y. A cell is free when
//! its sample point lies inside (or on) the area polygon and outside every
//! obstacle (obstacle boundaries block).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GeometryIssue, PlannerError, PolygonRef, Result};
use crate::geometry::{Point, Polygon};

/// Cell edge length used when a caller has no preference.
pub const DEFAULT_RESOLUTION: f64 = 0.1;

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance in cells.
    pub fn manhattan(&self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Free,
    Blocked,
}

/// Immutable row-major occupancy grid.
///
/// Deserialization goes through [`OccupancyGrid::from_states`], so a stored
/// buffer that does not match its dimensions is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredGrid")]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    resolution: f64,
    origin: Point,
    cells: Vec<CellState>,
}

#[derive(Deserialize)]
struct StoredGrid {
    width: usize,
    height: usize,
    resolution: f64,
    origin: Point,
    cells: Vec<CellState>,
}

impl TryFrom<StoredGrid> for OccupancyGrid {
    type Error = PlannerError;

    fn try_from(stored: StoredGrid) -> Result<Self> {
        Self::from_states(
            stored.width,
            stored.height,
            stored.resolution,
            stored.origin,
            stored.cells,
        )
    }
}

impl OccupancyGrid {
    /// Rebuilds a grid from a stored row-major buffer.
    pub fn from_states(
        width: usize,
        height: usize,
        resolution: f64,
        origin: Point,
        cells: Vec<CellState>,
    ) -> Result<Self> {
        check_resolution(resolution)?;
        let expected = cell_count(width, height)?;
        if cells.len() != expected {
            return Err(PlannerError::GridShapeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            resolution,
            origin,
            cells,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Flat buffer index, or `None` when out of bounds.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.width + cell.col)
    }

    pub fn get(&self, cell: Cell) -> Option<CellState> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Out-of-bounds cells are never free.
    pub fn is_free(&self, cell: Cell) -> bool {
        self.get(cell) == Some(CellState::Free)
    }

    /// Grid from rows of `.` (free) and `#` (blocked) at unit resolution.
    #[cfg(test)]
    pub(crate) fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let cells = rows
            .iter()
            .flat_map(|r| r.chars())
            .map(|c| if c == '#' { CellState::Blocked } else { CellState::Free })
            .collect();
        Self::from_states(width, height, 1.0, Point::new(0.0, 0.0), cells)
            .expect("ascii rows must have equal length")
    }

    pub fn states(&self) -> &[CellState] {
        &self.cells
    }

    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|s| **s == CellState::Free).count()
    }

    /// World coordinates of the point a cell was sampled at.
    pub fn sample_point(&self, cell: Cell) -> Point {
        Point::new(
            self.origin.x + cell.col as f64 * self.resolution,
            self.origin.y + cell.row as f64 * self.resolution,
        )
    }

    /// Free 4-connected neighbours in down, up, right, left order.
    pub fn free_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let Cell { row, col } = cell;
        let candidates = [
            row.checked_add(1).map(|r| Cell::new(r, col)),
            row.checked_sub(1).map(|r| Cell::new(r, col)),
            col.checked_add(1).map(|c| Cell::new(row, c)),
            col.checked_sub(1).map(|c| Cell::new(row, c)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(move |n| self.is_free(*n))
    }
}

fn cell_count(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or(PlannerError::GridTooLarge { width, height })
}

pub(crate) fn check_resolution(resolution: f64) -> Result<()> {
    if resolution.is_finite() && resolution > 0.0 {
        Ok(())
    } else {
        Err(PlannerError::InvalidResolution(resolution))
    }
}

/// Rasterizes an area and its obstacles into an occupancy grid.
///
/// Dimensions are `floor(extent / resolution)` per axis, so a degenerate
/// extent yields an empty grid rather than an error. Every polygon is
/// validated before any cell is sampled.
pub fn build_grid(area: &Polygon, obstacles: &[Polygon], resolution: f64) -> Result<OccupancyGrid> {
    check_resolution(resolution)?;
    area.validate(PolygonRef::Area)?;
    for (index, obstacle) in obstacles.iter().enumerate() {
        obstacle.validate(PolygonRef::Obstacle(index))?;
    }

    let bounds = area.bounds().ok_or(PlannerError::InvalidGeometry {
        polygon: PolygonRef::Area,
        issue: GeometryIssue::TooFewVertices(0),
    })?;
    let width = (bounds.width() / resolution).floor() as usize;
    let height = (bounds.height() / resolution).floor() as usize;
    let origin = Point::new(bounds.min_x, bounds.min_y);

    debug!(
        "Grid: rasterizing {}x{} cells at resolution {} against {} obstacles",
        height,
        width,
        resolution,
        obstacles.len()
    );

    let mut cells = Vec::with_capacity(cell_count(width, height)?);
    for r in 0..height {
        for c in 0..width {
            let p = Point::new(
                origin.x + c as f64 * resolution,
                origin.y + r as f64 * resolution,
            );
            let free = area.contains(p) && !obstacles.iter().any(|obs| obs.contains(p));
            cells.push(if free { CellState::Free } else { CellState::Blocked });
        }
    }

    Ok(OccupancyGrid {
        width,
        height,
        resolution,
        origin,
        cells,
    })
}
