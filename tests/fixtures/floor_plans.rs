//! Floor plans used across the integration tests.
#![allow(dead_code)]

use coverage_planner::geometry::{Point, Polygon};
use coverage_planner::grid::{CellState, OccupancyGrid};
use coverage_planner::traits::AreaGeometry;

/// A plain 4m x 4m room.
pub fn open_room() -> AreaGeometry {
    AreaGeometry::new(Polygon::rectangle((0.0, 0.0), (4.0, 4.0)), Vec::new())
}

/// 10m x 6m hall with a pillar in the middle.
pub fn hall_with_pillar() -> AreaGeometry {
    AreaGeometry::new(
        Polygon::rectangle((0.0, 0.0), (10.0, 6.0)),
        vec![Polygon::rectangle((4.5, 2.5), (5.5, 3.5))],
    )
}

/// 8m x 8m L-shaped room: the top-right 4m x 4m quadrant is missing.
pub fn l_shaped_room() -> AreaGeometry {
    AreaGeometry::new(
        Polygon::from_coords(&[
            (0.0, 0.0),
            (8.0, 0.0),
            (8.0, 4.0),
            (4.0, 4.0),
            (4.0, 8.0),
            (0.0, 8.0),
        ]),
        Vec::new(),
    )
}

/// 6m x 4m room split in two by a wall running its full height.
pub fn split_room() -> AreaGeometry {
    AreaGeometry::new(
        Polygon::rectangle((0.0, 0.0), (6.0, 4.0)),
        vec![Polygon::rectangle((2.5, -1.0), (3.5, 5.0))],
    )
}

/// Room entirely covered by a rug nobody may drive over.
pub fn covered_room() -> AreaGeometry {
    AreaGeometry::new(
        Polygon::rectangle((0.0, 0.0), (3.0, 3.0)),
        vec![Polygon::rectangle((-1.0, -1.0), (4.0, 4.0))],
    )
}

/// Builds a grid from rows of `.` (free) and `#` (blocked).
pub fn ascii_grid(rows: &[&str]) -> OccupancyGrid {
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.len());
    let cells = rows
        .iter()
        .flat_map(|r| r.chars())
        .map(|c| if c == '#' { CellState::Blocked } else { CellState::Free })
        .collect();
    OccupancyGrid::from_states(width, height, 1.0, Point::new(0.0, 0.0), cells)
        .expect("ascii rows must have equal length")
}
