//! Boustrophedon sweep decomposition.
//!
//! A sweep walks scan lines in index order and flips traversal direction on
//! every line, splitting each line into maximal runs of free cells. The
//! order segments come out in is the order they are meant to be visited.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::{Cell, OccupancyGrid};

/// Primary axis of a sweep: which index selects the scan line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// One scan line per row, traversed along columns.
    Rows,
    /// One scan line per column, traversed along rows.
    Columns,
}

/// Traversal direction of the first scan line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// A maximal run of contiguous free cells on one scan line. Never empty.
pub type Segment = Vec<Cell>;

/// The sweep strategies the planner can evaluate, in enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepStrategy {
    /// Row by row, alternating left-to-right and right-to-left.
    Horizontal,
    /// Column by column, alternating top-to-bottom and bottom-to-top.
    Vertical,
}

impl SweepStrategy {
    pub const ALL: [SweepStrategy; 2] = [SweepStrategy::Horizontal, SweepStrategy::Vertical];

    pub fn name(&self) -> &'static str {
        match self {
            SweepStrategy::Horizontal => "horizontal",
            SweepStrategy::Vertical => "vertical",
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            SweepStrategy::Horizontal => Axis::Rows,
            SweepStrategy::Vertical => Axis::Columns,
        }
    }

    pub fn segments(&self, grid: &OccupancyGrid) -> Vec<Segment> {
        sweep(grid, self.axis(), Direction::Forward)
    }
}

impl fmt::Display for SweepStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decomposes the grid's free space into segments along `axis`.
pub fn sweep(grid: &OccupancyGrid, axis: Axis, start_direction: Direction) -> Vec<Segment> {
    let (lines, line_len) = match axis {
        Axis::Rows => (grid.height(), grid.width()),
        Axis::Columns => (grid.width(), grid.height()),
    };
    debug!("Sweep: {:?} sweep over {} scan lines", axis, lines);

    let mut segments = Vec::new();
    let mut direction = start_direction;

    for line in 0..lines {
        let mut current: Segment = Vec::new();

        for step in 0..line_len {
            let offset = match direction {
                Direction::Forward => step,
                Direction::Reverse => line_len - 1 - step,
            };
            let cell = match axis {
                Axis::Rows => Cell::new(line, offset),
                Axis::Columns => Cell::new(offset, line),
            };

            if grid.is_free(cell) {
                current.push(cell);
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }

        if !current.is_empty() {
            segments.push(current);
        }
        direction = direction.flipped();
    }

    segments
}
