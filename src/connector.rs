//! Shortest connector paths between segment endpoints.
//!
//! A* over the 4-connected free cells with unit step cost and a Manhattan
//! heuristic. Frontier ties break on the smaller heuristic, then on push
//! order, so results are reproducible for a given grid.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use thiserror::Error;
use tracing::{debug, trace};

use crate::grid::{Cell, OccupancyGrid};

/// Reason a connector could not be found.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectError {
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),

    #[error("start cell {0} is blocked")]
    StartBlocked(Cell),

    #[error("goal cell {0} is blocked")]
    GoalBlocked(Cell),

    #[error("no free path from {from} to {to}")]
    Unreachable { from: Cell, to: Cell },
}

/// A node in the A* frontier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrontierNode {
    cell: Cell,
    f_cost: usize,
    h_cost: usize,
    seq: u64,
}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds a shortest free-cell path from `from` to `to`, both inclusive.
///
/// Identical endpoints yield a single-cell path.
pub fn connect(grid: &OccupancyGrid, from: Cell, to: Cell) -> Result<Vec<Cell>, ConnectError> {
    trace!("[Connector] connect: from={} to={}", from, to);

    let start_idx = grid.index(from).ok_or(ConnectError::OutOfBounds(from))?;
    let goal_idx = grid.index(to).ok_or(ConnectError::OutOfBounds(to))?;
    if !grid.is_free(from) {
        return Err(ConnectError::StartBlocked(from));
    }
    if !grid.is_free(to) {
        return Err(ConnectError::GoalBlocked(to));
    }

    let size = grid.width() * grid.height();
    let mut g_scores = vec![usize::MAX; size];
    let mut came_from: Vec<Option<Cell>> = vec![None; size];
    let mut closed = vec![false; size];
    let mut open_set = BinaryHeap::new();
    let mut seq = 0u64;

    g_scores[start_idx] = 0;
    let h_start = from.manhattan(to);
    open_set.push(FrontierNode {
        cell: from,
        f_cost: h_start,
        h_cost: h_start,
        seq,
    });

    let mut nodes_expanded = 0usize;

    while let Some(current) = open_set.pop() {
        let Some(current_idx) = grid.index(current.cell) else {
            continue;
        };
        if closed[current_idx] {
            continue;
        }
        if current_idx == goal_idx {
            return Ok(reconstruct_path(grid, &came_from, to));
        }
        closed[current_idx] = true;
        nodes_expanded += 1;

        let current_g = g_scores[current_idx];
        for neighbor in grid.free_neighbors(current.cell) {
            let Some(neighbor_idx) = grid.index(neighbor) else {
                continue;
            };
            if closed[neighbor_idx] {
                continue;
            }

            let tentative_g = current_g + 1;
            if tentative_g < g_scores[neighbor_idx] {
                g_scores[neighbor_idx] = tentative_g;
                came_from[neighbor_idx] = Some(current.cell);
                let h = neighbor.manhattan(to);
                seq += 1;
                open_set.push(FrontierNode {
                    cell: neighbor,
                    f_cost: tentative_g + h,
                    h_cost: h,
                    seq,
                });
            }
        }
    }

    debug!(
        "[Connector] unreachable after expanding {} nodes: {} -> {}",
        nodes_expanded, from, to
    );
    Err(ConnectError::Unreachable { from, to })
}

fn reconstruct_path(grid: &OccupancyGrid, came_from: &[Option<Cell>], goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = grid.index(current).and_then(|i| came_from[i]) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
