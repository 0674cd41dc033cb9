//! Coverage scoring for assembled paths.

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, OccupancyGrid};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageMetrics {
    /// Distinct free cells visited over all free cells, in `[0, 1]`.
    pub coverage_ratio: f64,
    /// Cells in the path, revisits included.
    pub path_length: usize,
}

/// Scores a path against the grid it was planned on.
///
/// A grid with no free cells scores a coverage of zero.
pub fn measure(path: &[Cell], grid: &OccupancyGrid) -> CoverageMetrics {
    let free_cells = grid.free_count();
    let coverage_ratio = if free_cells == 0 {
        0.0
    } else {
        let mut visited = vec![false; grid.width() * grid.height()];
        let mut covered = 0usize;
        for &cell in path {
            if !grid.is_free(cell) {
                continue;
            }
            if let Some(i) = grid.index(cell) {
                if !visited[i] {
                    visited[i] = true;
                    covered += 1;
                }
            }
        }
        covered as f64 / free_cells as f64
    };

    CoverageMetrics {
        coverage_ratio,
        path_length: path.len(),
    }
}
