//! Coverage planner: evaluates sweep strategies and selects the best one.
//!
//! Each strategy sweeps the grid into segments, stitches consecutive
//! segments with shortest connectors, and is scored by coverage. When two
//! segments cannot be connected the path keeps both segments back to back
//! and records a [`PathGap`] at the jump, so a partitioned path is visible
//! to callers instead of looking like a continuous traversal.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::connector::connect;
use crate::error::{PlannerError, Result};
use crate::geometry::Point;
use crate::grid::{Cell, OccupancyGrid};
use crate::metrics::{measure, CoverageMetrics};
use crate::sweep::{Segment, SweepStrategy};

#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Strategies to evaluate. Ties in coverage go to the earliest entry.
    pub strategies: Vec<SweepStrategy>,
    /// Evaluate strategies concurrently on the rayon pool.
    pub parallel: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            strategies: SweepStrategy::ALL.to_vec(),
            parallel: true,
        }
    }
}

impl PlanOptions {
    pub fn with_strategies(strategies: Vec<SweepStrategy>) -> Self {
        Self {
            strategies,
            ..Default::default()
        }
    }

    /// Evaluate strategies one after another on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// A discontinuity in a path where no connector could be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathGap {
    /// Index in the path of the first cell after the jump.
    pub path_index: usize,
    pub from: Cell,
    pub to: Cell,
}

/// One strategy's full path and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub strategy: SweepStrategy,
    pub path: Vec<Cell>,
    pub coverage_ratio: f64,
    pub path_length: usize,
    /// Jumps between disconnected free-space components, in path order.
    pub gaps: Vec<PathGap>,
}

impl Candidate {
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// True if the path crosses at least one unconnected gap.
    pub fn is_partitioned(&self) -> bool {
        !self.gaps.is_empty()
    }

    pub fn metrics(&self) -> CoverageMetrics {
        CoverageMetrics {
            coverage_ratio: self.coverage_ratio,
            path_length: self.path_length,
        }
    }

    /// The path as world-coordinate sample points of `grid`.
    pub fn waypoints(&self, grid: &OccupancyGrid) -> Vec<Point> {
        self.path.iter().map(|cell| grid.sample_point(*cell)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub best: Candidate,
    /// All candidates, in strategy enumeration order.
    pub candidates: Vec<Candidate>,
}

/// Plans with the default strategies.
pub fn plan(grid: &OccupancyGrid) -> PlanResult {
    evaluate(grid, &SweepStrategy::ALL, true)
}

/// Plans with an explicit strategy list.
pub fn plan_with(grid: &OccupancyGrid, options: &PlanOptions) -> Result<PlanResult> {
    if options.strategies.is_empty() {
        return Err(PlannerError::NoStrategies);
    }
    Ok(evaluate(grid, &options.strategies, options.parallel))
}

/// `strategies` must not be empty.
fn evaluate(grid: &OccupancyGrid, strategies: &[SweepStrategy], parallel: bool) -> PlanResult {
    info!(
        "Planning: starting path planning for {}x{} grid ({} free cells)",
        grid.height(),
        grid.width(),
        grid.free_count()
    );

    let candidates: Vec<Candidate> = if parallel {
        strategies
            .par_iter()
            .map(|strategy| evaluate_strategy(grid, *strategy))
            .collect()
    } else {
        strategies
            .iter()
            .map(|strategy| evaluate_strategy(grid, *strategy))
            .collect()
    };

    let mut best_idx = 0;
    for (idx, candidate) in candidates.iter().enumerate().skip(1) {
        if candidate.coverage_ratio > candidates[best_idx].coverage_ratio {
            best_idx = idx;
        }
    }
    let best = candidates[best_idx].clone();

    info!(
        "Planning: selected {} strategy with coverage {:.2}%",
        best.strategy,
        best.coverage_ratio * 100.0
    );

    PlanResult { best, candidates }
}

fn evaluate_strategy(grid: &OccupancyGrid, strategy: SweepStrategy) -> Candidate {
    debug!("Planning: running {} sweep", strategy);
    let segments = strategy.segments(grid);
    let (path, gaps) = build_full_path(grid, &segments);
    let metrics = measure(&path, grid);

    info!(
        "Planning: {} strategy - coverage: {:.2}%, length: {}, gaps: {}",
        strategy,
        metrics.coverage_ratio * 100.0,
        metrics.path_length,
        gaps.len()
    );

    Candidate {
        strategy,
        path,
        coverage_ratio: metrics.coverage_ratio,
        path_length: metrics.path_length,
        gaps,
    }
}

/// Concatenates segments, inserting the interior cells of each connector.
///
/// Connector endpoints are the neighbouring segment ends and are not
/// repeated. An unreachable connector leaves a recorded gap.
pub fn build_full_path(grid: &OccupancyGrid, segments: &[Segment]) -> (Vec<Cell>, Vec<PathGap>) {
    let mut path: Vec<Cell> = Vec::with_capacity(segments.iter().map(Vec::len).sum());
    let mut gaps = Vec::new();

    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            if let (Some(&from), Some(&to)) = (segments[i - 1].last(), segment.first()) {
                match connect(grid, from, to) {
                    Ok(connector) if connector.len() > 2 => {
                        path.extend_from_slice(&connector[1..connector.len() - 1]);
                    }
                    Ok(_) => {}
                    Err(err) => {
                        debug!("Planning: leaving gap in path: {}", err);
                        gaps.push(PathGap {
                            path_index: path.len(),
                            from,
                            to,
                        });
                    }
                }
            }
        }
        path.extend_from_slice(segment);
    }

    (path, gaps)
}
