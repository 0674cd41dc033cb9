//! Property tests for grid construction, connectors, metrics and planning.

mod fixtures;

use proptest::prelude::*;

use coverage_planner::connector::connect;
use coverage_planner::geometry::{Point, Polygon};
use coverage_planner::grid::{build_grid, Cell, CellState, OccupancyGrid};
use coverage_planner::metrics::measure;
use coverage_planner::planner::plan;

fn arb_grid() -> impl Strategy<Value = OccupancyGrid> {
    (1usize..9, 1usize..9).prop_flat_map(|(width, height)| {
        prop::collection::vec(prop::bool::weighted(0.3), width * height).prop_map(move |blocked| {
            let cells = blocked
                .into_iter()
                .map(|b| if b { CellState::Blocked } else { CellState::Free })
                .collect();
            OccupancyGrid::from_states(width, height, 1.0, Point::new(0.0, 0.0), cells).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn dimensions_truncate_extent(
        cols in 1usize..40,
        rows in 1usize..40,
        slack_x in 0.0f64..0.9,
        slack_y in 0.0f64..0.9,
        resolution in prop::sample::select(vec![0.25f64, 0.5, 1.0, 2.0]),
    ) {
        let max = (
            (cols as f64 + slack_x) * resolution,
            (rows as f64 + slack_y) * resolution,
        );
        let area = Polygon::rectangle((0.0, 0.0), max);
        let grid = build_grid(&area, &[], resolution).unwrap();
        prop_assert_eq!(grid.width(), cols);
        prop_assert_eq!(grid.height(), rows);
    }

    #[test]
    fn free_cells_match_obstacle_membership(
        x0 in 0i32..8, w in 1i32..4,
        y0 in 0i32..8, h in 1i32..4,
    ) {
        // Obstacle edges sit between sample points, so membership is unambiguous
        let (ox0, oy0) = (x0 as f64 - 0.5, y0 as f64 - 0.5);
        let (ox1, oy1) = (ox0 + w as f64, oy0 + h as f64);
        let area = Polygon::rectangle((0.0, 0.0), (10.0, 10.0));
        let obstacle = Polygon::rectangle((ox0, oy0), (ox1, oy1));
        let grid = build_grid(&area, &[obstacle], 1.0).unwrap();

        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let p = grid.sample_point(Cell::new(row, col));
                let inside_obstacle = p.x >= ox0 && p.x <= ox1 && p.y >= oy0 && p.y <= oy1;
                prop_assert_eq!(grid.is_free(Cell::new(row, col)), !inside_obstacle);
            }
        }
    }

    #[test]
    fn open_grid_connector_is_manhattan(
        r0 in 0usize..6, c0 in 0usize..7,
        r1 in 0usize..6, c1 in 0usize..7,
    ) {
        let grid = fixtures::ascii_grid(&["......."; 6]);
        let (from, to) = (Cell::new(r0, c0), Cell::new(r1, c1));
        let path = connect(&grid, from, to).unwrap();
        prop_assert_eq!(path.len(), from.manhattan(to) + 1);
        prop_assert_eq!(path.first().copied(), Some(from));
        prop_assert_eq!(path.last().copied(), Some(to));
    }

    #[test]
    fn duplicate_visit_keeps_coverage(grid in arb_grid(), pick in any::<prop::sample::Index>()) {
        let result = plan(&grid);
        let path = result.best.path.clone();
        prop_assume!(!path.is_empty());

        let before = measure(&path, &grid);
        let mut longer = path.clone();
        longer.push(path[pick.index(path.len())]);
        let after = measure(&longer, &grid);

        prop_assert_eq!(after.coverage_ratio, before.coverage_ratio);
        prop_assert_eq!(after.path_length, before.path_length + 1);
    }

    #[test]
    fn plans_are_pure_and_stay_on_free_cells(grid in arb_grid()) {
        let result = plan(&grid);
        prop_assert_eq!(&result, &plan(&grid));

        for candidate in &result.candidates {
            prop_assert!((0.0..=1.0).contains(&candidate.coverage_ratio));
            prop_assert!(candidate.path.iter().all(|cell| grid.is_free(*cell)));
            if grid.free_count() > 0 {
                prop_assert_eq!(candidate.coverage_ratio, 1.0);
            }
        }
        prop_assert!(result
            .candidates
            .iter()
            .all(|c| c.coverage_ratio <= result.best.coverage_ratio));
    }
}
