//! # Structural Layout Operations
//!
//! Insert and remove rows or panels, and reset the grid to uniform sizes.
//!
//! Every function here is total: it takes a grid and returns a grid. A request
//! that would break a count limit, or that names a row or panel that does not
//! exist, returns a clone equal to the input. Insertions and removals always
//! reset the affected axis to equal shares; earlier custom proportions on that
//! axis are discarded.
//!
//! ## Example
//!
//! ```rust
//! use grid_core::grid::Grid;
//! use grid_core::mutator::{add_panel, Side};
//!
//! let grid = Grid::new();
//! let grid = add_panel(&grid, 0, Side::After);
//! assert_eq!(grid.row(0).unwrap().panel_count(), 3);
//!
//! // Row 0 is full now: no change.
//! assert_eq!(add_panel(&grid, 0, Side::After), grid);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::GridError;
use crate::grid::{normalize_grid, normalize_row, Grid};

/// Which side of the anchor a new row or panel goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Above the anchor row, or left of the anchor panel
    Before,
    /// Below the anchor row, or right of the anchor panel
    After,
}

impl Side {
    fn insert_index(self, anchor: usize) -> usize {
        match self {
            Side::Before => anchor,
            Side::After => anchor + 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Before => write!(f, "before"),
            Side::After => write!(f, "after"),
        }
    }
}

impl FromStr for Side {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "before" | "above" | "left" | "top" => Ok(Side::Before),
            "after" | "below" | "right" | "bottom" => Ok(Side::After),
            _ => Err(GridError::invalid_command(s, "side must be 'before' or 'after'")),
        }
    }
}

/// Insert a new row of two empty 50/50 panels next to `anchor`, then give
/// every row an equal height.
///
/// No-op when the grid already has the maximum number of rows or `anchor`
/// does not exist.
pub fn add_row(grid: &Grid, anchor: usize, side: Side) -> Grid {
    if !grid.can_add_row() {
        debug!(rows = grid.row_count(), "add_row ignored: row limit reached");
        return grid.clone();
    }
    if anchor >= grid.row_count() {
        debug!(anchor, rows = grid.row_count(), "add_row ignored: no such anchor row");
        return grid.clone();
    }

    let mut next = grid.clone();
    let row = next.new_row(0.0);
    let index = side.insert_index(anchor);
    info!(row_id = %row.id(), index, "row added");
    next.rows.insert(index, row);
    normalize_grid(&next)
}

/// Remove the row at `row`, then give the remaining rows equal heights.
///
/// No-op when only one row is left or the index does not exist.
pub fn remove_row(grid: &Grid, row: usize) -> Grid {
    if !grid.can_remove_row() {
        debug!("remove_row ignored: last row");
        return grid.clone();
    }
    if row >= grid.row_count() {
        debug!(row, rows = grid.row_count(), "remove_row ignored: no such row");
        return grid.clone();
    }

    let mut next = grid.clone();
    let removed = next.rows.remove(row);
    info!(row_id = %removed.id(), index = row, "row removed");
    normalize_grid(&next)
}

/// Insert an empty panel at the start (`Before`) or end (`After`) of a row,
/// then give that row's panels equal widths.
///
/// No-op when the row is full or does not exist.
pub fn add_panel(grid: &Grid, row: usize, side: Side) -> Grid {
    let anchor = match side {
        Side::Before => 0,
        Side::After => grid
            .row(row)
            .map(|r| r.panel_count().saturating_sub(1))
            .unwrap_or(0),
    };
    insert_panel(grid, row, anchor, side)
}

/// Insert an empty panel beside panel `anchor` of a row, then give that
/// row's panels equal widths. Other rows are untouched.
///
/// No-op when the row is full or the row or anchor panel does not exist.
pub fn insert_panel(grid: &Grid, row: usize, anchor: usize, side: Side) -> Grid {
    let Some(target) = grid.row(row) else {
        debug!(row, "insert_panel ignored: no such row");
        return grid.clone();
    };
    if !grid.can_add_panel(row) {
        debug!(row, panels = target.panel_count(), "insert_panel ignored: panel limit reached");
        return grid.clone();
    }
    if anchor >= target.panel_count() {
        debug!(row, anchor, "insert_panel ignored: no such anchor panel");
        return grid.clone();
    }

    let mut next = grid.clone();
    let panel = next.new_panel(0.0);
    let index = side.insert_index(anchor);
    info!(panel_id = %panel.id(), row, index, "panel added");
    next.rows[row].panels.insert(index, panel);
    next.rows[row] = normalize_row(&next.rows[row]);
    next
}

/// Remove panel `panel` from a row, then give the row's remaining panels
/// equal widths.
///
/// No-op when it is the row's last panel or the indices do not exist.
pub fn remove_panel(grid: &Grid, row: usize, panel: usize) -> Grid {
    if !grid.can_remove_panel(row) {
        debug!(row, "remove_panel ignored: last panel or no such row");
        return grid.clone();
    }
    if grid.panel(row, panel).is_none() {
        debug!(row, panel, "remove_panel ignored: no such panel");
        return grid.clone();
    }

    let mut next = grid.clone();
    let removed = next.rows[row].panels.remove(panel);
    info!(panel_id = %removed.id(), row, index = panel, "panel removed");
    next.rows[row] = normalize_row(&next.rows[row]);
    next
}

/// Restore equal heights for all rows and equal widths inside every row.
pub fn reset_layout(grid: &Grid) -> Grid {
    let mut next = normalize_grid(grid);
    next.rows = next.rows.iter().map(normalize_row).collect();
    info!(rows = next.row_count(), "layout reset");
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{approx_eq, ContentHandle, MAX_PANELS};

    const THIRD: f64 = 100.0 / 3.0;

    fn assert_sizes(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!(approx_eq(*a, *e), "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn test_add_panel_after_collapses_to_thirds() {
        let grid = Grid::new();
        let next = add_panel(&grid, 0, Side::After);

        assert_sizes(&next.panel_widths(0).unwrap(), &[THIRD, THIRD, THIRD]);
        assert_eq!(next.row(1), grid.row(1));
        assert!(next.validate().is_ok());

        // New panel is last and empty; existing ids keep their order.
        let old_ids: Vec<_> = grid.row(0).unwrap().panels().iter().map(|p| p.id()).collect();
        let new_ids: Vec<_> = next.row(0).unwrap().panels().iter().map(|p| p.id()).collect();
        assert_eq!(&new_ids[..2], &old_ids[..]);
        assert!(!old_ids.contains(&new_ids[2]));
        assert!(next.panel(0, 2).unwrap().content().is_none());
    }

    #[test]
    fn test_add_panel_at_limit_is_noop() {
        let grid = add_panel(&Grid::new(), 0, Side::After);
        let again = add_panel(&grid, 0, Side::After);
        assert_eq!(again, grid);
        assert_eq!(again.row(0).unwrap().panel_count(), MAX_PANELS);
    }

    #[test]
    fn test_add_panel_before_goes_first() {
        let grid = Grid::new();
        let first_id = grid.panel(1, 0).unwrap().id();
        let next = add_panel(&grid, 1, Side::Before);
        assert_ne!(next.panel(1, 0).unwrap().id(), first_id);
        assert_eq!(next.panel(1, 1).unwrap().id(), first_id);
    }

    #[test]
    fn test_insert_panel_beside_anchor() {
        let grid = Grid::with_shape(&[2]).unwrap();
        let left = grid.panel(0, 0).unwrap().id();
        let right = grid.panel(0, 1).unwrap().id();

        let next = insert_panel(&grid, 0, 0, Side::After);
        assert_eq!(next.panel(0, 0).unwrap().id(), left);
        assert_eq!(next.panel(0, 2).unwrap().id(), right);

        let next = insert_panel(&grid, 0, 1, Side::Before);
        assert_eq!(next.panel(0, 0).unwrap().id(), left);
        assert_eq!(next.panel(0, 2).unwrap().id(), right);

        assert_eq!(insert_panel(&grid, 0, 5, Side::After), grid);
    }

    #[test]
    fn test_add_panel_discards_custom_widths() {
        let grid = Grid::from_sizes(&[(100.0, vec![80.0, 20.0])]).unwrap();
        let next = add_panel(&grid, 0, Side::Before);
        assert_sizes(&next.panel_widths(0).unwrap(), &[THIRD, THIRD, THIRD]);
    }

    #[test]
    fn test_add_row_positions_and_heights() {
        let grid = Grid::new();
        let top = grid.row(0).unwrap().id();
        let bottom = grid.row(1).unwrap().id();

        let after = add_row(&grid, 0, Side::After);
        assert_eq!(after.row_count(), 3);
        assert_eq!(after.row(0).unwrap().id(), top);
        assert_eq!(after.row(2).unwrap().id(), bottom);
        assert_sizes(&after.row_heights(), &[THIRD, THIRD, THIRD]);
        assert_eq!(after.panel_widths(1), Some(vec![50.0, 50.0]));
        assert!(after.validate().is_ok());

        let before = add_row(&grid, 0, Side::Before);
        assert_eq!(before.row(1).unwrap().id(), top);
    }

    #[test]
    fn test_add_row_keeps_existing_panel_widths() {
        let grid = Grid::from_sizes(&[(100.0, vec![70.0, 30.0])]).unwrap();
        let next = add_row(&grid, 0, Side::After);
        assert_eq!(next.panel_widths(0), Some(vec![70.0, 30.0]));
        assert_eq!(next.row_heights(), vec![50.0, 50.0]);
    }

    #[test]
    fn test_add_row_limits() {
        let full = Grid::with_shape(&[1, 1, 1]).unwrap();
        assert_eq!(add_row(&full, 0, Side::After), full);

        let grid = Grid::new();
        assert_eq!(add_row(&grid, 2, Side::Before), grid);
    }

    #[test]
    fn test_remove_row() {
        let grid = Grid::from_sizes(&[
            (20.0, vec![100.0]),
            (50.0, vec![50.0, 50.0]),
            (30.0, vec![100.0]),
        ])
        .unwrap();
        let middle = grid.row(1).unwrap().id();
        let next = remove_row(&grid, 0);
        assert_eq!(next.row_count(), 2);
        assert_eq!(next.row(0).unwrap().id(), middle);
        assert_eq!(next.row_heights(), vec![50.0, 50.0]);

        let single = Grid::with_shape(&[2]).unwrap();
        assert_eq!(remove_row(&single, 0), single);
        assert_eq!(remove_row(&grid, 3), grid);
    }

    #[test]
    fn test_remove_panel() {
        let grid = Grid::with_shape(&[3, 1]).unwrap();
        let next = remove_panel(&grid, 0, 1);
        assert_eq!(next.panel_widths(0), Some(vec![50.0, 50.0]));
        assert_eq!(next.row(1), grid.row(1));

        assert_eq!(remove_panel(&grid, 1, 0), grid);
        assert_eq!(remove_panel(&grid, 0, 3), grid);
        assert_eq!(remove_panel(&grid, 4, 0), grid);
    }

    #[test]
    fn test_remove_keeps_content_of_survivors() {
        let grid = Grid::with_shape(&[2]).unwrap();
        let keep = grid.panel(0, 1).unwrap().id();
        let grid = grid.with_content(keep, ContentHandle::from("chart.csv")).unwrap();
        let next = remove_panel(&grid, 0, 0);
        assert_eq!(next.content(keep).map(|c| c.as_str()), Some("chart.csv"));
        assert_eq!(next.panel_widths(0), Some(vec![100.0]));
    }

    #[test]
    fn test_reset_layout() {
        let grid = Grid::from_sizes(&[
            (20.0, vec![100.0]),
            (50.0, vec![15.0, 85.0]),
            (30.0, vec![20.0, 50.0, 30.0]),
        ])
        .unwrap();
        let reset = reset_layout(&grid);
        assert_sizes(&reset.row_heights(), &[THIRD, THIRD, THIRD]);
        assert_sizes(&reset.panel_widths(0).unwrap(), &[100.0]);
        assert_sizes(&reset.panel_widths(1).unwrap(), &[50.0, 50.0]);
        assert_sizes(&reset.panel_widths(2).unwrap(), &[THIRD, THIRD, THIRD]);
        assert!(reset.validate().is_ok());
    }

    #[test]
    fn test_new_ids_never_repeat() {
        let mut grid = Grid::new();
        let mut seen = std::collections::HashSet::new();
        for round in 0..20 {
            grid = add_row(&grid, 0, Side::After);
            grid = add_panel(&grid, 0, Side::Before);
            for row in grid.rows() {
                seen.insert(row.id().get());
                for panel in row.panels() {
                    seen.insert(panel.id().get());
                }
            }
            grid = remove_row(&grid, round % grid.row_count());
            grid = remove_panel(&grid, 0, 0);
        }
        // Every id ever observed is below the counter, so none can be issued again.
        assert!(seen.iter().all(|&id| id < grid.next_id));
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("after".parse::<Side>().unwrap(), Side::After);
        assert_eq!("Left".parse::<Side>().unwrap(), Side::Before);
        assert!("sideways".parse::<Side>().is_err());
    }
}
