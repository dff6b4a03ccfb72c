//! # Grid Data Structures
//!
//! The `Grid` is the root value of the layout engine: an ordered list of rows,
//! each holding an ordered list of panels. Sizes are percentages of the
//! container, never pixels.
//!
//! ## Structure
//!
//! ```text
//! Grid
//! ├── rows: Vec<Row>            (1..=3, heights sum to 100)
//! │   └── panels: Vec<Panel>    (1..=3 per row, widths sum to 100)
//! │       └── content: Option<ContentHandle> (opaque to the engine)
//! └── next_id: u64              (monotonic id counter)
//! ```
//!
//! Grid values are never edited in place by callers. Every operation in
//! [`crate::mutator`] and [`crate::resize`] builds a new grid, so two grids can
//! be compared with `==` to detect changes.
//!
//! ## Example
//!
//! ```rust
//! use grid_core::grid::Grid;
//!
//! let grid = Grid::new();
//! assert_eq!(grid.row_count(), 2);
//! assert_eq!(grid.panel_widths(0), Some(vec![50.0, 50.0]));
//! assert!(grid.validate().is_ok());
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{GridError, GridResult};

/// Maximum number of rows in a grid
pub const MAX_ROWS: usize = 3;

/// Minimum number of rows in a grid
pub const MIN_ROWS: usize = 1;

/// Maximum number of panels in a row
pub const MAX_PANELS: usize = 3;

/// Minimum number of panels in a row
pub const MIN_PANELS: usize = 1;

/// Smallest size (percent) a row or panel may have when it has siblings
pub const MIN_SIZE_PCT: f64 = 10.0;

/// Total size of one axis, in percent
pub const FULL_PCT: f64 = 100.0;

/// Tolerance used when comparing percentage sums
pub const SIZE_EPSILON: f64 = 1e-6;

/// Compare two percentages within [`SIZE_EPSILON`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < SIZE_EPSILON
}

/// Stable identifier for a row. Never 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    /// Get the raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// Stable identifier for a panel. Never 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(u64);

impl PanelId {
    /// Get the raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Opaque reference to whatever a panel displays.
///
/// The engine stores and returns it but never looks inside. Hosts decide what
/// it means (a file path, a URL, a key into their own store).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHandle(String);

impl ContentHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        ContentHandle(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentHandle {
    fn from(handle: &str) -> Self {
        ContentHandle::new(handle)
    }
}

impl From<String> for ContentHandle {
    fn from(handle: String) -> Self {
        ContentHandle(handle)
    }
}

impl fmt::Display for ContentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rectangular cell inside a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub(crate) id: PanelId,
    /// Width as a percentage of the row
    pub(crate) width: f64,
    pub(crate) content: Option<ContentHandle>,
}

impl Panel {
    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn content(&self) -> Option<&ContentHandle> {
        self.content.as_ref()
    }
}

/// A horizontal band of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub(crate) id: RowId,
    /// Height as a percentage of the grid
    pub(crate) height: f64,
    pub(crate) panels: Vec<Panel>,
}

impl Row {
    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }
}

/// The full layout: rows top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub(crate) rows: Vec<Row>,
    /// Next id to hand out. Carried with the grid so derived grids keep
    /// allocating fresh ids.
    pub(crate) next_id: u64,
}

impl Grid {
    /// Create the default layout: 2 rows of 2 panels, all sizes equal.
    pub fn new() -> Self {
        // Shape is within limits, so this cannot fail.
        Grid::uniform(&[2, 2])
    }

    /// Create a uniform grid with the given number of panels per row.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grid_core::grid::Grid;
    ///
    /// let grid = Grid::with_shape(&[3]).unwrap();
    /// assert_eq!(grid.row_count(), 1);
    /// assert_eq!(grid.row(0).unwrap().panel_count(), 3);
    /// ```
    pub fn with_shape(panel_counts: &[usize]) -> GridResult<Self> {
        check_count("rows", panel_counts.len(), MIN_ROWS, MAX_ROWS)?;
        for (index, &count) in panel_counts.iter().enumerate() {
            check_count(&format!("rows[{}].panels", index), count, MIN_PANELS, MAX_PANELS)?;
        }
        Ok(Grid::uniform(panel_counts))
    }

    /// Build a grid from explicit sizes: one `(height, widths)` pair per row.
    ///
    /// The result is validated; sizes are never adjusted to make them fit.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grid_core::grid::Grid;
    ///
    /// let grid = Grid::from_sizes(&[(20.0, vec![100.0]), (80.0, vec![30.0, 70.0])]).unwrap();
    /// assert_eq!(grid.row_heights(), vec![20.0, 80.0]);
    ///
    /// assert!(Grid::from_sizes(&[(50.0, vec![100.0])]).is_err());
    /// ```
    pub fn from_sizes(rows: &[(f64, Vec<f64>)]) -> GridResult<Self> {
        let mut grid = Grid {
            rows: Vec::with_capacity(rows.len()),
            next_id: 1,
        };
        for (row_index, (height, widths)) in rows.iter().enumerate() {
            check_size(&format!("rows[{}].height", row_index), *height)?;
            let row_id = grid.allocate_row_id();
            let mut panels = Vec::with_capacity(widths.len());
            for (panel_index, &width) in widths.iter().enumerate() {
                check_size(&format!("rows[{}].panels[{}].width", row_index, panel_index), width)?;
                panels.push(grid.new_panel(width));
            }
            grid.rows.push(Row {
                id: row_id,
                height: *height,
                panels,
            });
        }
        grid.validate()?;
        Ok(grid)
    }

    fn uniform(panel_counts: &[usize]) -> Self {
        let mut grid = Grid {
            rows: Vec::with_capacity(panel_counts.len()),
            next_id: 1,
        };
        let height = equal_share(panel_counts.len());
        for &count in panel_counts {
            let row_id = grid.allocate_row_id();
            let width = equal_share(count);
            let panels = (0..count).map(|_| grid.new_panel(width)).collect();
            grid.rows.push(Row {
                id: row_id,
                height,
                panels,
            });
        }
        grid
    }

    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn allocate_row_id(&mut self) -> RowId {
        RowId(self.allocate())
    }

    /// Create an empty panel with a fresh id.
    pub(crate) fn new_panel(&mut self, width: f64) -> Panel {
        Panel {
            id: PanelId(self.allocate()),
            width,
            content: None,
        }
    }

    /// Create a row with two empty panels at 50/50.
    pub(crate) fn new_row(&mut self, height: f64) -> Row {
        let id = self.allocate_row_id();
        let width = equal_share(2);
        let panels = vec![self.new_panel(width), self.new_panel(width)];
        Row { id, height, panels }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn panel(&self, row: usize, panel: usize) -> Option<&Panel> {
        self.rows.get(row).and_then(|r| r.panels.get(panel))
    }

    /// Total number of panels across all rows.
    pub fn panel_count(&self) -> usize {
        self.rows.iter().map(|r| r.panels.len()).sum()
    }

    pub fn row_heights(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.height).collect()
    }

    pub fn panel_widths(&self, row: usize) -> Option<Vec<f64>> {
        self.rows
            .get(row)
            .map(|r| r.panels.iter().map(|p| p.width).collect())
    }

    /// Locate a panel by id, returning `(row_index, panel_index)`.
    pub fn find_panel(&self, id: PanelId) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(row_index, row)| {
            row.panels
                .iter()
                .position(|p| p.id == id)
                .map(|panel_index| (row_index, panel_index))
        })
    }

    pub fn panel_by_id(&self, id: PanelId) -> Option<&Panel> {
        self.find_panel(id).and_then(|(r, p)| self.panel(r, p))
    }

    /// Content currently assigned to a panel, if the panel exists and has any.
    pub fn content(&self, id: PanelId) -> Option<&ContentHandle> {
        self.panel_by_id(id).and_then(Panel::content)
    }

    /// Return a new grid with the panel's content replaced.
    pub fn with_content(&self, id: PanelId, content: ContentHandle) -> GridResult<Grid> {
        self.replace_content(id, Some(content))
    }

    /// Return a new grid with the panel's content cleared.
    pub fn without_content(&self, id: PanelId) -> GridResult<Grid> {
        self.replace_content(id, None)
    }

    fn replace_content(&self, id: PanelId, content: Option<ContentHandle>) -> GridResult<Grid> {
        let (row, panel) = self
            .find_panel(id)
            .ok_or_else(|| GridError::panel_not_found(id.get()))?;
        let mut next = self.clone();
        next.rows[row].panels[panel].content = content;
        Ok(next)
    }

    pub fn can_add_row(&self) -> bool {
        self.rows.len() < MAX_ROWS
    }

    pub fn can_remove_row(&self) -> bool {
        self.rows.len() > MIN_ROWS
    }

    pub fn can_add_panel(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.panels.len() < MAX_PANELS)
    }

    pub fn can_remove_panel(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.panels.len() > MIN_PANELS)
    }

    /// Check every layout invariant, reporting the first one broken.
    pub fn validate(&self) -> GridResult<()> {
        check_count("rows", self.rows.len(), MIN_ROWS, MAX_ROWS)?;
        check_axis(
            "row heights",
            &self.row_heights(),
            self.rows.len() > 1,
        )?;

        let mut seen = HashSet::new();
        for (index, row) in self.rows.iter().enumerate() {
            check_count(&format!("rows[{}].panels", index), row.panels.len(), MIN_PANELS, MAX_PANELS)?;
            let widths: Vec<f64> = row.panels.iter().map(|p| p.width).collect();
            check_axis(&format!("rows[{}] panel widths", index), &widths, row.panels.len() > 1)?;

            let ids = std::iter::once(row.id.get()).chain(row.panels.iter().map(|p| p.id.get()));
            for id in ids {
                if id == 0 || id >= self.next_id {
                    return Err(GridError::invariant(
                        "id range",
                        format!("id {} outside 1..{}", id, self.next_id),
                    ));
                }
                if !seen.insert(id) {
                    return Err(GridError::invariant("unique ids", format!("id {} used twice", id)));
                }
            }
        }
        Ok(())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new()
    }
}

/// Size each of `count` siblings gets under the equal-share policy.
pub fn equal_share(count: usize) -> f64 {
    FULL_PCT / count.max(1) as f64
}

/// Return a copy of the row with every panel at an equal width.
pub fn normalize_row(row: &Row) -> Row {
    let width = equal_share(row.panels.len());
    Row {
        id: row.id,
        height: row.height,
        panels: row
            .panels
            .iter()
            .map(|p| Panel {
                width,
                ..p.clone()
            })
            .collect(),
    }
}

/// Return a copy of the grid with every row at an equal height.
///
/// Panel widths are left as they are.
pub fn normalize_grid(grid: &Grid) -> Grid {
    let height = equal_share(grid.rows.len());
    Grid {
        rows: grid
            .rows
            .iter()
            .map(|r| Row {
                height,
                ..r.clone()
            })
            .collect(),
        next_id: grid.next_id,
    }
}

fn check_count(what: &str, count: usize, min: usize, max: usize) -> GridResult<()> {
    if count < min || count > max {
        return Err(GridError::invariant(
            format!("{} count", what),
            format!("{} not in {}..={}", count, min, max),
        ));
    }
    Ok(())
}

fn check_size(field: &str, value: f64) -> GridResult<()> {
    if !value.is_finite() {
        return Err(GridError::invalid_size(field, value, "must be a finite number"));
    }
    if value <= 0.0 || value > FULL_PCT {
        return Err(GridError::invalid_size(field, value, "must be in (0, 100]"));
    }
    Ok(())
}

fn check_axis(what: &str, sizes: &[f64], has_siblings: bool) -> GridResult<()> {
    let total: f64 = sizes.iter().sum();
    if !approx_eq(total, FULL_PCT) {
        return Err(GridError::invariant(
            format!("{} sum", what),
            format!("sum is {}, expected {}", total, FULL_PCT),
        ));
    }
    if has_siblings {
        if let Some(small) = sizes.iter().find(|&&s| s < MIN_SIZE_PCT - SIZE_EPSILON) {
            return Err(GridError::invariant(
                format!("{} minimum", what),
                format!("{} is below {}", small, MIN_SIZE_PCT),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let grid = Grid::new();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.row_heights(), vec![50.0, 50.0]);
        assert_eq!(grid.panel_widths(0), Some(vec![50.0, 50.0]));
        assert_eq!(grid.panel_widths(1), Some(vec![50.0, 50.0]));
        assert!(grid.rows().iter().flat_map(|r| r.panels()).all(|p| p.content().is_none()));
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_ids_unique_and_nonzero() {
        let grid = Grid::new();
        let mut ids: Vec<u64> = grid
            .rows()
            .iter()
            .flat_map(|r| std::iter::once(r.id().get()).chain(r.panels().iter().map(|p| p.id().get())))
            .collect();
        assert!(!ids.contains(&0));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_with_shape_limits() {
        assert!(Grid::with_shape(&[1, 2, 3]).is_ok());
        assert!(Grid::with_shape(&[]).is_err());
        assert!(Grid::with_shape(&[1, 1, 1, 1]).is_err());
        assert!(Grid::with_shape(&[4]).is_err());
        assert!(Grid::with_shape(&[0, 2]).is_err());
    }

    #[test]
    fn test_from_sizes_rejects_bad_input() {
        let sum_off = Grid::from_sizes(&[(60.0, vec![100.0]), (30.0, vec![100.0])]);
        assert_eq!(sum_off.unwrap_err().error_code(), "INVARIANT_VIOLATION");

        let too_small = Grid::from_sizes(&[(100.0, vec![95.0, 5.0])]);
        assert_eq!(too_small.unwrap_err().error_code(), "INVARIANT_VIOLATION");

        let negative = Grid::from_sizes(&[(100.0, vec![-1.0])]);
        assert_eq!(negative.unwrap_err().error_code(), "INVALID_SIZE");

        let nan = Grid::from_sizes(&[(f64::NAN, vec![100.0])]);
        assert_eq!(nan.unwrap_err().error_code(), "INVALID_SIZE");
    }

    #[test]
    fn test_single_row_exempt_from_minimum_only_when_alone() {
        // A lone panel is always 100%, so the minimum never binds it.
        assert!(Grid::from_sizes(&[(100.0, vec![100.0])]).is_ok());
        assert!(Grid::from_sizes(&[(90.0, vec![100.0]), (10.0, vec![100.0])]).is_ok());
        assert!(Grid::from_sizes(&[(91.0, vec![100.0]), (9.0, vec![100.0])]).is_err());
    }

    #[test]
    fn test_normalize_row() {
        let grid = Grid::from_sizes(&[(100.0, vec![20.0, 50.0, 30.0])]).unwrap();
        let row = normalize_row(grid.row(0).unwrap());
        for panel in row.panels() {
            assert!(approx_eq(panel.width(), 100.0 / 3.0));
        }
        let ids: Vec<_> = row.panels().iter().map(Panel::id).collect();
        let before: Vec<_> = grid.row(0).unwrap().panels().iter().map(Panel::id).collect();
        assert_eq!(ids, before);
    }

    #[test]
    fn test_normalize_grid_leaves_widths() {
        let grid = Grid::from_sizes(&[(20.0, vec![30.0, 70.0]), (80.0, vec![100.0])]).unwrap();
        let normalized = normalize_grid(&grid);
        assert_eq!(normalized.row_heights(), vec![50.0, 50.0]);
        assert_eq!(normalized.panel_widths(0), Some(vec![30.0, 70.0]));
        assert_eq!(normalized.next_id, grid.next_id);
    }

    #[test]
    fn test_content_slot() {
        let grid = Grid::new();
        let id = grid.panel(1, 0).unwrap().id();

        let with = grid.with_content(id, ContentHandle::from("slides.pdf")).unwrap();
        assert_eq!(with.content(id).map(ContentHandle::as_str), Some("slides.pdf"));
        // Source grid untouched
        assert!(grid.content(id).is_none());

        let cleared = with.without_content(id).unwrap();
        assert!(cleared.content(id).is_none());
        assert_eq!(cleared, grid);
    }

    #[test]
    fn test_content_unknown_panel() {
        let grid = Grid::new();
        let missing = PanelId(999);
        let err = grid.with_content(missing, "x".into()).unwrap_err();
        assert_eq!(err, GridError::panel_not_found(999));
    }

    #[test]
    fn test_limit_queries() {
        let grid = Grid::with_shape(&[3, 1, 2]).unwrap();
        assert!(!grid.can_add_row());
        assert!(grid.can_remove_row());
        assert!(!grid.can_add_panel(0));
        assert!(grid.can_remove_panel(0));
        assert!(grid.can_add_panel(1));
        assert!(!grid.can_remove_panel(1));
        assert!(!grid.can_add_panel(7));
        assert!(!grid.can_remove_panel(7));
    }

    #[test]
    fn test_grid_serialization() {
        let grid = Grid::new();
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.contains("\"height\":50.0"));
        assert!(json.contains("\"content\":null"));
        assert!(json.contains("\"next_id\":7"));
    }
}
