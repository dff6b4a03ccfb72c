//! # Drag Resizing
//!
//! [`ResizeController`] turns a pointer drag on a divider into size transfers
//! between the two siblings on either side of it.
//!
//! ```text
//!          press(row divider)             release / focus lost
//!   Idle ─────────────────────▶ DraggingRow ──────────────────▶ Idle
//!     │    press(panel divider)           release / focus lost
//!     └───────────────────────▶ DraggingPanel ────────────────▶ Idle
//! ```
//!
//! There is exactly one state value, so a row drag and a panel drag can never
//! be active together. Pressing while a drag is active is rejected.
//!
//! Each move measures the pointer delta since the previous move and always
//! records the new position, even when the resulting sizes are rejected.
//! A rejected move therefore never builds up a backlog that would jump the
//! divider once a valid size becomes possible again.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::grid::{Grid, FULL_PCT, MIN_SIZE_PCT};

/// Pointer position in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        PointerPosition { x, y }
    }
}

/// Live pixel size of the grid's bounding box.
///
/// Hosts update this whenever the window changes; every move uses the value
/// current at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerMetrics {
    pub width: f64,
    pub height: f64,
}

impl ContainerMetrics {
    pub const fn new(width: f64, height: f64) -> Self {
        ContainerMetrics { width, height }
    }
}

/// A divider the user can grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "axis", rename_all = "snake_case")]
pub enum DividerTarget {
    /// Between `row` and `row + 1`
    Row { row: usize },
    /// Between `panel` and `panel + 1` inside `row`
    Panel { row: usize, panel: usize },
}

impl DividerTarget {
    /// Whether this divider exists in the grid.
    pub fn exists_in(&self, grid: &Grid) -> bool {
        match *self {
            DividerTarget::Row { row } => row < grid.row_count().saturating_sub(1),
            DividerTarget::Panel { row, panel } => grid
                .row(row)
                .is_some_and(|r| panel < r.panel_count().saturating_sub(1)),
        }
    }
}

/// Drag lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    DraggingRow {
        row: usize,
        last_y: f64,
    },
    DraggingPanel {
        row: usize,
        panel: usize,
        last_x: f64,
    },
}

impl DragState {
    /// The divider being dragged, if any.
    pub fn target(&self) -> Option<DividerTarget> {
        match *self {
            DragState::Idle => None,
            DragState::DraggingRow { row, .. } => Some(DividerTarget::Row { row }),
            DragState::DraggingPanel { row, panel, .. } => Some(DividerTarget::Panel { row, panel }),
        }
    }
}

/// Result of a press on a divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[must_use]
pub enum PressOutcome {
    /// A drag session began
    Started,
    /// Another drag is already active; nothing changed
    AlreadyDragging,
    /// The grid has no such divider; nothing changed
    NoSuchDivider,
}

/// Interaction state machine for divider drags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResizeController {
    state: DragState,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Begin a drag on `target` at `pointer`.
    pub fn press(&mut self, grid: &Grid, target: DividerTarget, pointer: PointerPosition) -> PressOutcome {
        if self.is_dragging() {
            debug!(?target, active = ?self.state, "press ignored: drag already active");
            return PressOutcome::AlreadyDragging;
        }
        if !target.exists_in(grid) {
            debug!(?target, "press ignored: no such divider");
            return PressOutcome::NoSuchDivider;
        }

        self.state = match target {
            DividerTarget::Row { row } => DragState::DraggingRow {
                row,
                last_y: pointer.y,
            },
            DividerTarget::Panel { row, panel } => DragState::DraggingPanel {
                row,
                panel,
                last_x: pointer.x,
            },
        };
        info!(?target, "drag started");
        PressOutcome::Started
    }

    /// Feed a pointer move.
    ///
    /// Returns the resized grid, or `None` when nothing changed: no drag is
    /// active, the move was zero, the container has no size yet, or the new
    /// sizes would push a sibling below the minimum. The recorded pointer
    /// position advances in every dragging case.
    pub fn pointer_moved(
        &mut self,
        grid: &Grid,
        pointer: PointerPosition,
        container: ContainerMetrics,
    ) -> Option<Grid> {
        match self.state {
            DragState::Idle => None,
            DragState::DraggingRow { row, last_y } => {
                self.state = DragState::DraggingRow { row, last_y: pointer.y };
                let delta_pct = to_percent(pointer.y - last_y, container.height)?;
                resize_rows(grid, row, delta_pct)
            }
            DragState::DraggingPanel { row, panel, last_x } => {
                self.state = DragState::DraggingPanel {
                    row,
                    panel,
                    last_x: pointer.x,
                };
                let delta_pct = to_percent(pointer.x - last_x, container.width)?;
                resize_panels(grid, row, panel, delta_pct)
            }
        }
    }

    /// End the active drag. Returns `true` if a drag was active.
    pub fn release(&mut self) -> bool {
        let was = std::mem::take(&mut self.state);
        match was.target() {
            Some(target) => {
                info!(?target, "drag ended");
                true
            }
            None => false,
        }
    }

    /// End the active drag because the host lost pointer focus and may never
    /// deliver the release.
    pub fn focus_lost(&mut self) -> bool {
        if let Some(target) = self.state.target() {
            warn!(?target, "forcing drag release after focus loss");
        }
        self.release()
    }
}

fn to_percent(delta_px: f64, container_px: f64) -> Option<f64> {
    if delta_px == 0.0 {
        return None;
    }
    if !container_px.is_finite() || container_px <= 0.0 || !delta_px.is_finite() {
        debug!(container_px, delta_px, "move ignored: container not measurable");
        return None;
    }
    Some(FULL_PCT * delta_px / container_px)
}

/// Move `delta_pct` from row `row + 1` to row `row`.
pub fn resize_rows(grid: &Grid, row: usize, delta_pct: f64) -> Option<Grid> {
    let current = grid.row(row)?.height();
    let next = grid.row(row + 1)?.height();
    let (new_current, new_next) = transfer(current, next, delta_pct)?;

    let mut resized = grid.clone();
    resized.rows[row].height = new_current;
    resized.rows[row + 1].height = new_next;
    Some(resized)
}

/// Move `delta_pct` from panel `panel + 1` to panel `panel` inside `row`.
pub fn resize_panels(grid: &Grid, row: usize, panel: usize, delta_pct: f64) -> Option<Grid> {
    let current = grid.panel(row, panel)?.width();
    let next = grid.panel(row, panel + 1)?.width();
    let (new_current, new_next) = transfer(current, next, delta_pct)?;

    let mut resized = grid.clone();
    let panels = &mut resized.rows[row].panels;
    panels[panel].width = new_current;
    panels[panel + 1].width = new_next;
    Some(resized)
}

fn transfer(current: f64, next: f64, delta_pct: f64) -> Option<(f64, f64)> {
    let new_current = current + delta_pct;
    let new_next = next - delta_pct;
    if new_current >= MIN_SIZE_PCT && new_next >= MIN_SIZE_PCT {
        debug!(new_current, new_next, "resize applied");
        Some((new_current, new_next))
    } else {
        debug!(new_current, new_next, "resize rejected: below minimum size");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::approx_eq;

    const THIRD: f64 = 100.0 / 3.0;

    fn at_x(x: f64) -> PointerPosition {
        PointerPosition::new(x, 0.0)
    }

    fn at_y(y: f64) -> PointerPosition {
        PointerPosition::new(0.0, y)
    }

    #[test]
    fn test_panel_drag_transfers_between_neighbours() {
        let grid = Grid::with_shape(&[3]).unwrap();
        let container = ContainerMetrics::new(1000.0, 600.0);
        let mut controller = ResizeController::new();

        assert_eq!(
            controller.press(&grid, DividerTarget::Panel { row: 0, panel: 0 }, at_x(300.0)),
            PressOutcome::Started
        );
        // Two moves adding up to +50px of 1000px = +5%.
        let grid = controller.pointer_moved(&grid, at_x(320.0), container).unwrap();
        let grid = controller.pointer_moved(&grid, at_x(350.0), container).unwrap();

        let widths = grid.panel_widths(0).unwrap();
        assert!(approx_eq(widths[0], THIRD + 5.0));
        assert!(approx_eq(widths[1], THIRD - 5.0));
        assert_eq!(widths[2], THIRD);
        assert!(controller.release());
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_row_drag_uses_height() {
        let grid = Grid::with_shape(&[1, 1, 2]).unwrap();
        let container = ContainerMetrics::new(800.0, 300.0);
        let mut controller = ResizeController::new();

        let _ = controller.press(&grid, DividerTarget::Row { row: 1 }, at_y(200.0));
        // Horizontal motion does not move a row divider.
        assert!(controller
            .pointer_moved(&grid, PointerPosition::new(500.0, 200.0), container)
            .is_none());

        let resized = controller.pointer_moved(&grid, at_y(170.0), container).unwrap();
        let heights = resized.row_heights();
        assert_eq!(heights[0], grid.row_heights()[0]);
        assert!(approx_eq(heights[1], THIRD - 10.0));
        assert!(approx_eq(heights[2], THIRD + 10.0));
        assert_eq!(resized.rows()[2].panels(), grid.rows()[2].panels());
    }

    #[test]
    fn test_rejected_move_still_advances_pointer() {
        let grid = Grid::with_shape(&[2]).unwrap();
        let container = ContainerMetrics::new(100.0, 100.0);
        let mut controller = ResizeController::new();
        let _ = controller.press(&grid, DividerTarget::Panel { row: 0, panel: 0 }, at_x(50.0));

        let grid = controller.pointer_moved(&grid, at_x(88.0), container).unwrap();
        assert_eq!(grid.panel_widths(0), Some(vec![88.0, 12.0]));

        // Would leave the right panel at 8%.
        assert!(controller.pointer_moved(&grid, at_x(92.0), container).is_none());
        assert_eq!(
            controller.state(),
            DragState::DraggingPanel { row: 0, panel: 0, last_x: 92.0 }
        );

        // Measured from 92, not from 88.
        let grid = controller.pointer_moved(&grid, at_x(90.0), container).unwrap();
        assert_eq!(grid.panel_widths(0), Some(vec![86.0, 14.0]));
    }

    #[test]
    fn test_exact_minimum_is_allowed() {
        let grid = Grid::with_shape(&[2]).unwrap();
        let resized = resize_panels(&grid, 0, 0, 40.0).unwrap();
        assert_eq!(resized.panel_widths(0), Some(vec![90.0, 10.0]));
        assert!(resize_panels(&grid, 0, 0, 40.5).is_none());
        assert!(resize_panels(&grid, 0, 1, 1.0).is_none());
    }

    #[test]
    fn test_press_rejected_while_dragging() {
        let grid = Grid::new();
        let mut controller = ResizeController::new();
        let _ = controller.press(&grid, DividerTarget::Row { row: 0 }, at_y(10.0));
        assert_eq!(
            controller.press(&grid, DividerTarget::Panel { row: 1, panel: 0 }, at_x(5.0)),
            PressOutcome::AlreadyDragging
        );
        assert_eq!(controller.state(), DragState::DraggingRow { row: 0, last_y: 10.0 });
    }

    #[test]
    fn test_press_on_missing_divider() {
        let grid = Grid::with_shape(&[1, 3]).unwrap();
        let mut controller = ResizeController::new();
        // Last row has no divider below it.
        assert_eq!(
            controller.press(&grid, DividerTarget::Row { row: 1 }, at_y(0.0)),
            PressOutcome::NoSuchDivider
        );
        // Single-panel row has no panel divider.
        assert_eq!(
            controller.press(&grid, DividerTarget::Panel { row: 0, panel: 0 }, at_x(0.0)),
            PressOutcome::NoSuchDivider
        );
        assert_eq!(
            controller.press(&grid, DividerTarget::Panel { row: 1, panel: 2 }, at_x(0.0)),
            PressOutcome::NoSuchDivider
        );
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_press_on_extreme_index() {
        let grid = Grid::new();
        let mut controller = ResizeController::new();
        assert_eq!(
            controller.press(&grid, DividerTarget::Row { row: usize::MAX }, at_y(0.0)),
            PressOutcome::NoSuchDivider
        );
        assert_eq!(
            controller.press(&grid, DividerTarget::Panel { row: 0, panel: usize::MAX }, at_x(0.0)),
            PressOutcome::NoSuchDivider
        );
        assert_eq!(
            controller.press(&grid, DividerTarget::Panel { row: usize::MAX, panel: 0 }, at_x(0.0)),
            PressOutcome::NoSuchDivider
        );
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_move_and_release_when_idle() {
        let grid = Grid::new();
        let mut controller = ResizeController::new();
        assert!(controller
            .pointer_moved(&grid, at_x(40.0), ContainerMetrics::new(100.0, 100.0))
            .is_none());
        assert!(!controller.release());
        assert!(!controller.focus_lost());
    }

    #[test]
    fn test_zero_container_ignored() {
        let grid = Grid::new();
        let mut controller = ResizeController::new();
        let _ = controller.press(&grid, DividerTarget::Panel { row: 0, panel: 0 }, at_x(10.0));
        assert!(controller
            .pointer_moved(&grid, at_x(30.0), ContainerMetrics::default())
            .is_none());
        // Pointer was still recorded, so the next measured move starts at 30.
        let grid = controller
            .pointer_moved(&grid, at_x(40.0), ContainerMetrics::new(100.0, 100.0))
            .unwrap();
        assert_eq!(grid.panel_widths(0), Some(vec![60.0, 40.0]));
    }

    #[test]
    fn test_infinite_container_ignored() {
        let grid = Grid::new();
        let mut controller = ResizeController::new();
        let _ = controller.press(&grid, DividerTarget::Row { row: 0 }, at_y(0.0));
        assert!(controller
            .pointer_moved(&grid, at_y(10.0), ContainerMetrics::new(100.0, f64::INFINITY))
            .is_none());
        assert_eq!(controller.state(), DragState::DraggingRow { row: 0, last_y: 10.0 });
    }

    #[test]
    fn test_live_container_size() {
        let grid = Grid::with_shape(&[2]).unwrap();
        let mut controller = ResizeController::new();
        let _ = controller.press(&grid, DividerTarget::Panel { row: 0, panel: 0 }, at_x(0.0));
        let grid = controller
            .pointer_moved(&grid, at_x(10.0), ContainerMetrics::new(100.0, 100.0))
            .unwrap();
        let grid = controller
            .pointer_moved(&grid, at_x(20.0), ContainerMetrics::new(200.0, 100.0))
            .unwrap();
        assert_eq!(grid.panel_widths(0), Some(vec![65.0, 35.0]));
    }

    #[test]
    fn test_focus_lost_forces_release() {
        let grid = Grid::new();
        let mut controller = ResizeController::new();
        let _ = controller.press(&grid, DividerTarget::Panel { row: 0, panel: 0 }, at_x(0.0));
        assert!(controller.focus_lost());
        assert!(!controller.is_dragging());
        assert_eq!(
            controller.press(&grid, DividerTarget::Row { row: 0 }, at_y(0.0)),
            PressOutcome::Started
        );
    }

    #[test]
    fn test_drag_state_serialization() {
        let state = DragState::DraggingPanel { row: 1, panel: 0, last_x: 12.5 };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"state":"dragging_panel","row":1,"panel":0,"last_x":12.5}"#);
    }
}
