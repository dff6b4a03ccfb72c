//! # Layout Session
//!
//! `LayoutSession` is what a host talks to. It owns the current grid, the
//! resize controller and the latest container metrics, and routes button
//! commands and pointer events to the right place.
//!
//! While a drag is active, structural commands are blocked (reported as
//! [`CommandOutcome::BlockedByDrag`]) unless the settings say otherwise.
//!
//! ## Example
//!
//! ```rust
//! use grid_core::command::LayoutCommand;
//! use grid_core::resize::{ContainerMetrics, DividerTarget, PointerPosition};
//! use grid_core::session::{CommandOutcome, LayoutSession};
//!
//! let mut session = LayoutSession::new();
//! session.set_container_metrics(ContainerMetrics::new(1000.0, 800.0));
//!
//! let _ = session.press(DividerTarget::Row { row: 0 }, PointerPosition::new(0.0, 400.0));
//! assert_eq!(session.apply(LayoutCommand::Reset), CommandOutcome::BlockedByDrag);
//!
//! assert!(session.pointer_moved(PointerPosition::new(0.0, 480.0)));
//! session.release();
//! assert_eq!(session.grid().row_heights(), vec![60.0, 40.0]);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::LayoutCommand;
use crate::errors::GridResult;
use crate::grid::{ContentHandle, Grid, PanelId};
use crate::resize::{
    ContainerMetrics, DividerTarget, DragState, PointerPosition, PressOutcome, ResizeController,
};

/// Session behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Reject structural commands while a divider drag is active
    pub block_structural_during_drag: bool,

    /// End an active drag when the host reports focus loss
    pub release_on_focus_loss: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            block_structural_during_drag: true,
            release_on_focus_loss: true,
        }
    }
}

/// What happened to a structural command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The grid changed
    Applied,
    /// The request hit a limit or named nothing; the grid is as before
    Unchanged,
    /// A drag is active; the command was not attempted
    BlockedByDrag,
}

/// One grid plus its interaction state, owned by a host.
#[derive(Debug, Clone, Default)]
pub struct LayoutSession {
    grid: Grid,
    resize: ResizeController,
    container: ContainerMetrics,
    settings: SessionSettings,
}

impl LayoutSession {
    /// Start with the default 2×2 grid and default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(grid: Grid) -> Self {
        LayoutSession {
            grid,
            ..Self::default()
        }
    }

    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Copy of the current grid, for hosts that keep their own render state.
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub fn drag_state(&self) -> DragState {
        self.resize.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.resize.is_dragging()
    }

    pub fn container_metrics(&self) -> ContainerMetrics {
        self.container
    }

    pub fn set_container_metrics(&mut self, metrics: ContainerMetrics) {
        self.container = metrics;
    }

    /// Apply a structural command.
    pub fn apply(&mut self, command: LayoutCommand) -> CommandOutcome {
        if self.settings.block_structural_during_drag && self.resize.is_dragging() {
            debug!(%command, drag = ?self.resize.state(), "command blocked by active drag");
            return CommandOutcome::BlockedByDrag;
        }

        let next = command.apply(&self.grid);
        if next == self.grid {
            debug!(command = command.name(), "command left the grid unchanged");
            CommandOutcome::Unchanged
        } else {
            self.grid = next;
            CommandOutcome::Applied
        }
    }

    pub fn press(&mut self, target: DividerTarget, pointer: PointerPosition) -> PressOutcome {
        self.resize.press(&self.grid, target, pointer)
    }

    /// Feed a pointer move. Returns `true` if the grid changed.
    pub fn pointer_moved(&mut self, pointer: PointerPosition) -> bool {
        match self.resize.pointer_moved(&self.grid, pointer, self.container) {
            Some(next) => {
                self.grid = next;
                true
            }
            None => false,
        }
    }

    /// Feed a release. Returns `true` if a drag ended.
    pub fn release(&mut self) -> bool {
        self.resize.release()
    }

    /// Host lost focus. Returns `true` if a drag was forcibly ended.
    pub fn focus_lost(&mut self) -> bool {
        if !self.settings.release_on_focus_loss {
            return false;
        }
        self.resize.focus_lost()
    }

    pub fn content(&self, panel: PanelId) -> Option<&ContentHandle> {
        self.grid.content(panel)
    }

    /// Assign content to a panel.
    pub fn set_content(&mut self, panel: PanelId, content: ContentHandle) -> GridResult<()> {
        self.grid = self.grid.with_content(panel, content)?;
        Ok(())
    }

    /// Clear a panel's content, returning what it held.
    pub fn clear_content(&mut self, panel: PanelId) -> GridResult<Option<ContentHandle>> {
        let previous = self.grid.content(panel).cloned();
        self.grid = self.grid.without_content(panel)?;
        Ok(previous)
    }
}
