//! # grid_core - Presentation Grid Layout Engine
//!
//! `grid_core` is the layout heart of Gridboard: a grid of up to three rows,
//! each holding up to three panels, with percentage sizes that always add up
//! to 100 on every axis. Panels carry an opaque content handle that the engine
//! stores but never interprets.
//!
//! ## Design Philosophy
//!
//! - **Immutable values**: every edit returns a new `Grid`; compare with `==`
//! - **Total operations**: invalid requests return the grid unchanged
//! - **One drag at a time**: the resize state machine is a single enum
//! - **No I/O**: hosts own rendering, files and the event loop
//!
//! ## Quick Start
//!
//! ```rust
//! use grid_core::grid::Grid;
//! use grid_core::mutator::{add_panel, reset_layout, Side};
//!
//! let grid = Grid::new();
//! let grid = add_panel(&grid, 0, Side::After);
//! let grid = reset_layout(&grid);
//! assert!(grid.validate().is_ok());
//! ```
//!
//! ## Modules
//!
//! - [`grid`] - Grid, rows, panels, ids, normalization
//! - [`mutator`] - Add/remove rows and panels, reset
//! - [`resize`] - Divider drag state machine
//! - [`command`] - Serializable, parseable structural commands
//! - [`session`] - Host-facing owner of a grid and its drag state
//! - [`errors`] - Structured error types

pub mod command;
pub mod errors;
pub mod grid;
pub mod mutator;
pub mod resize;
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use command::LayoutCommand;
pub use errors::{GridError, GridResult};
pub use grid::{ContentHandle, Grid, Panel, PanelId, Row, RowId};
pub use mutator::Side;
pub use resize::{ContainerMetrics, DividerTarget, DragState, PointerPosition, PressOutcome, ResizeController};
pub use session::{CommandOutcome, LayoutSession, SessionSettings};
