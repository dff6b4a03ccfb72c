//! UI module for Gridboard GUI
//!
//! # Panel Structure
//! - `toolbar` - Title, add row, reset layout
//! - `grid_view` - Rows and panels with dividers between them
//! - `panel_view` - One panel: control strip and content slot
//! - `status_bar` - Bottom summary and status messages
//!
//! # Shared Components
//! - `shared/divider` - Draggable row and panel dividers

pub mod grid_view;
pub mod panel_view;
pub mod status_bar;
pub mod toolbar;

// Shared components
pub mod shared;
