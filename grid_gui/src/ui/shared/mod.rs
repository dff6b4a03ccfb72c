//! Shared UI components reusable across the grid views
//!
//! Contains:
//! - `divider` - Draggable row and panel dividers

pub mod divider;
