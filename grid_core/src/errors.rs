//! # Error Types
//!
//! Structured error types for grid_core. Layout operations themselves never
//! fail (an invalid request returns the grid unchanged); these errors cover
//! the edges around them: parsing command text, building a grid from explicit
//! sizes, and addressing panels by id.
//!
//! ## Example
//!
//! ```rust
//! use grid_core::errors::{GridError, GridResult};
//!
//! fn check_height(height: f64) -> GridResult<()> {
//!     if height <= 0.0 {
//!         return Err(GridError::invalid_size("height", height, "Height must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_height(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for grid_core operations
pub type GridResult<T> = Result<T, GridError>;

/// Structured error type for the edges of the layout engine.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GridError {
    /// Command text could not be parsed
    #[error("Invalid command '{input}': {reason}")]
    InvalidCommand { input: String, reason: String },

    /// A size value is out of range or not a number
    #[error("Invalid size for '{field}': {value} - {reason}")]
    InvalidSize {
        field: String,
        value: String,
        reason: String,
    },

    /// A grid does not satisfy a layout invariant
    #[error("Invariant violated: {invariant} - {detail}")]
    InvariantViolation { invariant: String, detail: String },

    /// No panel with this id exists in the grid
    #[error("Panel not found: {panel_id}")]
    PanelNotFound { panel_id: u64 },
}

impl GridError {
    /// Create an InvalidCommand error
    pub fn invalid_command(input: impl Into<String>, reason: impl Into<String>) -> Self {
        GridError::InvalidCommand {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidSize error
    pub fn invalid_size(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        GridError::InvalidSize {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an InvariantViolation error
    pub fn invariant(invariant: impl Into<String>, detail: impl Into<String>) -> Self {
        GridError::InvariantViolation {
            invariant: invariant.into(),
            detail: detail.into(),
        }
    }

    /// Create a PanelNotFound error
    pub fn panel_not_found(panel_id: u64) -> Self {
        GridError::PanelNotFound { panel_id }
    }

    /// Check if the caller can fix this by changing its input and retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GridError::InvalidCommand { .. } | GridError::InvalidSize { .. } | GridError::PanelNotFound { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            GridError::InvalidCommand { .. } => "INVALID_COMMAND",
            GridError::InvalidSize { .. } => "INVALID_SIZE",
            GridError::InvariantViolation { .. } => "INVARIANT_VIOLATION",
            GridError::PanelNotFound { .. } => "PANEL_NOT_FOUND",
        }
    }
}
