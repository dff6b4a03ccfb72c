//! # Layout Commands
//!
//! A serializable description of one structural edit, so hosts can pass edits
//! around as values (button messages, script lines, JSON) and apply them later.
//!
//! ## Text Syntax
//!
//! ```text
//! add-row <anchor> <before|after>
//! remove-row <row>
//! add-panel <row> <before|after>
//! insert-panel <row> <panel> <before|after>
//! remove-panel <row> <panel>
//! reset
//! ```
//!
//! ## Example
//!
//! ```rust
//! use grid_core::command::LayoutCommand;
//! use grid_core::grid::Grid;
//!
//! let command: LayoutCommand = "add-panel 0 after".parse().unwrap();
//! let grid = command.apply(&Grid::new());
//! assert_eq!(grid.row(0).unwrap().panel_count(), 3);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{GridError, GridResult};
use crate::grid::Grid;
use crate::mutator::{self, Side};

/// One structural edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LayoutCommand {
    AddRow { anchor: usize, side: Side },
    RemoveRow { row: usize },
    AddPanel { row: usize, side: Side },
    InsertPanel { row: usize, anchor: usize, side: Side },
    RemovePanel { row: usize, panel: usize },
    Reset,
}

impl LayoutCommand {
    /// Apply to a grid. Never fails; see [`crate::mutator`] for no-op rules.
    pub fn apply(&self, grid: &Grid) -> Grid {
        match *self {
            LayoutCommand::AddRow { anchor, side } => mutator::add_row(grid, anchor, side),
            LayoutCommand::RemoveRow { row } => mutator::remove_row(grid, row),
            LayoutCommand::AddPanel { row, side } => mutator::add_panel(grid, row, side),
            LayoutCommand::InsertPanel { row, anchor, side } => {
                mutator::insert_panel(grid, row, anchor, side)
            }
            LayoutCommand::RemovePanel { row, panel } => mutator::remove_panel(grid, row, panel),
            LayoutCommand::Reset => mutator::reset_layout(grid),
        }
    }

    /// Command name as used in the text syntax
    pub fn name(&self) -> &'static str {
        match self {
            LayoutCommand::AddRow { .. } => "add-row",
            LayoutCommand::RemoveRow { .. } => "remove-row",
            LayoutCommand::AddPanel { .. } => "add-panel",
            LayoutCommand::InsertPanel { .. } => "insert-panel",
            LayoutCommand::RemovePanel { .. } => "remove-panel",
            LayoutCommand::Reset => "reset",
        }
    }
}

impl fmt::Display for LayoutCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutCommand::AddRow { anchor, side } => write!(f, "add-row {} {}", anchor, side),
            LayoutCommand::RemoveRow { row } => write!(f, "remove-row {}", row),
            LayoutCommand::AddPanel { row, side } => write!(f, "add-panel {} {}", row, side),
            LayoutCommand::InsertPanel { row, anchor, side } => {
                write!(f, "insert-panel {} {} {}", row, anchor, side)
            }
            LayoutCommand::RemovePanel { row, panel } => write!(f, "remove-panel {} {}", row, panel),
            LayoutCommand::Reset => write!(f, "reset"),
        }
    }
}

impl FromStr for LayoutCommand {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let Some((&verb, args)) = words.split_first() else {
            return Err(GridError::invalid_command(s, "empty command"));
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "add-row" => {
                expect_args(s, args, 2)?;
                LayoutCommand::AddRow {
                    anchor: parse_index(s, "anchor", args[0])?,
                    side: parse_side(s, args[1])?,
                }
            }
            "remove-row" => {
                expect_args(s, args, 1)?;
                LayoutCommand::RemoveRow {
                    row: parse_index(s, "row", args[0])?,
                }
            }
            "add-panel" => {
                expect_args(s, args, 2)?;
                LayoutCommand::AddPanel {
                    row: parse_index(s, "row", args[0])?,
                    side: parse_side(s, args[1])?,
                }
            }
            "insert-panel" => {
                expect_args(s, args, 3)?;
                LayoutCommand::InsertPanel {
                    row: parse_index(s, "row", args[0])?,
                    anchor: parse_index(s, "panel", args[1])?,
                    side: parse_side(s, args[2])?,
                }
            }
            "remove-panel" => {
                expect_args(s, args, 2)?;
                LayoutCommand::RemovePanel {
                    row: parse_index(s, "row", args[0])?,
                    panel: parse_index(s, "panel", args[1])?,
                }
            }
            "reset" => {
                expect_args(s, args, 0)?;
                LayoutCommand::Reset
            }
            other => {
                return Err(GridError::invalid_command(
                    s,
                    format!("unknown command '{}'", other),
                ))
            }
        };
        Ok(command)
    }
}

fn expect_args(input: &str, args: &[&str], count: usize) -> GridResult<()> {
    if args.len() != count {
        return Err(GridError::invalid_command(
            input,
            format!("expected {} argument(s), got {}", count, args.len()),
        ));
    }
    Ok(())
}

fn parse_index(input: &str, name: &str, word: &str) -> GridResult<usize> {
    word.parse().map_err(|_| {
        GridError::invalid_command(input, format!("{} must be a non-negative integer", name))
    })
}

fn parse_side(input: &str, word: &str) -> GridResult<Side> {
    word.parse()
        .map_err(|_| GridError::invalid_command(input, "side must be 'before' or 'after'"))
}
