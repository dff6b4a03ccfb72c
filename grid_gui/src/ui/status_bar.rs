//! Status Bar (Bottom)
//!
//! Displays:
//! - Row and panel counts
//! - The divider being dragged, if any
//! - Status messages

use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use grid_core::{DividerTarget, DragState, Grid};

use crate::Message;

/// Render the status bar
pub fn view_status_bar<'a>(grid: &Grid, drag: DragState, status: &'a str) -> Element<'a, Message> {
    let summary = format!("{} rows, {} panels", grid.row_count(), grid.panel_count());

    let drag_info = match drag.target() {
        Some(DividerTarget::Row { row }) => format!(" [Resizing row {}]", row + 1),
        Some(DividerTarget::Panel { row, panel }) => {
            format!(" [Resizing row {} panel {}]", row + 1, panel + 1)
        }
        None => String::new(),
    };

    row![
        text(summary).size(10),
        text(drag_info).size(10).color([0.0, 0.3, 0.6]),
        Space::new().width(Length::Fill),
        text(status).size(10),
    ]
    .padding(Padding::from([4, 0]))
    .into()
}
