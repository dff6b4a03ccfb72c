//! Grid Area
//!
//! Renders the rows top to bottom with row dividers between them, and each
//! row's panels left to right with panel dividers between them. Row heights
//! and panel widths become fill portions, so iced shares the available space
//! in the grid's percentages.

use iced::widget::{Column, Row};
use iced::{Element, Length};

use grid_core::{DividerTarget, DragState, Grid};

use crate::ui::panel_view::view_panel;
use crate::ui::shared::divider::view_divider;
use crate::Message;

/// Fill portion for a percentage, at 0.01% resolution.
pub fn portion(percent: f64) -> u16 {
    (percent * 100.0).round().clamp(1.0, 10_000.0) as u16
}

/// Render the whole grid.
pub fn view_grid(grid: &Grid, drag: DragState) -> Element<'_, Message> {
    let active = drag.target();
    let mut rows = Column::new().width(Length::Fill).height(Length::Fill);

    for (row_index, row) in grid.rows().iter().enumerate() {
        let mut panels = Row::new()
            .width(Length::Fill)
            .height(Length::FillPortion(portion(row.height())));

        for (panel_index, panel) in row.panels().iter().enumerate() {
            panels = panels.push(view_panel(grid, row_index, panel_index, panel));

            if panel_index + 1 < row.panel_count() {
                let target = DividerTarget::Panel {
                    row: row_index,
                    panel: panel_index,
                };
                panels = panels.push(view_divider(target, active == Some(target)));
            }
        }
        rows = rows.push(panels);

        if row_index + 1 < grid.row_count() {
            let target = DividerTarget::Row { row: row_index };
            rows = rows.push(view_divider(target, active == Some(target)));
        }
    }

    rows.into()
}
