//! Toolbar component
//!
//! Title on the left, layout-wide actions (add row at top/bottom, reset) on
//! the right.

use iced::widget::{button, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use grid_core::{Grid, LayoutCommand, Side};

use crate::Message;

/// Render the toolbar
pub fn view_toolbar(grid: &Grid) -> Element<'static, Message> {
    let last_row = grid.row_count().saturating_sub(1);
    let add_row = |label: &'static str, anchor: usize, side: Side| {
        button(text(label).size(11))
            .on_press_maybe(
                grid.can_add_row()
                    .then_some(Message::Command(LayoutCommand::AddRow { anchor, side })),
            )
            .padding(Padding::from([4, 8]))
            .style(button::secondary)
    };

    row![
        text("Gridboard").size(20),
        Space::new().width(Length::Fill),
        add_row("Add Row Top", 0, Side::Before),
        add_row("Add Row Bottom", last_row, Side::After),
        button(text("Reset Layout").size(11))
            .on_press(Message::ResetLayout)
            .padding(Padding::from([4, 8]))
            .style(button::primary),
    ]
    .spacing(4)
    .padding(Padding::from([4, 0]))
    .align_y(Alignment::Center)
    .into()
}
