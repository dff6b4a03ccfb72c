//! Panel Cell
//!
//! One panel of the grid:
//! - Control strip: add panel left/right, remove panel, add row below,
//!   remove row. Buttons are disabled when the grid is at its limit.
//! - Content slot: an "Open..." button when empty, otherwise the content kind,
//!   file name and a "Clear" button.

use std::path::Path;

use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use grid_core::{Grid, LayoutCommand, Panel, Side};

use crate::content::{display_name, ContentKind};
use crate::ui::grid_view::portion;
use crate::Message;

/// Render one panel.
pub fn view_panel<'a>(grid: &'a Grid, row_index: usize, panel_index: usize, panel: &'a Panel) -> Element<'a, Message> {
    let can_add_panel = grid.can_add_panel(row_index);
    let can_remove_panel = grid.can_remove_panel(row_index);

    let controls = row![
        control_button(
            "+◀",
            can_add_panel.then_some(Message::Command(LayoutCommand::InsertPanel {
                row: row_index,
                anchor: panel_index,
                side: Side::Before,
            })),
        ),
        control_button(
            "+▶",
            can_add_panel.then_some(Message::Command(LayoutCommand::InsertPanel {
                row: row_index,
                anchor: panel_index,
                side: Side::After,
            })),
        ),
        control_button(
            "−",
            can_remove_panel.then_some(Message::Command(LayoutCommand::RemovePanel {
                row: row_index,
                panel: panel_index,
            })),
        ),
        Space::new().width(Length::Fill),
        control_button(
            "+ Row",
            grid.can_add_row().then_some(Message::Command(LayoutCommand::AddRow {
                anchor: row_index,
                side: Side::After,
            })),
        ),
        control_button(
            "− Row",
            grid.can_remove_row()
                .then_some(Message::Command(LayoutCommand::RemoveRow { row: row_index })),
        ),
    ]
    .spacing(2)
    .align_y(Alignment::Center);

    let body = column![
        controls,
        container(view_content(panel))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
        text(format!("{:.1}%", panel.width())).size(9).color([0.5, 0.5, 0.5]),
    ]
    .spacing(4);

    container(body)
        .padding(6)
        .width(Length::FillPortion(portion(panel.width())))
        .height(Length::Fill)
        .style(container::bordered_box)
        .into()
}

fn control_button(label: &'static str, on_press: Option<Message>) -> Element<'static, Message> {
    button(text(label).size(10))
        .on_press_maybe(on_press)
        .padding(Padding::from([2, 6]))
        .style(button::secondary)
        .into()
}

fn view_content(panel: &Panel) -> Element<'_, Message> {
    match panel.content() {
        None => column![
            text("Select a file (image, video, PDF, CSV, text, drawing, code) to present").size(11),
            button(text("Open...").size(11))
                .on_press(Message::PickContent(panel.id()))
                .padding(Padding::from([4, 12]))
                .style(button::primary),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into(),
        Some(handle) => {
            let kind = ContentKind::from_path(Path::new(handle.as_str()));
            column![
                text(kind.label()).size(16),
                text(display_name(handle.as_str())).size(11),
                button(text("Clear").size(10))
                    .on_press(Message::ClearContent(panel.id()))
                    .padding(Padding::from([2, 8]))
                    .style(button::secondary),
            ]
            .spacing(6)
            .align_x(Alignment::Center)
            .into()
        }
    }
}
