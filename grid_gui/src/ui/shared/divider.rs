//! Resizable Grid Divider
//!
//! A draggable line between two rows or two panels. Pressing it starts a drag
//! in the layout session; moves and the release arrive through the global
//! event subscription, so the drag keeps working after the cursor leaves the
//! divider.

use iced::widget::{container, mouse_area, rule};
use iced::{mouse, Element, Length, Padding};

use grid_core::DividerTarget;

use crate::Message;

/// Thickness of the grab area around the 1px line
pub const DIVIDER_GRAB: u16 = 3;

/// Pixels a divider takes across its axis
pub const DIVIDER_THICKNESS: f32 = 2.0 * DIVIDER_GRAB as f32 + 1.0;

/// Create a draggable divider for `target`.
///
/// Panel dividers are vertical lines, row dividers horizontal.
pub fn view_divider(target: DividerTarget, is_dragging: bool) -> Element<'static, Message> {
    let (line, interaction) = match target {
        DividerTarget::Panel { .. } => (
            container(rule::vertical(1))
                .padding(Padding::from([0, DIVIDER_GRAB]))
                .height(Length::Fill),
            mouse::Interaction::ResizingHorizontally,
        ),
        DividerTarget::Row { .. } => (
            container(rule::horizontal(1))
                .padding(Padding::from([DIVIDER_GRAB, 0]))
                .width(Length::Fill),
            mouse::Interaction::ResizingVertically,
        ),
    };

    // mouse_area fires on press; a button would only fire on release.
    let highlighted = line.style(move |theme: &iced::Theme| {
        let palette = theme.extended_palette();
        container::Style {
            background: is_dragging.then(|| palette.primary.weak.color.into()),
            ..container::Style::default()
        }
    });

    mouse_area(highlighted)
        .on_press(Message::DividerPressed(target))
        .interaction(interaction)
        .into()
}
