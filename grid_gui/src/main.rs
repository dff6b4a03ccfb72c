//! # Gridboard GUI Application
//!
//! Desktop host for the layout engine, built with Iced. The window shows a
//! toolbar, the resizable grid of panels and a status bar.
//!
//! All layout state lives in a `LayoutSession`. Buttons send layout commands;
//! dividers start drags; a global event subscription feeds cursor moves,
//! button releases, window resizes and focus loss back into the session.

mod content;
mod ui;

use std::path::PathBuf;

use iced::widget::{column, container};
use iced::{event, mouse, window, Element, Event, Length, Point, Size, Subscription, Task};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use grid_core::{
    CommandOutcome, ContainerMetrics, ContentHandle, DividerTarget, Grid, LayoutCommand,
    LayoutSession, PanelId, PointerPosition, PressOutcome,
};

use crate::ui::shared::divider::DIVIDER_THICKNESS;

/// Environment variable holding the log filter
const LOG_ENV: &str = "GRIDBOARD_LOG";

/// Initial window size
const WINDOW_SIZE: Size = Size::new(1280.0, 800.0);

/// Vertical space taken by the toolbar
const TOOLBAR_HEIGHT: f32 = 40.0;

/// Vertical space taken by the status bar
const STATUS_BAR_HEIGHT: f32 = 24.0;

/// Padding around the grid area
const GRID_PADDING: f32 = 8.0;

#[derive(Debug, Clone)]
pub enum Message {
    ResetLayout,
    Command(LayoutCommand),
    DividerPressed(DividerTarget),
    CursorMoved(Point),
    MouseReleased,
    WindowResized(Size),
    WindowUnfocused,
    PickContent(PanelId),
    ContentPicked(PanelId, Option<PathBuf>),
    ClearContent(PanelId),
}

struct App {
    session: LayoutSession,
    /// Last cursor position seen by the subscription
    cursor: Point,
    window: Size,
    status: String,
}

impl App {
    fn new() -> Self {
        let mut app = App {
            session: LayoutSession::new(),
            cursor: Point::ORIGIN,
            window: WINDOW_SIZE,
            status: "Ready".to_string(),
        };
        app.sync_metrics();
        app
    }

    /// Recompute the space shared out to rows and panels. Depends on the
    /// window, the grid shape and which row a panel drag is in.
    fn sync_metrics(&mut self) {
        let metrics = grid_metrics(self.window, self.session.grid(), self.session.drag_state().target());
        self.session.set_container_metrics(metrics);
    }

    fn title(&self) -> String {
        format!("Gridboard - {} panels", self.session.grid().panel_count())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ResetLayout => self.apply(LayoutCommand::Reset),
            Message::Command(command) => self.apply(command),
            Message::DividerPressed(target) => {
                match self.session.press(target, pointer(self.cursor)) {
                    PressOutcome::Started => {
                        self.sync_metrics();
                        self.status = "Resizing...".to_string();
                    }
                    PressOutcome::AlreadyDragging => debug!(?target, "divider press ignored"),
                    PressOutcome::NoSuchDivider => warn!(?target, "pressed a divider the grid does not have"),
                }
            }
            Message::CursorMoved(position) => {
                self.cursor = position;
                if self.session.is_dragging() {
                    self.session.pointer_moved(pointer(position));
                }
            }
            Message::MouseReleased => {
                if self.session.release() {
                    self.status = "Ready".to_string();
                }
            }
            Message::WindowResized(size) => {
                self.window = size;
                self.sync_metrics();
            }
            Message::WindowUnfocused => {
                if self.session.focus_lost() {
                    self.status = "Resize ended: window lost focus".to_string();
                }
            }
            Message::PickContent(panel) => {
                return Task::perform(pick_content_file(), move |path| {
                    Message::ContentPicked(panel, path)
                });
            }
            Message::ContentPicked(panel, Some(path)) => {
                let handle = ContentHandle::new(path.to_string_lossy());
                match self.session.set_content(panel, handle) {
                    Ok(()) => {
                        info!(%panel, path = %path.display(), "content assigned");
                        self.status = format!("Opened {}", path.display());
                    }
                    // The panel was removed while the dialog was open.
                    Err(e) => self.status = format!("Error: {}", e),
                }
            }
            Message::ContentPicked(_, None) => {
                self.status = "No file selected".to_string();
            }
            Message::ClearContent(panel) => match self.session.clear_content(panel) {
                Ok(_) => self.status = "Content cleared".to_string(),
                Err(e) => self.status = format!("Error: {}", e),
            },
        }
        Task::none()
    }

    fn apply(&mut self, command: LayoutCommand) {
        self.status = match self.session.apply(command) {
            CommandOutcome::Applied => {
                self.sync_metrics();
                format!("{}", command)
            }
            CommandOutcome::Unchanged => format!("{}: limit reached", command),
            CommandOutcome::BlockedByDrag => "Finish resizing first".to_string(),
        };
    }

    fn view(&self) -> Element<'_, Message> {
        let grid = self.session.grid();
        let drag = self.session.drag_state();

        column![
            container(ui::toolbar::view_toolbar(grid)).height(Length::Fixed(TOOLBAR_HEIGHT)),
            container(ui::grid_view::view_grid(grid, drag))
                .padding(GRID_PADDING)
                .width(Length::Fill)
                .height(Length::Fill),
            container(ui::status_bar::view_status_bar(grid, drag, &self.status))
                .height(Length::Fixed(STATUS_BAR_HEIGHT)),
        ]
        .padding([0, 8])
        .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        // Listen globally so drags continue outside the divider and even
        // outside the grid.
        event::listen_with(|event, _status, _window| match event {
            Event::Mouse(mouse::Event::CursorMoved { position }) => Some(Message::CursorMoved(position)),
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => Some(Message::MouseReleased),
            Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
            Event::Window(window::Event::Unfocused) => Some(Message::WindowUnfocused),
            _ => None,
        })
    }
}

fn pointer(position: Point) -> PointerPosition {
    PointerPosition::new(f64::from(position.x), f64::from(position.y))
}

/// Pixels that fill portions share out inside a window of `window` size.
///
/// Dividers have a fixed size, so the space they take is left out: all row
/// dividers vertically, and horizontally the panel dividers of the row being
/// dragged.
fn grid_metrics(window: Size, grid: &Grid, drag: Option<DividerTarget>) -> ContainerMetrics {
    let row_dividers = grid.row_count().saturating_sub(1) as f32;
    let panel_dividers = match drag {
        Some(DividerTarget::Panel { row, .. }) => grid
            .row(row)
            .map_or(0, |r| r.panel_count().saturating_sub(1)) as f32,
        _ => 0.0,
    };

    let width = window.width - 2.0 * (GRID_PADDING + 8.0) - panel_dividers * DIVIDER_THICKNESS;
    let height = window.height
        - TOOLBAR_HEIGHT
        - STATUS_BAR_HEIGHT
        - 2.0 * GRID_PADDING
        - row_dividers * DIVIDER_THICKNESS;
    ContainerMetrics::new(f64::from(width.max(0.0)), f64::from(height.max(0.0)))
}

async fn pick_content_file() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Choose panel content")
        .add_filter("Presentable files", content::SUPPORTED_EXTENSIONS)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> iced::Result {
    init_logging();
    info!("starting Gridboard GUI");

    iced::application(App::new, App::update, App::view)
        .title(App::title)
        .subscription(App::subscription)
        .window_size(WINDOW_SIZE)
        .run()
}
