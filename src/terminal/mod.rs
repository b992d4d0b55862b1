//! Terminal front-end: TUI lifecycle, status bar and the view sink.

mod rendering;
mod status_bar;
mod tui;
mod view;

pub use rendering::render_view;
pub use status_bar::{Phase, StatusBar};
pub use tui::Tui;
pub use view::TerminalView;
