//! Rendering functions for the interactive view.
//!
//! Pure drawing on a ratatui `Frame`; terminal lifecycle lives in `tui`.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use super::StatusBar;

/// Render the ASCII grid text into `area`. Rows beyond the area are clipped.
pub fn render_grid(frame: &mut ratatui::Frame, text: &str, area: Rect) {
    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, area);
}

/// Render the status bar on the bottom row of `area`.
pub fn render_status_bar(frame: &mut ratatui::Frame, status_bar: &StatusBar, area: Rect) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: area.height.min(1),
    };
    let status_paragraph =
        Paragraph::new(status_bar.format()).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status_paragraph, status_area);
}

/// Render a complete view: grid above, status bar on the last row.
pub fn render_view(frame: &mut ratatui::Frame, text: &str, status_bar: &StatusBar, area: Rect) {
    let grid_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };

    render_grid(frame, text, grid_area);
    render_status_bar(frame, status_bar, area);
}
