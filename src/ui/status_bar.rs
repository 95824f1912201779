//! Status bar UI component.

use crate::app::App;
use crate::digitizer::REQUIRED_AXES;
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Draw the status bar: the last message on the left, session counters on the right.
pub(super) fn draw_status(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let digitizer = &app.digitizer;
    let summary = format!(
        " {} | axes {}/{} | undo {} ",
        digitizer.curves().current().name,
        digitizer.calibration().value_count(),
        REQUIRED_AXES,
        digitizer.history().undo_depth(),
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(summary.width() as u16),
        ])
        .split(area);

    let style = Style::default().fg(colors.status_fg).bg(colors.status_bg);
    f.render_widget(Paragraph::new(app.status.as_str()).style(style), chunks[0]);
    f.render_widget(Paragraph::new(summary).style(style), chunks[1]);
}
