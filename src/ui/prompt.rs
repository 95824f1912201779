//! Popup for entering an axis value or a curve name.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::ThemeColors;
use crate::input::{PromptKind, TextPrompt};

/// Draw the prompt centred on `area`.
pub(super) fn draw_prompt(
    f: &mut Frame<'_>,
    prompt: &TextPrompt,
    area: Rect,
    colors: &ThemeColors,
) {
    let Some(kind) = prompt.kind() else {
        return;
    };
    let (title, label) = match kind {
        PromptKind::AxisValue { axis_index } => {
            (format!(" Value of axis {} ", axis_index + 1), "x, y: ")
        },
        PromptKind::CurveName { curve_id } => (format!(" Rename curve {} ", curve_id), "name: "),
    };

    let popup = centered_rect(50, 5, area);
    f.render_widget(Clear, popup);

    let mut lines = vec![Line::from(vec![
        Span::styled(label, Style::default().fg(colors.label)),
        Span::styled(
            format!("{}_", prompt.buffer()),
            Style::default().fg(colors.value).add_modifier(Modifier::BOLD),
        ),
    ])];
    if let Some(error) = prompt.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(colors.error),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.heading))
            .style(Style::default().bg(colors.bg)),
    );
    f.render_widget(paragraph, popup);
}

/// Rect of `percent_x` width and `height` rows in the middle of `r`.
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
