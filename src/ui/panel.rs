//! Side panel: curves, axes and the data table.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use super::{formatters, ThemeColors};
use crate::app::App;
use crate::digitizer::{RenderModel, REQUIRED_AXES};

/// Draw the side panel.
pub(super) fn draw_panel(
    f: &mut Frame<'_>,
    app: &App,
    model: &RenderModel,
    area: Rect,
    colors: &ThemeColors,
) {
    let failures = model.curves.iter().filter(|c| c.failure.is_some()).count();
    let curve_rows = (model.curves.len() + failures) as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(curve_rows),
            Constraint::Length(REQUIRED_AXES as u16 + 2),
            Constraint::Min(3),
        ])
        .split(area);

    draw_curves(f, model, chunks[0], colors);
    draw_axes(f, app, chunks[1], colors);
    draw_table(f, app, chunks[2], colors);
}

fn block<'a>(title: &'a str, colors: &ThemeColors) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg))
}

fn draw_curves(f: &mut Frame<'_>, model: &RenderModel, area: Rect, colors: &ThemeColors) {
    let name_width = (area.width as usize).saturating_sub(16);
    let failure_width = (area.width as usize).saturating_sub(6);

    let items: Vec<ListItem<'_>> = model
        .curves
        .iter()
        .map(|curve| {
            let (r, g, b) = curve.style.color;
            let style = if curve.active {
                Style::default()
                    .fg(colors.cursor_fg)
                    .bg(colors.cursor_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text)
            };
            let mut lines = vec![Line::from(vec![
                Span::styled("■ ", Style::default().fg(Color::Rgb(r, g, b))),
                Span::styled(
                    format!(
                        "{:>2} {:<name_width$} {:>3} pts",
                        curve.id,
                        formatters::fit_width(&curve.name, name_width),
                        curve.points.len(),
                    ),
                    style,
                ),
            ])];
            if let Some(failure) = &curve.failure {
                lines.push(Line::from(Span::styled(
                    format!("  ! {}", formatters::fit_width(failure, failure_width)),
                    Style::default().fg(colors.error),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    f.render_widget(List::new(items).block(block(" Curves ", colors)), area);
}

fn draw_axes(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let calibration = app.digitizer.calibration();
    let selected = app.digitizer.selected_axis();

    let mut lines: Vec<Line<'_>> = calibration
        .axes()
        .iter()
        .enumerate()
        .map(|(i, axis)| {
            let label_style = if selected == Some(i) {
                Style::default().fg(colors.heading).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.label)
            };
            Line::from(vec![
                Span::styled(format!("A{} ", i + 1), label_style),
                Span::styled(
                    format!("px ({}, {})", axis.pixel.x, axis.pixel.y),
                    Style::default().fg(colors.text),
                ),
                Span::raw(" = "),
                Span::styled(
                    formatters::format_pair(axis.value),
                    Style::default().fg(colors.value),
                ),
            ])
        })
        .collect();

    if let Some(pending) = calibration.pending() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("A{} ", lines.len() + 1),
                Style::default().fg(colors.pending),
            ),
            Span::styled(
                format!("px ({}, {}) = ?", pending.x, pending.y),
                Style::default().fg(colors.pending),
            ),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No axes - press a, then click three reference points",
            Style::default().fg(colors.border),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block(" Axes ", colors))
        .style(Style::default().fg(colors.text));
    f.render_widget(paragraph, area);
}

fn draw_table(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    if app.table.is_empty() {
        let paragraph = Paragraph::new("Press c to calculate data values")
            .block(block(" Data ", colors))
            .style(Style::default().fg(colors.border));
        f.render_widget(paragraph, area);
        return;
    }

    let visible = (area.height as usize).saturating_sub(3);
    let rows: Vec<Row<'_>> = app
        .table
        .iter()
        .skip(app.table_scroll)
        .take(visible)
        .map(|row| {
            Row::new(vec![
                Cell::from(row.curve_id.to_string()).style(Style::default().fg(colors.label)),
                Cell::from(row.point_index.to_string()).style(Style::default().fg(colors.label)),
                Cell::from(formatters::format_value(row.x))
                    .style(Style::default().fg(colors.value)),
                Cell::from(formatters::format_value(row.y))
                    .style(Style::default().fg(colors.value)),
            ])
        })
        .collect();

    let header = Row::new(vec!["Curve", "Pt", "X", "Y"]).style(
        Style::default()
            .fg(colors.heading)
            .add_modifier(Modifier::BOLD),
    );
    let widths = [
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Min(8),
        Constraint::Min(8),
    ];

    let title = format!(" Data ({} rows) ", app.table.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(block(&title, colors))
        .style(Style::default().fg(colors.text));
    f.render_widget(table, area);
}
