//! Chart canvas: grid, axis markers, curves and the crosshair.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, Borders,
    },
    Frame,
};

use super::{formatters, ThemeColors};
use crate::app::App;
use crate::digitizer::{CurveRender, Point, RenderModel, Segment};

/// Half size of axis and crosshair marks in pixels.
const MARK: f64 = 6.0;

/// Canvas geometry needed while painting.
struct Plane {
    height: f64,
    /// Pixel height of one braille dot row.
    dot: f64,
}

impl Plane {
    fn line(&self, ctx: &mut Context<'_>, seg: Segment, offset: f64, color: Color) {
        ctx.draw(&CanvasLine {
            x1: seg.from.x,
            y1: self.height - seg.from.y + offset,
            x2: seg.to.x,
            y2: self.height - seg.to.y + offset,
            color,
        });
    }

    fn cross(&self, ctx: &mut Context<'_>, p: Point, size: f64, color: Color) {
        self.line(
            ctx,
            Segment::new(Point::new(p.x - size, p.y), Point::new(p.x + size, p.y)),
            0.0,
            color,
        );
        self.line(
            ctx,
            Segment::new(Point::new(p.x, p.y - size), Point::new(p.x, p.y + size)),
            0.0,
            color,
        );
    }
}

/// Draw the canvas and remember its inner area for mouse mapping.
pub(super) fn draw_canvas(
    f: &mut Frame<'_>,
    app: &mut App,
    model: &RenderModel,
    area: Rect,
    colors: &ThemeColors,
) {
    let (width, height) = (app.canvas.width, app.canvas.height);

    // Highlighted tool button and pointer shape
    let tool = match app.highlighted {
        Some(mode) => format!("[{}] {}", mode.name(), app.cursor_shape.name()),
        None => format!("{} {}", model.mode.name(), app.cursor_shape.name()),
    };
    let title = match app.digitizer.to_data_space(app.cursor) {
        Ok(value) => format!(
            " {} | px ({}, {}) -> {} ",
            tool,
            app.cursor.x,
            app.cursor.y,
            formatters::format_pair(value)
        ),
        Err(_) => format!(" {} | px ({}, {}) ", tool, app.cursor.x, app.cursor.y),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));
    let inner = block.inner(area);
    app.canvas_area = inner;

    let plane = Plane {
        height,
        dot: height / (f64::from(inner.height.max(1)) * 4.0),
    };
    let cursor = app.cursor;
    let show_grid = app.show_grid;
    let layout = &app.layout;

    let canvas = Canvas::default()
        .block(block)
        .background_color(colors.bg)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .marker(Marker::Braille)
        .paint(|ctx| {
            if show_grid {
                for i in 1..layout.grid_x {
                    let x = width * f64::from(i) / f64::from(layout.grid_x);
                    plane.line(
                        ctx,
                        Segment::new(Point::new(x, 0.0), Point::new(x, height)),
                        0.0,
                        colors.grid,
                    );
                }
                for i in 1..layout.grid_y {
                    let y = height * f64::from(i) / f64::from(layout.grid_y);
                    plane.line(
                        ctx,
                        Segment::new(Point::new(0.0, y), Point::new(width, y)),
                        0.0,
                        colors.grid,
                    );
                }
                ctx.layer();
            }

            for curve in &model.curves {
                draw_curve(ctx, &plane, curve, layout.dash_length);
            }
            ctx.layer();

            draw_axes(ctx, &plane, model, colors);
            plane.cross(ctx, cursor, MARK, colors.crosshair);
        });

    f.render_widget(canvas, area);
}

fn draw_curve(ctx: &mut Context<'_>, plane: &Plane, curve: &CurveRender, dash: f64) {
    let (r, g, b) = curve.style.color;
    let color = Color::Rgb(r, g, b);

    for &seg in &curve.segments {
        for k in 0..curve.style.width {
            plane.line(ctx, seg, f64::from(k) * plane.dot, color);
        }
    }
    if let Some(connector) = curve.connector {
        for piece in connector.dashes(dash) {
            plane.line(ctx, piece, 0.0, color);
        }
    }

    let coords: Vec<(f64, f64)> = curve
        .points
        .iter()
        .map(|p| (p.x, plane.height - p.y))
        .collect();
    ctx.draw(&Points {
        coords: &coords,
        color,
    });
    if curve.active {
        for &p in &curve.points {
            plane.cross(ctx, p, MARK / 3.0, color);
        }
    }
}

fn draw_axes(ctx: &mut Context<'_>, plane: &Plane, model: &RenderModel, colors: &ThemeColors) {
    for axis in &model.axes {
        let color = if axis.selected {
            colors.heading
        } else {
            colors.axis
        };
        plane.cross(ctx, axis.pixel, MARK, color);
        ctx.print(
            axis.pixel.x + MARK,
            plane.height - axis.pixel.y + MARK,
            Span::styled(format!("A{}", axis.index + 1), Style::default().fg(color)),
        );
    }
    if let Some(pending) = model.pending_axis {
        plane.cross(ctx, pending, MARK, colors.pending);
        ctx.print(
            pending.x + MARK,
            plane.height - pending.y + MARK,
            Span::styled(
                format!("A{}?", model.axes.len() + 1),
                Style::default().fg(colors.pending),
            ),
        );
    }
}
