//! Application state and logic.

use std::path::PathBuf;

use ratatui::layout::Rect;

use crate::config::{CanvasSize, DigitizerConfig, LayoutConfig};
use crate::digitizer::{Click, CursorShape, Digitizer, Effect, Mode, Point, TableRow, UiHint};
use crate::error::DigitizeError;
use crate::export;
use crate::input::{PromptKind, TextPrompt};

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Session model.
    pub digitizer: Digitizer,
    /// Pixel plane size.
    pub canvas: CanvasSize,
    /// Layout settings.
    pub layout: LayoutConfig,
    /// Crosshair position in pixels.
    pub cursor: Point,
    /// Screen area of the canvas, set on every draw.
    pub canvas_area: Rect,
    /// Popup prompt for axis values and curve names.
    pub prompt: TextPrompt,
    /// Rows from the last calculation.
    pub table: Vec<TableRow>,
    /// First table row shown in the panel.
    pub table_scroll: usize,
    /// Target of CSV export.
    pub export_path: PathBuf,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// Pointer shape requested by the active tool.
    pub cursor_shape: CursorShape,
    /// Tool shown as highlighted.
    pub highlighted: Option<Mode>,
    /// Data table panel visibility.
    pub show_table: bool,
    /// Grid line visibility.
    pub show_grid: bool,
}

impl App {
    /// Create a new application instance.
    pub fn new(canvas: CanvasSize, export_path: PathBuf) -> Self {
        Self {
            digitizer: Digitizer::new(DigitizerConfig::default()),
            canvas,
            layout: LayoutConfig::default(),
            cursor: Point::new((canvas.width / 2.0).floor(), (canvas.height / 2.0).floor()),
            canvas_area: Rect::default(),
            prompt: TextPrompt::new(),
            table: Vec::new(),
            table_scroll: 0,
            export_path,
            status: "Ready - press a to place axis points".to_string(),
            theme: Theme::GruvboxDark,
            cursor_shape: CursorShape::Arrow,
            highlighted: None,
            show_table: true,
            show_grid: false,
        }
    }

    fn apply_hints(&mut self, hints: &[UiHint]) {
        for hint in hints {
            match *hint {
                UiHint::ClearHighlight => self.highlighted = None,
                UiHint::Highlight(mode) => self.highlighted = Some(mode),
                UiHint::Cursor(shape) => self.cursor_shape = shape,
            }
        }
    }

    /// Drop the calculated table; it no longer matches the session.
    fn invalidate_table(&mut self) {
        self.table.clear();
        self.table_scroll = 0;
    }

    fn report(&mut self, err: DigitizeError) {
        tracing::warn!(kind = ?err.kind(), "{}", err);
        self.status = err.to_string();
    }

    /// Toggle an interaction tool.
    pub fn toggle_mode(&mut self, mode: Mode) {
        match self.digitizer.toggle_mode(mode) {
            Ok(transition) => {
                self.apply_hints(&transition.hints);
                self.status = format!("Tool: {}", transition.mode.name());
            },
            Err(e) => self.report(e),
        }
    }

    /// Leave the active tool.
    pub fn set_idle(&mut self) {
        let transition = self.digitizer.set_idle();
        self.apply_hints(&transition.hints);
        self.status = "Tool: Idle".to_string();
    }

    /// Move the crosshair by whole pixels.
    pub fn move_cursor(&mut self, dx: f64, dy: f64, fast: bool) {
        let step = if fast {
            self.layout.cursor_fast_step
        } else {
            self.layout.cursor_step
        };
        self.cursor = Point::new(
            (self.cursor.x + dx * step).clamp(0.0, self.canvas.width - 1.0),
            (self.cursor.y + dy * step).clamp(0.0, self.canvas.height - 1.0),
        );
    }

    /// Map a terminal cell inside the canvas to an image pixel.
    pub fn cell_to_pixel(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.canvas_area;
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }
        let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
        let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
        Some(Point::new(
            (fx * self.canvas.width).floor(),
            (fy * self.canvas.height).floor(),
        ))
    }

    /// Move the crosshair to a terminal cell; returns false outside the canvas.
    pub fn point_at_cell(&mut self, column: u16, row: u16) -> bool {
        match self.cell_to_pixel(column, row) {
            Some(pixel) => {
                self.cursor = pixel;
                true
            },
            None => false,
        }
    }

    /// Click at the crosshair.
    pub fn click(&mut self, click: Click) {
        let pixel = self.cursor;
        match self.digitizer.on_pixel_click(click, pixel) {
            Effect::AxisPlaced { index } => {
                self.invalidate_table();
                self.prompt.start_axis(index);
                self.status = format!("Axis {} placed - enter its value as x, y", index + 1);
            },
            Effect::AxisRemoved { index } => {
                self.invalidate_table();
                self.status = format!("Axis {} deleted", index + 1);
            },
            Effect::AxisSelected { index } => {
                self.status = format!("Axis {} selected - S moves it to the crosshair", index + 1);
            },
            Effect::PointAdded { curve, index } => {
                self.invalidate_table();
                self.status = format!(
                    "Point {} added to {} at ({}, {})",
                    index + 1,
                    self.curve_name(curve),
                    pixel.x,
                    pixel.y
                );
            },
            Effect::PointRemoved { curve, index } => {
                self.invalidate_table();
                self.status =
                    format!("Point {} removed from {}", index + 1, self.curve_name(curve));
            },
            Effect::NoOp => {
                self.status = format!("X: {}, Y: {}", pixel.x, pixel.y);
            },
            Effect::Rejected(e) => self.report(e),
        }
    }

    fn curve_name(&self, id: usize) -> String {
        self.digitizer
            .curves()
            .get(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|_| format!("Curve{}", id))
    }

    /// Apply the prompt text to whatever the prompt was opened for.
    pub fn submit_prompt(&mut self) {
        let result = match self.prompt.kind() {
            Some(PromptKind::AxisValue { .. }) => self
                .digitizer
                .on_value_submitted(self.prompt.buffer())
                .map(|index| format!("Axis {} value set", index + 1)),
            Some(PromptKind::CurveName { curve_id }) => {
                let name = self.prompt.buffer().trim().to_string();
                self.digitizer
                    .rename_curve(curve_id, &name)
                    .map(|()| format!("Curve {} renamed to {}", curve_id, name))
            },
            None => return,
        };
        match result {
            Ok(status) => {
                self.prompt.close();
                self.invalidate_table();
                self.status = status;
            },
            Err(e) => {
                self.prompt.reject(e.to_string());
                self.report(e);
            },
        }
    }

    /// Close the prompt. An axis prompt also drops the pending axis.
    pub fn cancel_prompt(&mut self) {
        let kind = self.prompt.kind();
        self.prompt.close();
        match kind {
            Some(PromptKind::AxisValue { .. }) => match self.digitizer.cancel_pending() {
                Ok(()) => {
                    self.invalidate_table();
                    self.status = "Axis placement cancelled".to_string();
                },
                Err(e) => self.report(e),
            },
            Some(PromptKind::CurveName { .. }) => self.status = "Rename cancelled".to_string(),
            None => {},
        }
    }

    /// Ask for a new name for the active curve.
    pub fn start_rename(&mut self) {
        let curve = self.digitizer.curves().current();
        let (id, name) = (curve.id, curve.name.clone());
        self.prompt.start_rename(id, &name);
        self.status = format!("Renaming {}", name);
    }

    /// Move the selected axis to the crosshair and ask for its value.
    pub fn relocate_selected_axis(&mut self) {
        match self.digitizer.relocate_selected_axis(self.cursor) {
            Ok(index) => {
                self.invalidate_table();
                self.prompt.start_axis(index);
                self.status = "Axis moved - enter its value as x, y".to_string();
            },
            Err(e) => self.report(e),
        }
    }

    /// Convert all points and show the table.
    pub fn calculate(&mut self) {
        match self.digitizer.calculate_all() {
            Ok(rows) => {
                self.status = format!("Calculated {} points", rows.len());
                self.table = rows;
                self.table_scroll = 0;
                self.show_table = true;
            },
            Err(e) => self.report(e),
        }
    }

    /// Add a curve and make it active.
    pub fn add_curve(&mut self) {
        match self.digitizer.add_curve() {
            Ok(id) => {
                self.invalidate_table();
                self.status = format!("{} added", self.curve_name(id));
            },
            Err(e) => self.report(e),
        }
    }

    /// Delete the active curve.
    pub fn delete_curve(&mut self) {
        match self.digitizer.delete_current_curve() {
            Ok(curve) => {
                self.invalidate_table();
                self.status = format!("{} deleted", curve.name);
            },
            Err(e) => self.report(e),
        }
    }

    /// Activate the next curve.
    pub fn next_curve(&mut self) {
        let id = self.digitizer.next_curve();
        self.status = format!("Current curve: {}", self.curve_name(id));
    }

    /// Activate a curve by ID.
    pub fn switch_curve(&mut self, id: usize) {
        match self.digitizer.switch_curve(id) {
            Ok(()) => self.status = format!("Current curve: {}", self.curve_name(id)),
            Err(e) => self.report(e),
        }
    }

    /// Cycle the active curve's line width.
    pub fn cycle_line_width(&mut self) {
        let curve = self.digitizer.curves().current();
        let (id, style) = (curve.id, curve.style.next_width());
        match self.digitizer.set_curve_style(id, style) {
            Ok(()) => self.status = format!("Line width: {}", style.width),
            Err(e) => self.report(e),
        }
    }

    /// Undo the last edit.
    pub fn undo(&mut self) {
        match self.digitizer.undo() {
            Ok(label) => {
                self.invalidate_table();
                self.status = format!("Undone: {}", label);
            },
            Err(e) => self.report(e),
        }
        self.sync_prompt();
    }

    /// Redo the last undone edit.
    pub fn redo(&mut self) {
        match self.digitizer.redo() {
            Ok(label) => {
                self.invalidate_table();
                self.status = format!("Redone: {}", label);
            },
            Err(e) => self.report(e),
        }
        self.sync_prompt();
    }

    /// Open or close the axis prompt to match the pending axis.
    ///
    /// A rename in progress is closed, since its curve may be gone.
    fn sync_prompt(&mut self) {
        if !self.prompt.is_axis_value() {
            self.prompt.close();
        }
        let pending = self.digitizer.pending_axis().is_some();
        if pending && !self.prompt.is_active() {
            self.prompt.start_axis(self.digitizer.calibration().value_count());
        } else if !pending && self.prompt.is_active() {
            self.prompt.close();
        }
    }

    /// Write the data table to the export path.
    pub fn export_csv(&mut self) {
        let result = self
            .digitizer
            .export_table()
            .and_then(|rows| export::write_csv(&self.export_path, &rows).map(|_| rows.len()));
        match result {
            Ok(n) => self.status = format!("Exported {} rows to {}", n, self.export_path.display()),
            Err(e) => self.report(e),
        }
    }

    /// Copy the data table to the clipboard.
    pub fn copy_table(&mut self) {
        match self
            .digitizer
            .export_table()
            .and_then(|rows| export::copy_table(&rows))
        {
            Ok(()) => self.status = "Table copied!".to_string(),
            Err(e) => self.report(e),
        }
    }

    /// Scroll the data table by `delta` rows.
    pub fn scroll_table(&mut self, delta: isize) {
        let max = self.table.len().saturating_sub(1);
        self.table_scroll = self.table_scroll.saturating_add_signed(delta).min(max);
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Toggle the data table panel.
    pub fn toggle_table(&mut self) {
        self.show_table = !self.show_table;
        self.status = if self.show_table {
            "Table: ON".to_string()
        } else {
            "Table: OFF".to_string()
        };
    }

    /// Toggle grid lines.
    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
        self.status = format!("Grid: {}", if self.show_grid { "ON" } else { "OFF" });
    }

    /// Cycle the number of vertical grid divisions, showing the grid.
    pub fn cycle_grid_x(&mut self) {
        self.layout.cycle_grid_x();
        self.show_grid = true;
        self.status = format!("Grid: {}x{}", self.layout.grid_x, self.layout.grid_y);
    }

    /// Cycle the number of horizontal grid divisions, showing the grid.
    pub fn cycle_grid_y(&mut self) {
        self.layout.cycle_grid_y();
        self.show_grid = true;
        self.status = format!("Grid: {}x{}", self.layout.grid_x, self.layout.grid_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new(CanvasSize::default(), PathBuf::from("out.csv"));
        app.canvas_area = Rect::new(10, 5, 80, 30);
        app
    }

    fn place(app: &mut App, x: f64, y: f64, value: &str) {
        app.cursor = Point::new(x, y);
        app.click(Click::Primary);
        for c in value.chars() {
            app.prompt.input(c);
        }
        app.submit_prompt();
    }

    #[test]
    fn cells_map_to_pixels() {
        let app = app();
        assert_eq!(app.cell_to_pixel(10, 5), Some(Point::new(5.0, 10.0)));
        assert_eq!(app.cell_to_pixel(89, 34), Some(Point::new(795.0, 590.0)));
        assert_eq!(app.cell_to_pixel(9, 5), None);
        assert_eq!(app.cell_to_pixel(90, 5), None);
    }

    #[test]
    fn cursor_stays_on_canvas() {
        let mut app = app();
        app.cursor = Point::new(0.0, 0.0);
        app.move_cursor(-1.0, -1.0, true);
        assert_eq!(app.cursor, Point::new(0.0, 0.0));
        app.cursor = Point::new(799.0, 599.0);
        app.move_cursor(1.0, 1.0, false);
        assert_eq!(app.cursor, Point::new(799.0, 599.0));
    }

    #[test]
    fn full_session_flow() {
        let mut app = app();
        app.toggle_mode(Mode::AddingPoints);
        assert_eq!(app.digitizer.mode(), Mode::Idle);

        app.toggle_mode(Mode::PlacingAxis);
        assert_eq!(app.cursor_shape, CursorShape::Crosshair);
        place(&mut app, 0.0, 100.0, "0, 0");
        place(&mut app, 100.0, 100.0, "10, 0");
        place(&mut app, 0.0, 0.0, "0, 10");
        assert!(!app.prompt.is_active());

        app.toggle_mode(Mode::AddingPoints);
        assert_eq!(app.highlighted, Some(Mode::AddingPoints));
        app.cursor = Point::new(50.0, 100.0);
        app.click(Click::Primary);
        app.calculate();
        assert_eq!(app.table.len(), 1);
        assert_eq!((app.table[0].x, app.table[0].y), (5.0, 0.0));
    }

    #[test]
    fn collinear_value_keeps_prompt_open() {
        let mut app = app();
        app.toggle_mode(Mode::PlacingAxis);
        place(&mut app, 0.0, 0.0, "0, 0");
        place(&mut app, 10.0, 10.0, "1, 1");
        place(&mut app, 20.0, 30.0, "2, 2");
        assert!(app.prompt.is_active());
        assert!(app.prompt.error().is_some());
        app.cancel_prompt();
        assert!(app.digitizer.pending_axis().is_none());
    }

    #[test]
    fn undo_reopens_prompt_for_pending_axis() {
        let mut app = app();
        app.toggle_mode(Mode::PlacingAxis);
        app.cursor = Point::new(5.0, 5.0);
        app.click(Click::Primary);
        for c in "1, 2".chars() {
            app.prompt.input(c);
        }
        app.submit_prompt();
        assert!(!app.prompt.is_active());

        app.undo();
        assert!(app.prompt.is_active());
        app.undo();
        assert!(!app.prompt.is_active());
    }

    fn calibrated_with_point() -> App {
        let mut app = app();
        app.toggle_mode(Mode::PlacingAxis);
        place(&mut app, 0.0, 100.0, "0, 0");
        place(&mut app, 100.0, 100.0, "10, 0");
        place(&mut app, 0.0, 0.0, "0, 10");
        app.toggle_mode(Mode::AddingPoints);
        app.cursor = Point::new(50.0, 100.0);
        app.click(Click::Primary);
        app.calculate();
        assert_eq!(app.table.len(), 1);
        app
    }

    #[test]
    fn undo_clears_stale_table() {
        let mut app = calibrated_with_point();
        app.table_scroll = 3;
        app.undo();
        assert!(app.table.is_empty());
        assert_eq!(app.table_scroll, 0);
    }

    #[test]
    fn point_edits_clear_stale_table() {
        let mut app = calibrated_with_point();
        app.click(Click::Secondary);
        assert!(app.table.is_empty());

        app.calculate();
        app.add_curve();
        assert!(app.table.is_empty());
    }

    #[test]
    fn failed_edit_keeps_table() {
        let mut app = calibrated_with_point();
        app.toggle_mode(Mode::PlacingAxis);
        app.cursor = Point::new(300.0, 300.0);
        app.click(Click::Primary);
        assert_eq!(app.table.len(), 1);
    }

    #[test]
    fn rename_flow_updates_curve_and_undoes() {
        let mut app = app();
        app.start_rename();
        assert_eq!(app.prompt.buffer(), "Curve1");
        for _ in 0.."Curve1".len() {
            app.prompt.backspace();
        }
        for c in " Dry run ".chars() {
            app.prompt.input(c);
        }
        app.submit_prompt();
        assert!(!app.prompt.is_active());
        assert_eq!(app.digitizer.curves().current().name, "Dry run");

        app.undo();
        assert_eq!(app.digitizer.curves().current().name, "Curve1");
    }

    #[test]
    fn blank_rename_keeps_prompt_open() {
        let mut app = app();
        app.start_rename();
        for _ in 0.."Curve1".len() {
            app.prompt.backspace();
        }
        app.prompt.input(' ');
        app.submit_prompt();
        assert!(app.prompt.is_active());
        assert!(app.prompt.error().is_some());

        app.cancel_prompt();
        assert!(!app.prompt.is_active());
        assert_eq!(app.digitizer.curves().current().name, "Curve1");
        assert!(!app.digitizer.can_undo());
    }

    #[test]
    fn switch_curve_by_id() {
        let mut app = app();
        app.add_curve();
        app.add_curve();
        app.switch_curve(2);
        assert_eq!(app.digitizer.curves().current_id(), 2);
        app.switch_curve(7);
        assert_eq!(app.digitizer.curves().current_id(), 2);
        assert!(app.status.contains('7'));
    }

    #[test]
    fn grid_axes_cycle_independently() {
        let mut app = app();
        app.cycle_grid_x();
        assert!(app.show_grid);
        assert_eq!((app.layout.grid_x, app.layout.grid_y), (5, 4));
        app.cycle_grid_y();
        app.cycle_grid_y();
        assert_eq!((app.layout.grid_x, app.layout.grid_y), (5, 6));
        app.toggle_grid();
        assert!(!app.show_grid);
    }
}
