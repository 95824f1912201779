//! User interface rendering.

mod canvas;
mod formatters;
mod keymap_bar;
mod panel;
mod prompt;
mod status_bar;
mod theme;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub use formatters::{fit_width, format_pair, format_value};
pub use theme::ThemeColors;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);
    let model = app.digitizer.render_model();

    // Main layout with status bar and key map bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    if app.show_table {
        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(app.layout.panel_width)])
            .split(chunks[0]);

        canvas::draw_canvas(f, app, &model, content[0], &colors);
        panel::draw_panel(f, app, &model, content[1], &colors);
    } else {
        canvas::draw_canvas(f, app, &model, chunks[0], &colors);
    }

    status_bar::draw_status(f, chunks[1], app, &colors);
    keymap_bar::draw_keymap(f, chunks[2], app, &colors);

    if app.prompt.is_active() {
        prompt::draw_prompt(f, &app.prompt, chunks[0], &colors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasSize;
    use crate::digitizer::{Click, Mode, Point};
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn draw_records_canvas_area() {
        let mut app = App::new(CanvasSize::default(), PathBuf::from("out.csv"));
        let screen = render(&mut app);
        assert!(app.canvas_area.width > 0);
        assert!(screen.contains("Curves"));
        assert!(screen.contains("a:axes"));
    }

    #[test]
    fn prompt_is_drawn_after_axis_click() {
        let mut app = App::new(CanvasSize::default(), PathBuf::from("out.csv"));
        app.toggle_mode(Mode::PlacingAxis);
        app.cursor = Point::new(100.0, 100.0);
        app.click(Click::Primary);
        let screen = render(&mut app);
        assert!(screen.contains("Value of axis 1"));
        assert!(screen.contains("Enter:set value"));
    }

    fn calibrated() -> App {
        let mut app = App::new(CanvasSize::default(), PathBuf::from("out.csv"));
        app.toggle_mode(Mode::PlacingAxis);
        for (x, y, value) in [(0.0, 100.0, "0, 0"), (100.0, 100.0, "10, 0"), (0.0, 0.0, "0, 10")] {
            app.cursor = Point::new(x, y);
            app.click(Click::Primary);
            for c in value.chars() {
                app.prompt.input(c);
            }
            app.submit_prompt();
        }
        app
    }

    #[test]
    fn active_tool_and_pointer_are_shown() {
        let mut app = calibrated();
        app.toggle_mode(Mode::AddingPoints);
        let screen = render(&mut app);
        assert!(screen.contains("[Add Points] Pencil"));

        app.set_idle();
        let screen = render(&mut app);
        assert!(!screen.contains("[Add Points]"));
        assert!(screen.contains("Arrow"));
    }

    #[test]
    fn interpolation_failure_is_shown_in_panel() {
        let mut app = calibrated();
        app.toggle_mode(Mode::AddingPoints);
        let pixels = [
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 20.0),
            (20.0, 30.0),
            (30.0, 40.0),
            (30.0, 50.0),
            (40.0, 60.0),
        ];
        for (x, y) in pixels {
            app.cursor = Point::new(x, y);
            app.click(Click::Primary);
        }
        assert!(app.digitizer.render_model().curves[0].failure.is_some());
        let screen = render(&mut app);
        assert!(screen.contains("! Interpolation"));
    }

    #[test]
    fn rename_prompt_is_titled() {
        let mut app = App::new(CanvasSize::default(), PathBuf::from("out.csv"));
        app.start_rename();
        let screen = render(&mut app);
        assert!(screen.contains("Rename curve 1"));
        assert!(screen.contains("name: Curve1_"));
        assert!(screen.contains("Enter:rename"));
    }
}
