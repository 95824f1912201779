//! Keymap help bar UI component.

use crate::app::App;
use crate::digitizer::Mode;
use crate::input::PromptKind;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Keys shown for the current interaction state.
pub(super) fn keymap_text(app: &App) -> &'static str {
    match app.prompt.kind() {
        Some(PromptKind::AxisValue { .. }) => {
            return "Type x, y | Enter:set value | Backspace:erase | Esc:cancel axis";
        },
        Some(PromptKind::CurveName { .. }) => {
            return "Type a name | Enter:rename | Backspace:erase | Esc:cancel";
        },
        None => {},
    }
    match app.digitizer.mode() {
        Mode::PlacingAxis => {
            "Space:place | x:delete | hjkl:move (H/J/K/L fast) | a/Esc:done | u:undo"
        },
        Mode::SelectingAxis => "Space:select | S:move axis here | s/Esc:done | u:undo",
        Mode::AddingPoints => {
            "Space:add | x:remove | Tab/1-0:curve | n/N:new/delete | r:rename | p/Esc:done"
        },
        Mode::Idle => {
            "a:axes | s:select | p:points | c:calc | e:export | y:copy | u/^r:undo/redo \
             | r:rename | t:table | g/G/^g:grid | T:theme | q:quit"
        },
    }
}

/// Draw the keymap help bar.
pub(super) fn draw_keymap(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let paragraph =
        Paragraph::new(keymap_text(app)).style(Style::default().fg(colors.text).bg(colors.bg));

    f.render_widget(paragraph, area);
}
