//! Curvegrab - A terminal-based chart digitizer.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use curvegrab::app::App;
use curvegrab::config::CanvasSize;
use curvegrab::digitizer::{Click, Mode};
use curvegrab::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "curvegrab", version)]
#[command(about = "A terminal-based chart digitizer", long_about = None)]
struct Args {
    /// Width of the pixel canvas
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Height of the pixel canvas
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// CSV file written by the export key
    #[arg(long, default_value = "curvegrab.csv")]
    export: PathBuf,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Args {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Canvas size must be nonzero, got {}x{}",
                self.width, self.height
            ));
        }
        if let Some(dir) = self.export.parent() {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                return Err(format!("Export directory not found: {}", dir.display()));
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(msg) = args.validate() {
        eprintln!("Error: {}", msg);
        std::process::exit(1);
    }

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::File::create(log_path)?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!(width = args.width, height = args.height, "Starting Curvegrab");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let canvas = CanvasSize {
        width: f64::from(args.width),
        height: f64::from(args.height),
    };
    let app = App::new(canvas, args.export.clone());
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    tracing::info!("Curvegrab exited");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.prompt.is_active() {
                    handle_prompt_key(&mut app, key);
                } else if !handle_key(&mut app, key) {
                    return Ok(());
                }
            },
            Event::Mouse(mouse) if !app.prompt.is_active() => handle_mouse(&mut app, mouse),
            _ => {},
        }
    }
}

/// Value prompt keys.
fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_prompt(),
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Backspace => app.prompt.backspace(),
        KeyCode::Char(c) => app.prompt.input(c),
        _ => {},
    }
}

/// Normal mode keys; returns false to quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q')) => return false,

        // Crosshair
        (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
            app.move_cursor(0.0, -1.0, false);
        },
        (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
            app.move_cursor(0.0, 1.0, false);
        },
        (KeyModifiers::NONE, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => {
            app.move_cursor(-1.0, 0.0, false);
        },
        (KeyModifiers::NONE, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
            app.move_cursor(1.0, 0.0, false);
        },
        (KeyModifiers::SHIFT, KeyCode::Up) | (KeyModifiers::SHIFT, KeyCode::Char('K')) => {
            app.move_cursor(0.0, -1.0, true);
        },
        (KeyModifiers::SHIFT, KeyCode::Down) | (KeyModifiers::SHIFT, KeyCode::Char('J')) => {
            app.move_cursor(0.0, 1.0, true);
        },
        (KeyModifiers::SHIFT, KeyCode::Left) | (KeyModifiers::SHIFT, KeyCode::Char('H')) => {
            app.move_cursor(-1.0, 0.0, true);
        },
        (KeyModifiers::SHIFT, KeyCode::Right) | (KeyModifiers::SHIFT, KeyCode::Char('L')) => {
            app.move_cursor(1.0, 0.0, true);
        },

        // Clicks
        (KeyModifiers::NONE, KeyCode::Char(' ')) | (KeyModifiers::NONE, KeyCode::Enter) => {
            app.click(Click::Primary);
        },
        (KeyModifiers::NONE, KeyCode::Char('x')) => app.click(Click::Secondary),

        // Tools
        (KeyModifiers::NONE, KeyCode::Char('a')) => app.toggle_mode(Mode::PlacingAxis),
        (KeyModifiers::NONE, KeyCode::Char('s')) => app.toggle_mode(Mode::SelectingAxis),
        (KeyModifiers::NONE, KeyCode::Char('p')) => app.toggle_mode(Mode::AddingPoints),
        (KeyModifiers::NONE, KeyCode::Esc) => app.set_idle(),
        (KeyModifiers::SHIFT, KeyCode::Char('S')) => app.relocate_selected_axis(),

        // Curves
        (KeyModifiers::NONE, KeyCode::Char('n')) => app.add_curve(),
        (KeyModifiers::SHIFT, KeyCode::Char('N')) => app.delete_curve(),
        (KeyModifiers::NONE, KeyCode::Tab) => app.next_curve(),
        (KeyModifiers::NONE, KeyCode::Char('w')) => app.cycle_line_width(),
        (KeyModifiers::NONE, KeyCode::Char('r')) => app.start_rename(),
        (KeyModifiers::NONE, KeyCode::Char(c @ '0'..='9')) => {
            // 1-9 pick curves 1-9, 0 picks curve 10
            let id = match c.to_digit(10) {
                Some(0) | None => 10,
                Some(d) => d as usize,
            };
            app.switch_curve(id);
        },

        // History
        (KeyModifiers::NONE, KeyCode::Char('u')) => app.undo(),
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => app.redo(),

        // Data
        (KeyModifiers::NONE, KeyCode::Char('c')) => app.calculate(),
        (KeyModifiers::NONE, KeyCode::Char('e')) => app.export_csv(),
        (KeyModifiers::NONE, KeyCode::Char('y')) => app.copy_table(),
        (KeyModifiers::NONE, KeyCode::Char(']')) => app.scroll_table(1),
        (KeyModifiers::NONE, KeyCode::Char('[')) => app.scroll_table(-1),

        // View
        (KeyModifiers::NONE, KeyCode::Char('g')) => app.toggle_grid(),
        (KeyModifiers::SHIFT, KeyCode::Char('G')) => app.cycle_grid_x(),
        (KeyModifiers::CONTROL, KeyCode::Char('g')) => app.cycle_grid_y(),
        (KeyModifiers::NONE, KeyCode::Char('t')) => app.toggle_table(),
        (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),

        _ => {},
    }
    true
}

/// Left click = primary, right click = secondary; the crosshair follows the pointer.
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.point_at_cell(mouse.column, mouse.row) {
                app.click(Click::Primary);
            }
        },
        MouseEventKind::Down(MouseButton::Right) => {
            if app.point_at_cell(mouse.column, mouse.row) {
                app.click(Click::Secondary);
            }
        },
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.point_at_cell(mouse.column, mouse.row);
        },
        _ => {},
    }
}
