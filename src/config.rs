//! Configuration for the digitizer core and the terminal layout.

/// Limits and tolerances used by the digitizer core.
#[derive(Debug, Clone)]
pub struct DigitizerConfig {
    /// Maximum number of curves.
    pub max_curves: usize,
    /// Pick radius in pixels for axis delete/select clicks.
    pub axis_tolerance: f64,
    /// Pick radius in pixels for point removal.
    pub point_tolerance: f64,
    /// Adjacent X gap (pixels) at or below which a sorted curve is split.
    pub run_break_gap: f64,
    /// Number of spline samples per run.
    pub spline_samples: usize,
    /// Minimum number of points before a run is spline-fitted.
    pub spline_min_points: usize,
    /// Decimal places of values surfaced in the data table.
    pub display_decimals: i32,
}

impl Default for DigitizerConfig {
    fn default() -> Self {
        Self {
            max_curves: 10,
            axis_tolerance: 10.0,
            point_tolerance: 2.0,
            run_break_gap: 2.0,
            spline_samples: 100,
            spline_min_points: 4,
            display_decimals: 2,
        }
    }
}

/// Size of the pixel plane that clicks are reported in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Configuration for the terminal layout.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Width of the side panel in characters.
    pub panel_width: u16,
    /// Crosshair step in pixels for plain arrow keys.
    pub cursor_step: f64,
    /// Crosshair step in pixels with Shift held.
    pub cursor_fast_step: f64,
    /// Grid divisions along X (1..=12).
    pub grid_x: u8,
    /// Grid divisions along Y (1..=12).
    pub grid_y: u8,
    /// Dash length in pixels for run-break connectors.
    pub dash_length: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            panel_width: 44,
            cursor_step: 1.0,
            cursor_fast_step: 10.0,
            grid_x: 4,
            grid_y: 4,
            dash_length: 6.0,
        }
    }
}

impl LayoutConfig {
    /// Largest grid division count.
    pub const MAX_GRID: u8 = 12;

    /// Set grid divisions, clamped to 1..=12.
    pub fn set_grid(&mut self, x: u8, y: u8) {
        self.grid_x = x.clamp(1, Self::MAX_GRID);
        self.grid_y = y.clamp(1, Self::MAX_GRID);
    }

    /// Step vertical grid divisions, wrapping after the maximum.
    pub fn cycle_grid_x(&mut self) {
        self.set_grid(Self::next_grid(self.grid_x), self.grid_y);
    }

    /// Step horizontal grid divisions, wrapping after the maximum.
    pub fn cycle_grid_y(&mut self) {
        self.set_grid(self.grid_x, Self::next_grid(self.grid_y));
    }

    fn next_grid(n: u8) -> u8 {
        if n >= Self::MAX_GRID {
            1
        } else {
            n + 1
        }
    }
}
