//! Interaction modes and their toggle transitions.

use super::calibration::REQUIRED_AXES;
use crate::error::{DigitizeError, Result};

/// Modal tool currently bound to canvas clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No tool active.
    #[default]
    Idle,
    /// Clicks place (primary) or delete (secondary) axis points.
    PlacingAxis,
    /// Clicks select an axis point.
    SelectingAxis,
    /// Clicks add (primary) or remove (secondary) curve points.
    AddingPoints,
}

/// Pointer shape the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    /// Default pointer.
    Arrow,
    /// Precise crosshair for axis placement.
    Crosshair,
    /// Pointing hand for selection.
    Hand,
    /// Pen for digitizing.
    Pencil,
}

/// Side effect the presentation layer applies after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiHint {
    /// Remove the highlight from every tool button.
    ClearHighlight,
    /// Highlight the button of this mode.
    Highlight(Mode),
    /// Change the pointer.
    Cursor(CursorShape),
}

/// Result of a toggle: the new mode and what the UI must update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Mode after the toggle.
    pub mode: Mode,
    /// Hints, in the order they should be applied.
    pub hints: Vec<UiHint>,
}

impl Mode {
    /// Toggle `target`.
    ///
    /// Re-toggling the active mode returns to `Idle`; any other target
    /// replaces the active mode. `AddingPoints` needs three placed axes.
    pub fn toggle(self, target: Mode, placed_axes: usize) -> Result<Transition> {
        let mode = if target == self { Mode::Idle } else { target };

        if mode == Mode::AddingPoints && placed_axes < REQUIRED_AXES {
            return Err(DigitizeError::InsufficientCalibration { axes: placed_axes });
        }

        let mut hints = vec![UiHint::ClearHighlight];
        if mode != Mode::Idle {
            hints.push(UiHint::Highlight(mode));
        }
        hints.push(UiHint::Cursor(mode.cursor()));
        Ok(Transition { mode, hints })
    }

    /// Pointer shape for this mode.
    pub fn cursor(self) -> CursorShape {
        match self {
            Mode::Idle => CursorShape::Arrow,
            Mode::PlacingAxis => CursorShape::Crosshair,
            Mode::SelectingAxis => CursorShape::Hand,
            Mode::AddingPoints => CursorShape::Pencil,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Idle => "Idle",
            Mode::PlacingAxis => "Place Axis",
            Mode::SelectingAxis => "Select Axis",
            Mode::AddingPoints => "Add Points",
        }
    }
}

impl CursorShape {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            CursorShape::Arrow => "Arrow",
            CursorShape::Crosshair => "Crosshair",
            CursorShape::Hand => "Hand",
            CursorShape::Pencil => "Pencil",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retoggle_returns_to_idle() {
        let t = Mode::Idle.toggle(Mode::PlacingAxis, 0).unwrap();
        assert_eq!(t.mode, Mode::PlacingAxis);
        let t = t.mode.toggle(Mode::PlacingAxis, 0).unwrap();
        assert_eq!(t.mode, Mode::Idle);
        assert_eq!(
            t.hints,
            vec![UiHint::ClearHighlight, UiHint::Cursor(CursorShape::Arrow)]
        );
    }

    #[test]
    fn switching_modes_clears_previous_first() {
        let t = Mode::PlacingAxis.toggle(Mode::SelectingAxis, 1).unwrap();
        assert_eq!(t.mode, Mode::SelectingAxis);
        assert_eq!(t.hints[0], UiHint::ClearHighlight);
        assert_eq!(t.hints[1], UiHint::Highlight(Mode::SelectingAxis));
    }

    #[test]
    fn adding_points_needs_three_axes() {
        assert!(matches!(
            Mode::Idle.toggle(Mode::AddingPoints, 2),
            Err(DigitizeError::InsufficientCalibration { axes: 2 })
        ));
        let t = Mode::Idle.toggle(Mode::AddingPoints, 3).unwrap();
        assert_eq!(t.mode, Mode::AddingPoints);
        assert!(t.hints.contains(&UiHint::Cursor(CursorShape::Pencil)));
    }

    #[test]
    fn leaving_adding_points_never_needs_axes() {
        let t = Mode::AddingPoints.toggle(Mode::AddingPoints, 0).unwrap();
        assert_eq!(t.mode, Mode::Idle);
    }
}
