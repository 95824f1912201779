//! Undo/redo history of whole-model snapshots.

use super::calibration::CalibrationModel;
use super::curves::CurveStore;

/// Everything an undo step restores.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Axis points, including a pending placement.
    pub calibration: CalibrationModel,
    /// Curves and the active curve.
    pub curves: CurveStore,
}

/// A snapshot and the action that replaced it.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Short description of the action, e.g. "Add point".
    pub label: String,
    /// State before the action (on the undo stack) or after it (on redo).
    pub snapshot: Snapshot,
}

/// Strict LIFO undo with a separate redo stack.
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state before a mutation. Clears the redo stack.
    pub fn record(&mut self, label: impl Into<String>, before: Snapshot) {
        self.undo.push(HistoryEntry {
            label: label.into(),
            snapshot: before,
        });
        self.redo.clear();
    }

    /// Step back: returns the label and the snapshot to restore.
    pub fn undo(&mut self, current: Snapshot) -> Option<(String, Snapshot)> {
        let entry = self.undo.pop()?;
        self.redo.push(HistoryEntry {
            label: entry.label.clone(),
            snapshot: current,
        });
        Some((entry.label, entry.snapshot))
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: Snapshot) -> Option<(String, Snapshot)> {
        let entry = self.redo.pop()?;
        self.undo.push(HistoryEntry {
            label: entry.label.clone(),
            snapshot: current,
        });
        Some((entry.label, entry.snapshot))
    }

    /// True when an undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// True when a redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Label of the action the next undo reverts.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo.last().map(|e| e.label.as_str())
    }

    /// Number of undo steps.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digitizer::geometry::Point;

    fn snap(points: usize) -> Snapshot {
        let mut curves = CurveStore::default();
        for i in 0..points {
            curves.add_point(1, Point::new(i as f64, 0.0)).unwrap();
        }
        Snapshot {
            calibration: CalibrationModel::new(),
            curves,
        }
    }

    #[test]
    fn undo_then_redo_swaps_states() {
        let mut history = History::new();
        history.record("Add point", snap(0));

        let (label, restored) = history.undo(snap(1)).unwrap();
        assert_eq!(label, "Add point");
        assert_eq!(restored, snap(0));
        assert!(history.can_redo());

        let (_, again) = history.redo(snap(0)).unwrap();
        assert_eq!(again, snap(1));
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn record_clears_redo() {
        let mut history = History::new();
        history.record("a", snap(0));
        history.undo(snap(1));
        history.record("b", snap(0));
        assert!(!history.can_redo());
        assert_eq!(history.undo_label(), Some("b"));
    }

    #[test]
    fn empty_history_returns_none() {
        let mut history = History::new();
        assert!(history.undo(snap(0)).is_none());
        assert!(history.redo(snap(0)).is_none());
    }
}
