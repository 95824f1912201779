//! Digitizer core - calibration, curve editing and data conversion.
//!
//! This module owns the whole editable model of a session and exposes the
//! narrow interface the presentation layer talks to: pixel clicks in,
//! [`Effect`]s out, plus a read-only [`RenderModel`] and the export table.
//! Nothing here depends on the terminal toolkit.

pub mod calibration;
pub mod curves;
pub mod geometry;
pub mod history;
pub mod interpolate;
pub mod mode;

use tracing::{debug, info, warn};

use crate::config::DigitizerConfig;
use crate::error::{DigitizeError, Result};

pub use calibration::{round_to, AxisPoint, Calibration, CalibrationModel, REQUIRED_AXES};
pub use curves::{Curve, CurveStore, CurveStyle};
pub use geometry::{Point, Segment};
pub use history::{History, Snapshot};
pub use mode::{CursorShape, Mode, Transition, UiHint};

/// Which button produced a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    /// Left button / confirm key.
    Primary,
    /// Right button / delete key.
    Secondary,
}

/// Outcome of a canvas click.
#[derive(Debug)]
pub enum Effect {
    /// An axis was placed; its value must be entered next.
    AxisPlaced {
        /// Index the axis gets once its value is in.
        index: usize,
    },
    /// An axis point was deleted.
    AxisRemoved {
        /// Former index.
        index: usize,
    },
    /// An axis point was selected.
    AxisSelected {
        /// Selected index.
        index: usize,
    },
    /// A point was appended to a curve.
    PointAdded {
        /// Curve ID.
        curve: usize,
        /// Index within the curve.
        index: usize,
    },
    /// A point was removed from a curve.
    PointRemoved {
        /// Curve ID.
        curve: usize,
        /// Former index within the curve.
        index: usize,
    },
    /// Nothing happened.
    NoOp,
    /// The click was refused; the model is unchanged.
    Rejected(DigitizeError),
}

/// One row of the data table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Curve ID.
    pub curve_id: usize,
    /// Curve display name.
    pub curve_name: String,
    /// 1-based index of the point within its curve.
    pub point_index: usize,
    /// Data X, rounded for display.
    pub x: f64,
    /// Data Y, rounded for display.
    pub y: f64,
}

/// Axis marker for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisMarker {
    /// Axis index.
    pub index: usize,
    /// Pixel location.
    pub pixel: Point,
    /// Data value.
    pub value: Point,
    /// True for the selected axis.
    pub selected: bool,
}

/// Everything needed to draw one curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveRender {
    /// Curve ID.
    pub id: usize,
    /// Display name.
    pub name: String,
    /// Drawing style.
    pub style: CurveStyle,
    /// True for the active curve.
    pub active: bool,
    /// Digitized points in digitizing order.
    pub points: Vec<Point>,
    /// Interpolated line segments.
    pub segments: Vec<Segment>,
    /// Dashed run-break connector.
    pub connector: Option<Segment>,
    /// Why the line is missing, if spline fitting failed.
    pub failure: Option<String>,
}

/// Read-only projection of the model for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    /// Active tool.
    pub mode: Mode,
    /// Complete axis points.
    pub axes: Vec<AxisMarker>,
    /// Placed axis still waiting for its value.
    pub pending_axis: Option<Point>,
    /// Curves in ID order.
    pub curves: Vec<CurveRender>,
}

/// Session model: calibration, curves, history and interaction mode.
#[derive(Debug)]
pub struct Digitizer {
    config: DigitizerConfig,
    calibration: CalibrationModel,
    curves: CurveStore,
    history: History,
    mode: Mode,
    selected_axis: Option<usize>,
}

impl Default for Digitizer {
    fn default() -> Self {
        Self::new(DigitizerConfig::default())
    }
}

impl Digitizer {
    /// Create an empty session.
    pub fn new(config: DigitizerConfig) -> Self {
        let curves = CurveStore::new(config.max_curves);
        Self {
            config,
            calibration: CalibrationModel::new(),
            curves,
            history: History::new(),
            mode: Mode::Idle,
            selected_axis: None,
        }
    }

    /// Core configuration.
    pub fn config(&self) -> &DigitizerConfig {
        &self.config
    }

    /// Calibration model.
    pub fn calibration(&self) -> &CalibrationModel {
        &self.calibration
    }

    /// Curve store.
    pub fn curves(&self) -> &CurveStore {
        &self.curves
    }

    /// Active tool.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Selected axis index.
    pub fn selected_axis(&self) -> Option<usize> {
        self.selected_axis
    }

    /// Placed axis waiting for its value.
    pub fn pending_axis(&self) -> Option<Point> {
        self.calibration.pending()
    }

    /// Undo/redo stacks.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// True when an undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// True when a redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Current model state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            calibration: self.calibration.clone(),
            curves: self.curves.clone(),
        }
    }

    /// Run a mutation; on success record the prior state under `label`.
    fn commit<T>(&mut self, label: &str, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let before = self.snapshot();
        let out = op(self)?;
        self.history.record(label, before);
        debug!(action = label, "Recorded history entry");
        Ok(out)
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.calibration = snapshot.calibration;
        self.curves = snapshot.curves;
        self.selected_axis = None;
    }

    // ----- modes -----

    /// Toggle an interaction mode.
    pub fn toggle_mode(&mut self, target: Mode) -> Result<Transition> {
        let transition = self
            .mode
            .toggle(target, self.calibration.placed_count())?;
        debug!(from = ?self.mode, to = ?transition.mode, "Mode changed");
        self.mode = transition.mode;
        Ok(transition)
    }

    /// Leave any active mode.
    pub fn set_idle(&mut self) -> Transition {
        let transition = Transition {
            mode: Mode::Idle,
            hints: vec![UiHint::ClearHighlight, UiHint::Cursor(CursorShape::Arrow)],
        };
        self.mode = Mode::Idle;
        transition
    }

    /// Dispatch a canvas click according to the active mode.
    pub fn on_pixel_click(&mut self, click: Click, pixel: Point) -> Effect {
        let outcome = match (self.mode, click) {
            (Mode::Idle, _) => Ok(Effect::NoOp),
            (Mode::PlacingAxis, Click::Primary) => self
                .place_axis(pixel)
                .map(|index| Effect::AxisPlaced { index }),
            (Mode::PlacingAxis, Click::Secondary) => self.remove_axis_at(pixel),
            (Mode::SelectingAxis, _) => Ok(self
                .select_axis_at(pixel)
                .map_or(Effect::NoOp, |index| Effect::AxisSelected { index })),
            (Mode::AddingPoints, Click::Primary) => self.add_point(pixel).map(|index| {
                Effect::PointAdded {
                    curve: self.curves.current_id(),
                    index,
                }
            }),
            (Mode::AddingPoints, Click::Secondary) => {
                let curve = self.curves.current_id();
                self.remove_point(pixel).map(|removed| match removed {
                    Some(index) => Effect::PointRemoved { curve, index },
                    None => Effect::NoOp,
                })
            },
        };

        outcome.unwrap_or_else(|err| {
            warn!(mode = ?self.mode, "Click rejected: {}", err);
            Effect::Rejected(err)
        })
    }

    // ----- axes -----

    /// Place an axis pixel; its value must follow.
    pub fn place_axis(&mut self, pixel: Point) -> Result<usize> {
        let index = self.commit("Place axis", |d| d.calibration.place_axis(pixel))?;
        info!(index, x = pixel.x, y = pixel.y, "Axis placed");
        Ok(index)
    }

    /// Parse `"x, y"` and submit it as the pending axis value.
    pub fn on_value_submitted(&mut self, text: &str) -> Result<usize> {
        let value = parse_value(text)?;
        self.submit_value(value)
    }

    /// Submit the pending axis value.
    pub fn submit_value(&mut self, value: Point) -> Result<usize> {
        let index = self.commit("Set axis value", |d| d.calibration.submit_value(value))?;
        info!(index, x = value.x, y = value.y, "Axis value set");
        Ok(index)
    }

    /// Place an axis and give it a value in one step.
    pub fn add_axis_point(&mut self, pixel: Point, value: Point) -> Result<usize> {
        self.commit("Add axis", |d| d.calibration.add_axis_point(pixel, value))
    }

    /// Abandon the pending axis placement.
    pub fn cancel_pending(&mut self) -> Result<()> {
        self.commit("Cancel axis", |d| {
            d.calibration
                .cancel_pending()
                .map(|_| ())
                .ok_or(DigitizeError::NoPendingAxis)
        })
    }

    /// Delete an axis point by index.
    pub fn remove_axis_point(&mut self, index: usize) -> Result<AxisPoint> {
        let removed = self.commit("Delete axis", |d| d.calibration.remove_axis_point(index))?;
        self.selected_axis = None;
        info!(index, "Axis deleted");
        Ok(removed)
    }

    fn remove_axis_at(&mut self, pixel: Point) -> Result<Effect> {
        if self.calibration.pending().is_some() {
            return Err(DigitizeError::PendingValueEntry);
        }
        match self
            .calibration
            .axis_near(pixel, self.config.axis_tolerance)
        {
            Some(index) => {
                self.remove_axis_point(index)?;
                Ok(Effect::AxisRemoved { index })
            },
            None => Ok(Effect::NoOp),
        }
    }

    /// Select the axis near `pixel`; keeps the previous selection on a miss.
    pub fn select_axis_at(&mut self, pixel: Point) -> Option<usize> {
        let index = self
            .calibration
            .axis_near(pixel, self.config.axis_tolerance)?;
        self.selected_axis = Some(index);
        debug!(index, "Axis selected");
        Some(index)
    }

    /// Move the selected axis to `pixel`; its value must be entered again.
    pub fn relocate_selected_axis(&mut self, pixel: Point) -> Result<usize> {
        let index = self.selected_axis.ok_or(DigitizeError::NoAxisSelected)?;
        let pending = self.commit("Set axis", |d| d.calibration.relocate_axis(index, pixel))?;
        self.selected_axis = None;
        info!(index, x = pixel.x, y = pixel.y, "Axis relocated");
        Ok(pending)
    }

    /// Convert a pixel into data space.
    pub fn to_data_space(&self, pixel: Point) -> Result<Point> {
        self.calibration.to_data_space(pixel)
    }

    // ----- points -----

    fn require_axes(&self) -> Result<()> {
        let axes = self.calibration.placed_count();
        if axes < REQUIRED_AXES {
            return Err(DigitizeError::InsufficientCalibration { axes });
        }
        Ok(())
    }

    /// Append a point to the active curve.
    pub fn add_point(&mut self, pixel: Point) -> Result<usize> {
        self.add_point_to(self.curves.current_id(), pixel)
    }

    /// Append a point to a curve.
    pub fn add_point_to(&mut self, curve: usize, pixel: Point) -> Result<usize> {
        self.require_axes()?;
        let index = self.commit("Add point", |d| d.curves.add_point(curve, pixel))?;
        debug!(curve, index, x = pixel.x, y = pixel.y, "Point added");
        Ok(index)
    }

    /// Remove the active curve's point near `pixel`; `None` when nothing is near.
    pub fn remove_point(&mut self, pixel: Point) -> Result<Option<usize>> {
        self.remove_point_from(self.curves.current_id(), pixel)
    }

    /// Remove a curve's point near `pixel`; `None` when nothing is near.
    pub fn remove_point_from(&mut self, curve: usize, pixel: Point) -> Result<Option<usize>> {
        let tolerance = self.config.point_tolerance;
        self.curves.get(curve)?;
        if self.curves.point_near(curve, pixel, tolerance).is_none() {
            return Ok(None);
        }
        let removed = self.commit("Delete point", |d| {
            d.curves.remove_point(curve, pixel, tolerance)
        })?;
        Ok(removed.map(|(index, _)| index))
    }

    // ----- curves -----

    /// Add an empty curve and make it active.
    pub fn add_curve(&mut self) -> Result<usize> {
        let id = self.commit("Add curve", |d| {
            let id = d.curves.add_curve()?;
            d.curves.switch_current(id)?;
            Ok(id)
        })?;
        info!(id, "Curve added");
        Ok(id)
    }

    /// Delete a curve; higher IDs shift down.
    pub fn delete_curve(&mut self, id: usize) -> Result<Curve> {
        let removed = self.commit("Delete curve", |d| d.curves.delete_curve(id))?;
        info!(id, name = %removed.name, "Curve deleted");
        Ok(removed)
    }

    /// Delete the active curve.
    pub fn delete_current_curve(&mut self) -> Result<Curve> {
        self.delete_curve(self.curves.current_id())
    }

    /// Make a curve active.
    pub fn switch_curve(&mut self, id: usize) -> Result<()> {
        self.curves.switch_current(id)
    }

    /// Activate the next curve.
    pub fn next_curve(&mut self) -> usize {
        self.curves.next_curve()
    }

    /// Rename a curve.
    pub fn rename_curve(&mut self, id: usize, name: &str) -> Result<()> {
        self.commit("Rename curve", |d| d.curves.rename_curve(id, name))
    }

    /// Change a curve's drawing style.
    pub fn set_curve_style(&mut self, id: usize, style: CurveStyle) -> Result<()> {
        self.commit("Curve style", |d| d.curves.set_style(id, style))
    }

    // ----- history -----

    /// Revert the last mutation; returns its label.
    pub fn undo(&mut self) -> Result<String> {
        let (label, snapshot) = self
            .history
            .undo(self.snapshot())
            .ok_or(DigitizeError::NothingToUndo)?;
        self.restore(snapshot);
        info!(action = %label, "Undo");
        Ok(label)
    }

    /// Re-apply the last undone mutation; returns its label.
    pub fn redo(&mut self) -> Result<String> {
        let (label, snapshot) = self
            .history
            .redo(self.snapshot())
            .ok_or(DigitizeError::NothingToRedo)?;
        self.restore(snapshot);
        info!(action = %label, "Redo");
        Ok(label)
    }

    // ----- outputs -----

    /// Convert every point of every curve into rounded data values.
    pub fn calculate_all(&self) -> Result<Vec<TableRow>> {
        let axes = self.calibration.placed_count();
        let values = self.calibration.value_count();
        if axes != REQUIRED_AXES || values != REQUIRED_AXES {
            return Err(DigitizeError::CalibrationIncomplete { axes, values });
        }

        let calibration = self.calibration.calibration()?;
        let decimals = self.config.display_decimals;

        let rows: Vec<TableRow> = self
            .curves
            .curves()
            .iter()
            .filter(|curve| !curve.points.is_empty())
            .flat_map(|curve| {
                curve.points.iter().enumerate().map(move |(i, &pixel)| {
                    let data = calibration.apply(pixel);
                    TableRow {
                        curve_id: curve.id,
                        curve_name: curve.name.clone(),
                        point_index: i + 1,
                        x: round_to(data.x, decimals),
                        y: round_to(data.y, decimals),
                    }
                })
            })
            .collect();

        info!(rows = rows.len(), "Calculated data values");
        Ok(rows)
    }

    /// Rows for an external writer; same as [`Digitizer::calculate_all`].
    pub fn export_table(&self) -> Result<Vec<TableRow>> {
        self.calculate_all()
    }

    /// Read-only projection for drawing.
    pub fn render_model(&self) -> RenderModel {
        let axes = self
            .calibration
            .axes()
            .iter()
            .enumerate()
            .map(|(index, axis)| AxisMarker {
                index,
                pixel: axis.pixel,
                value: axis.value,
                selected: self.selected_axis == Some(index),
            })
            .collect();

        let current = self.curves.current_id();
        let curves = self
            .curves
            .curves()
            .iter()
            .map(|curve| {
                let mut render = CurveRender {
                    id: curve.id,
                    name: curve.name.clone(),
                    style: curve.style,
                    active: curve.id == current,
                    points: curve.points.clone(),
                    segments: Vec::new(),
                    connector: None,
                    failure: None,
                };
                match interpolate::curve_line(&curve.points, &self.config) {
                    Ok(line) => {
                        render.segments = line.segments;
                        render.connector = line.connector;
                    },
                    Err(err) => {
                        debug!(curve = curve.id, "Line omitted: {}", err);
                        render.failure = Some(err.to_string());
                    },
                }
                render
            })
            .collect();

        RenderModel {
            mode: self.mode,
            axes,
            pending_axis: self.calibration.pending(),
            curves,
        }
    }
}

/// Parse a value pair written as `"x, y"` or `"x y"`.
pub fn parse_value(text: &str) -> Result<Point> {
    let parts: Vec<&str> = text
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    let &[x, y] = parts.as_slice() else {
        return Err(DigitizeError::invalid_number(text.trim()));
    };
    let parse = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DigitizeError::invalid_number(text.trim()))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}
