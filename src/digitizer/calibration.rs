//! Axis calibration and the pixel to data-space transform.
//!
//! Three axis points pair an image pixel with a known data value. X values
//! are recovered with a min/max span ratio; Y values with an ordinary
//! least-squares line of value Y against pixel Y. Keep the two transforms
//! as they are; unifying them changes every exported value.

use super::geometry::Point;
use crate::error::{DigitizeError, Result};

/// Number of axis points a calibration needs.
pub const REQUIRED_AXES: usize = 3;

/// A calibration anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisPoint {
    /// Location on the image.
    pub pixel: Point,
    /// Known data value at that location.
    pub value: Point,
}

/// Degree-1 least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Slope of the line.
    pub slope: f64,
    /// Value at `x = 0`.
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a line through `(xs[i], ys[i])`.
    ///
    /// Fails with `DivideByZero` when every `x` is equal.
    pub fn least_squares(xs: &[f64], ys: &[f64]) -> Result<Self> {
        let n = xs.len().min(ys.len()) as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (x, y) in xs.iter().zip(ys) {
            sxx += (x - mean_x) * (x - mean_x);
            sxy += (x - mean_x) * (y - mean_y);
        }

        if sxx == 0.0 {
            return Err(DigitizeError::DivideByZero { axis: "Y pixel" });
        }

        let slope = sxy / sxx;
        Ok(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    /// Evaluate the line at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Transform derived from three complete axis points.
///
/// Never stored; rebuild it whenever the axes may have changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Smallest axis pixel X.
    pub x_origin: f64,
    /// Pixels per data unit along X.
    pub x_ratio: f64,
    /// Regression of value Y on pixel Y.
    pub y_fit: LinearFit,
}

impl Calibration {
    /// Derive the transform from exactly three axis points.
    pub fn from_axes(axes: &[AxisPoint]) -> Result<Self> {
        if axes.len() != REQUIRED_AXES {
            return Err(DigitizeError::CalibrationNotReady { axes: axes.len() });
        }

        let (px_min, px_max) = min_max(axes.iter().map(|a| a.pixel.x));
        let (vx_min, vx_max) = min_max(axes.iter().map(|a| a.value.x));

        let value_span = vx_max - vx_min;
        if value_span == 0.0 {
            return Err(DigitizeError::DivideByZero { axis: "X value" });
        }
        let x_ratio = (px_max - px_min) / value_span;
        if x_ratio == 0.0 {
            return Err(DigitizeError::DivideByZero { axis: "X pixel" });
        }

        let pixel_ys: Vec<f64> = axes.iter().map(|a| a.pixel.y).collect();
        let value_ys: Vec<f64> = axes.iter().map(|a| a.value.y).collect();
        let y_fit = LinearFit::least_squares(&pixel_ys, &value_ys)?;

        Ok(Self {
            x_origin: px_min,
            x_ratio,
            y_fit,
        })
    }

    /// Convert a pixel into data space.
    pub fn apply(&self, pixel: Point) -> Point {
        Point::new(
            (pixel.x - self.x_origin) / self.x_ratio,
            self.y_fit.eval(pixel.y),
        )
    }
}

/// Axis points plus an optional placement still waiting for its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationModel {
    axes: Vec<AxisPoint>,
    pending: Option<Point>,
}

impl CalibrationModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete axis points, in entry order.
    pub fn axes(&self) -> &[AxisPoint] {
        &self.axes
    }

    /// Placed pixel awaiting its value, if any.
    pub fn pending(&self) -> Option<Point> {
        self.pending
    }

    /// Placed axis count, including a pending placement.
    pub fn placed_count(&self) -> usize {
        self.axes.len() + usize::from(self.pending.is_some())
    }

    /// Axis count with values.
    pub fn value_count(&self) -> usize {
        self.axes.len()
    }

    /// True once three complete axes exist.
    pub fn is_complete(&self) -> bool {
        self.axes.len() == REQUIRED_AXES && self.pending.is_none()
    }

    /// First phase of the two-step entry: place a pixel.
    ///
    /// Returns the index the axis will have once its value is submitted.
    pub fn place_axis(&mut self, pixel: Point) -> Result<usize> {
        if self.pending.is_some() {
            return Err(DigitizeError::PendingValueEntry);
        }
        self.check_placement(pixel, None)?;
        self.pending = Some(pixel);
        Ok(self.axes.len())
    }

    /// Second phase: supply the data value for the pending placement.
    ///
    /// A collinear third value is rejected and the placement stays pending.
    pub fn submit_value(&mut self, value: Point) -> Result<usize> {
        let pixel = self.pending.ok_or(DigitizeError::NoPendingAxis)?;
        self.check_value(value)?;
        self.pending = None;
        self.axes.push(AxisPoint { pixel, value });
        Ok(self.axes.len() - 1)
    }

    /// Add a complete axis point in one step.
    pub fn add_axis_point(&mut self, pixel: Point, value: Point) -> Result<usize> {
        if self.pending.is_some() {
            return Err(DigitizeError::PendingValueEntry);
        }
        self.check_placement(pixel, None)?;
        self.check_value(value)?;
        self.axes.push(AxisPoint { pixel, value });
        Ok(self.axes.len() - 1)
    }

    /// Abandon a pending placement.
    pub fn cancel_pending(&mut self) -> Option<Point> {
        self.pending.take()
    }

    /// Remove a complete axis point.
    pub fn remove_axis_point(&mut self, index: usize) -> Result<AxisPoint> {
        if self.pending.is_some() {
            return Err(DigitizeError::PendingValueEntry);
        }
        if index >= self.axes.len() {
            return Err(DigitizeError::AxisNotFound { index });
        }
        Ok(self.axes.remove(index))
    }

    /// Move an axis: it is removed and its new pixel becomes pending.
    pub fn relocate_axis(&mut self, index: usize, pixel: Point) -> Result<usize> {
        if self.pending.is_some() {
            return Err(DigitizeError::PendingValueEntry);
        }
        if index >= self.axes.len() {
            return Err(DigitizeError::AxisNotFound { index });
        }
        self.check_placement(pixel, Some(index))?;
        self.axes.remove(index);
        self.pending = Some(pixel);
        Ok(self.axes.len())
    }

    /// Index of the first axis within `tolerance` of `pixel` on both axes.
    pub fn axis_near(&self, pixel: Point, tolerance: f64) -> Option<usize> {
        self.axes
            .iter()
            .position(|a| a.pixel.is_near(pixel, tolerance))
    }

    /// Build the current transform.
    pub fn calibration(&self) -> Result<Calibration> {
        if !self.is_complete() {
            return Err(DigitizeError::CalibrationNotReady {
                axes: self.axes.len(),
            });
        }
        Calibration::from_axes(&self.axes)
    }

    /// Convert a pixel into data space.
    pub fn to_data_space(&self, pixel: Point) -> Result<Point> {
        Ok(self.calibration()?.apply(pixel))
    }

    fn check_placement(&self, pixel: Point, replacing: Option<usize>) -> Result<()> {
        let remaining = self.placed_count() - usize::from(replacing.is_some());
        if remaining >= REQUIRED_AXES {
            return Err(DigitizeError::AxisLimitReached {
                max: REQUIRED_AXES,
            });
        }
        let clash = self
            .axes
            .iter()
            .enumerate()
            .any(|(i, a)| Some(i) != replacing && a.pixel == pixel);
        if clash || self.pending == Some(pixel) {
            return Err(DigitizeError::CoincidentAxisPoints {
                x: pixel.x,
                y: pixel.y,
            });
        }
        Ok(())
    }

    fn check_value(&self, value: Point) -> Result<()> {
        if !value.is_finite() {
            return Err(DigitizeError::invalid_number(format!(
                "{}, {}",
                value.x, value.y
            )));
        }
        if self.axes.len() + 1 == REQUIRED_AXES
            && is_collinear(self.axes[0].value, self.axes[1].value, value)
        {
            return Err(DigitizeError::DegenerateCalibration);
        }
        Ok(())
    }
}

/// Signed-area collinearity test.
pub fn is_collinear(a: Point, b: Point, c: Point) -> bool {
    a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y) == 0.0
}

/// Round for display in the data table; never yields negative zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
