//! Error types for Curvegrab.
//!
//! This module provides a unified error handling approach using `thiserror`.
//! Every variant is recoverable: a rejected operation leaves the session
//! exactly as it was before the call.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Curvegrab operations.
pub type Result<T> = std::result::Result<T, DigitizeError>;

/// Broad category of a [`DigitizeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input or a precondition that does not hold.
    Validation,
    /// A transform that would divide by zero.
    Arithmetic,
    /// Spline fitting failed; rendering falls back.
    Interpolation,
    /// File or clipboard failure in the presentation layer.
    Io,
}

/// Errors that can occur in Curvegrab.
#[derive(Debug, Error)]
pub enum DigitizeError {
    /// A fourth axis point was requested.
    ///
    /// Also reported under the name `IncompleteCalibration`.
    #[doc(alias = "IncompleteCalibration")]
    #[error("Only {max} axis points can be placed")]
    AxisLimitReached { max: usize },

    /// The three calibration values lie on one line.
    #[error("Axis values are collinear; choose a different value")]
    DegenerateCalibration,

    /// Two axis points would share a pixel.
    #[error("An axis point already exists at ({x}, {y})")]
    CoincidentAxisPoints { x: f64, y: f64 },

    /// A placed axis is still waiting for its value.
    #[error("Enter the value for the previous axis first")]
    PendingValueEntry,

    /// No value entry is outstanding.
    #[error("No axis is waiting for a value")]
    NoPendingAxis,

    /// Pixel to data conversion needs exactly three complete axes.
    #[error("Calibration not ready: {axes} of 3 axis points set")]
    CalibrationNotReady { axes: usize },

    /// Calculation needs three axes with three values.
    #[error("Calibration incomplete: {axes} axes, {values} values (3 of each required)")]
    CalibrationIncomplete { axes: usize, values: usize },

    /// A transform span was zero.
    #[error("Division by zero: {axis} span of the calibration is zero")]
    DivideByZero { axis: &'static str },

    /// Digitizing requires a complete set of axes.
    #[error("Add at least 3 axis points first ({axes} placed)")]
    InsufficientCalibration { axes: usize },

    /// Curve store is full.
    #[error("Cannot add more than {max} curves")]
    CurveLimitReached { max: usize },

    /// The only remaining curve cannot be deleted.
    #[error("Cannot delete the last curve")]
    LastCurveProtected,

    /// No curve with this ID.
    #[error("Curve not found: {id}")]
    CurveNotFound { id: usize },

    /// No axis at this index.
    #[error("Axis not found: {index}")]
    AxisNotFound { index: usize },

    /// No axis is selected.
    #[error("Select an axis first")]
    NoAxisSelected,

    /// Curve style outside the allowed range.
    #[error("Invalid curve style: {0}")]
    InvalidStyle(String),

    /// Value text could not be parsed.
    #[error("Invalid number: '{input}' (expected \"x, y\")")]
    InvalidNumber { input: String },

    /// Spline fit failed for a curve.
    #[error("Interpolation failed: {0}")]
    InterpolationFailed(String),

    /// Undo stack is empty.
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Redo stack is empty.
    #[error("Nothing to redo")]
    NothingToRedo,

    /// Failed to write an export file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode or write CSV records.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DigitizeError {
    /// Create a FileWrite error.
    pub fn file_write(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileWrite { path, source }
    }

    /// Create an InvalidNumber error.
    pub fn invalid_number(input: impl Into<String>) -> Self {
        Self::InvalidNumber {
            input: input.into(),
        }
    }

    /// Create an InterpolationFailed error.
    pub fn interpolation(reason: impl Into<String>) -> Self {
        Self::InterpolationFailed(reason.into())
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DivideByZero { .. } => ErrorKind::Arithmetic,
            Self::InterpolationFailed(_) => ErrorKind::Interpolation,
            Self::FileWrite { .. } | Self::Csv(_) | Self::Clipboard(_) | Self::Io(_) => {
                ErrorKind::Io
            },
            _ => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            DigitizeError::DivideByZero { axis: "X" }.kind(),
            ErrorKind::Arithmetic
        );
        assert_eq!(
            DigitizeError::interpolation("singular").kind(),
            ErrorKind::Interpolation
        );
        assert_eq!(DigitizeError::LastCurveProtected.kind(), ErrorKind::Validation);
        assert_eq!(
            DigitizeError::DegenerateCalibration.kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn messages_name_the_problem() {
        let err = DigitizeError::invalid_number("abc");
        assert!(err.to_string().contains("abc"));
        let err = DigitizeError::CurveLimitReached { max: 10 };
        assert!(err.to_string().contains("10"));
    }
}
