//! Curvegrab - A terminal-based chart digitizer.
//!
//! Curvegrab turns points clicked on a chart image into data values. Three
//! reference points with known values calibrate the axes; curve points are
//! then converted and exported as a table.
//!
//! # Features
//!
//! - Three-point axis calibration with a collinearity guard
//! - Up to ten curves with interpolated display lines
//! - Undo/redo of every edit
//! - CSV export and clipboard copy
//! - Gruvbox color themes
//!
//! # Example
//!
//! ```
//! use curvegrab::digitizer::{Digitizer, Point};
//!
//! let mut session = Digitizer::default();
//! session.add_axis_point(Point::new(0.0, 100.0), Point::new(0.0, 0.0))?;
//! session.add_axis_point(Point::new(100.0, 100.0), Point::new(10.0, 0.0))?;
//! session.add_axis_point(Point::new(0.0, 0.0), Point::new(0.0, 10.0))?;
//! session.add_point(Point::new(50.0, 100.0))?;
//!
//! let rows = session.calculate_all()?;
//! assert_eq!((rows[0].x, rows[0].y), (5.0, 0.0));
//! # Ok::<(), curvegrab::DigitizeError>(())
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod digitizer;
pub mod error;
pub mod export;
pub mod input;
pub mod ui;

pub use error::{DigitizeError, Result};
