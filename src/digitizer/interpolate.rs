//! Display lines for digitized curves.
//!
//! Points are sorted by X, split at the first near-vertical step, and each
//! run is either joined with straight segments or sampled from a quadratic
//! interpolating B-spline.

use ndarray::{Array1, Array2};

use super::geometry::{Point, Segment};
use crate::config::DigitizerConfig;
use crate::error::{DigitizeError, Result};

/// Spline degree.
const DEGREE: usize = 2;

/// Pivot magnitude below which the collocation matrix counts as singular.
const PIVOT_EPSILON: f64 = 1e-12;

/// Drawable line of one curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveLine {
    /// Solid segments of every run.
    pub segments: Vec<Segment>,
    /// Dashed link across a run break.
    pub connector: Option<Segment>,
}

/// Build the display line for a curve's points.
pub fn curve_line(points: &[Point], config: &DigitizerConfig) -> Result<CurveLine> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    if sorted.len() < config.spline_min_points {
        return Ok(CurveLine {
            segments: polyline(&sorted),
            connector: None,
        });
    }

    let (first, second) = split_at_run_break(&sorted, config.run_break_gap);
    let mut line = CurveLine {
        segments: run_segments(first, config)?,
        connector: None,
    };

    if let Some(second) = second {
        line.segments.extend(run_segments(second, config)?);
        if let (Some(&last), Some(&next)) = (first.last(), second.first()) {
            line.connector = Some(Segment::new(last, next));
        }
    }
    Ok(line)
}

/// Split sorted points after the first adjacent pair whose X gap is within `gap`.
pub fn split_at_run_break(sorted: &[Point], gap: f64) -> (&[Point], Option<&[Point]>) {
    match sorted.windows(2).position(|w| (w[1].x - w[0].x) <= gap) {
        Some(i) => {
            let (first, second) = sorted.split_at(i + 1);
            (first, Some(second))
        },
        None => (sorted, None),
    }
}

fn run_segments(run: &[Point], config: &DigitizerConfig) -> Result<Vec<Segment>> {
    if run.len() < config.spline_min_points {
        return Ok(polyline(run));
    }
    let xs: Vec<f64> = run.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = run.iter().map(|p| p.y).collect();
    let spline = QuadraticSpline::fit(&xs, &ys)?;
    Ok(polyline(&spline.sample(config.spline_samples)?))
}

fn polyline(points: &[Point]) -> Vec<Segment> {
    points
        .windows(2)
        .map(|w| Segment::new(w[0], w[1]))
        .collect()
}

/// Quadratic B-spline through a set of points.
///
/// Interior knots sit at the midpoints between data abscissae with clamped
/// ends, giving one basis function per data point.
#[derive(Debug, Clone)]
pub struct QuadraticSpline {
    knots: Vec<f64>,
    coeffs: Vec<f64>,
}

impl QuadraticSpline {
    /// Fit the interpolating spline.
    ///
    /// `xs` must be strictly increasing and hold at least three values.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        let n = xs.len();
        if n != ys.len() {
            return Err(DigitizeError::interpolation("x and y lengths differ"));
        }
        if n < DEGREE + 1 {
            return Err(DigitizeError::interpolation(format!(
                "need at least {} points, got {}",
                DEGREE + 1,
                n
            )));
        }
        if xs.iter().chain(ys).any(|v| !v.is_finite()) {
            return Err(DigitizeError::interpolation("non-finite input"));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DigitizeError::interpolation(
                "x values must be strictly increasing",
            ));
        }

        let mut knots = Vec::with_capacity(n + DEGREE + 1);
        knots.extend([xs[0]; DEGREE + 1]);
        knots.extend((1..n - DEGREE).map(|i| (xs[i] + xs[i + 1]) / 2.0));
        knots.extend([xs[n - 1]; DEGREE + 1]);

        let mut matrix = Array2::<f64>::zeros((n, n));
        for (row, &x) in xs.iter().enumerate() {
            let span = find_span(&knots, n, x);
            let basis = basis_functions(&knots, span, x);
            for (r, value) in basis.iter().enumerate() {
                matrix[[row, span - DEGREE + r]] = *value;
            }
        }

        let coeffs = solve(matrix, Array1::from(ys.to_vec()))?;
        Ok(Self { knots, coeffs })
    }

    /// Evaluate the spline at `x`; `x` is clamped to the fitted range.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.coeffs.len();
        let x = x.clamp(self.knots[0], self.knots[n]);
        let span = find_span(&self.knots, n, x);
        basis_functions(&self.knots, span, x)
            .iter()
            .enumerate()
            .map(|(r, b)| b * self.coeffs[span - DEGREE + r])
            .sum()
    }

    /// `count` evenly spaced samples across the fitted range, ends included.
    pub fn sample(&self, count: usize) -> Result<Vec<Point>> {
        let n = self.coeffs.len();
        let (lo, hi) = (self.knots[0], self.knots[n]);
        let step = if count > 1 {
            (hi - lo) / (count - 1) as f64
        } else {
            0.0
        };

        let samples: Vec<Point> = (0..count)
            .map(|i| {
                let x = if i + 1 == count { hi } else { lo + step * i as f64 };
                Point::new(x, self.evaluate(x))
            })
            .collect();

        if samples.iter().any(|p| !p.is_finite()) {
            return Err(DigitizeError::interpolation("non-finite sample"));
        }
        Ok(samples)
    }
}

/// Knot span index `l` with `knots[l] <= x < knots[l + 1]`, `DEGREE <= l < n`.
fn find_span(knots: &[f64], n: usize, x: f64) -> usize {
    if x >= knots[n] {
        return n - 1;
    }
    (DEGREE..n)
        .rev()
        .find(|&l| knots[l] <= x)
        .unwrap_or(DEGREE)
}

/// Non-zero basis values `B[span - DEGREE ..= span]` at `x` (Cox-de Boor).
fn basis_functions(knots: &[f64], span: usize, x: f64) -> [f64; DEGREE + 1] {
    let mut n = [0.0; DEGREE + 1];
    let mut left = [0.0; DEGREE + 1];
    let mut right = [0.0; DEGREE + 1];
    n[0] = 1.0;

    for j in 1..=DEGREE {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

/// Gaussian elimination with partial pivoting.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))
            .unwrap_or(col);
        if a[[pivot, col]].abs() < PIVOT_EPSILON {
            return Err(DigitizeError::interpolation("singular collocation matrix"));
        }
        if pivot != col {
            for k in 0..n {
                a.swap([col, k], [pivot, k]);
            }
            b.swap(col, pivot);
        }

        for row in col + 1..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[[row, k]] * x[k]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }

    if x.iter().any(|v| !v.is_finite()) {
        return Err(DigitizeError::interpolation("non-finite coefficients"));
    }
    Ok(x)
}
