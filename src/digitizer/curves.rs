//! Curve storage: digitized pixel points grouped into numbered curves.

use super::geometry::Point;
use crate::error::{DigitizeError, Result};

/// Line colors handed out by curve ID.
const PALETTE: [(u8, u8, u8); 10] = [
    (31, 119, 180),
    (255, 127, 14),
    (44, 160, 44),
    (214, 39, 40),
    (148, 103, 189),
    (140, 86, 75),
    (227, 119, 194),
    (127, 127, 127),
    (188, 189, 34),
    (23, 190, 207),
];

/// Drawing style of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveStyle {
    /// RGB line and marker color.
    pub color: (u8, u8, u8),
    /// Line width, 1..=3.
    pub width: u8,
}

impl CurveStyle {
    /// Thinnest allowed line.
    pub const MIN_WIDTH: u8 = 1;
    /// Thickest allowed line.
    pub const MAX_WIDTH: u8 = 3;

    /// Default style for a curve ID.
    pub fn for_id(id: usize) -> Self {
        Self {
            color: PALETTE[(id.saturating_sub(1)) % PALETTE.len()],
            width: Self::MIN_WIDTH,
        }
    }

    /// Same style with the next line width, wrapping 3 back to 1.
    pub fn next_width(self) -> Self {
        let width = if self.width >= Self::MAX_WIDTH {
            Self::MIN_WIDTH
        } else {
            self.width + 1
        };
        Self { width, ..self }
    }
}

/// One data series.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Position-based ID, contiguous from 1.
    pub id: usize,
    /// Display name.
    pub name: String,
    /// Pixel points in digitizing order.
    pub points: Vec<Point>,
    /// Drawing style.
    pub style: CurveStyle,
}

impl Curve {
    fn new(id: usize) -> Self {
        Self {
            id,
            name: format!("Curve{}", id),
            points: Vec::new(),
            style: CurveStyle::for_id(id),
        }
    }
}

/// All curves plus the active one.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveStore {
    curves: Vec<Curve>,
    current: usize,
    max_curves: usize,
}

impl CurveStore {
    /// Create a store holding a single empty curve.
    pub fn new(max_curves: usize) -> Self {
        Self {
            curves: vec![Curve::new(1)],
            current: 1,
            max_curves: max_curves.max(1),
        }
    }

    /// All curves in ID order.
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// Number of curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Always false; a store keeps at least one curve.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Total number of points across curves.
    pub fn total_points(&self) -> usize {
        self.curves.iter().map(|c| c.points.len()).sum()
    }

    /// ID of the active curve.
    pub fn current_id(&self) -> usize {
        self.current
    }

    /// The active curve.
    pub fn current(&self) -> &Curve {
        &self.curves[self.current - 1]
    }

    /// Look up a curve.
    pub fn get(&self, id: usize) -> Result<&Curve> {
        id.checked_sub(1)
            .and_then(|i| self.curves.get(i))
            .ok_or(DigitizeError::CurveNotFound { id })
    }

    fn get_mut(&mut self, id: usize) -> Result<&mut Curve> {
        id.checked_sub(1)
            .and_then(|i| self.curves.get_mut(i))
            .ok_or(DigitizeError::CurveNotFound { id })
    }

    /// Append a point; returns its index within the curve.
    pub fn add_point(&mut self, id: usize, pixel: Point) -> Result<usize> {
        let curve = self.get_mut(id)?;
        curve.points.push(pixel);
        Ok(curve.points.len() - 1)
    }

    /// Remove the first point within `tolerance` of `pixel`.
    ///
    /// Returns `None` without error when nothing matches.
    pub fn remove_point(
        &mut self,
        id: usize,
        pixel: Point,
        tolerance: f64,
    ) -> Result<Option<(usize, Point)>> {
        let curve = self.get_mut(id)?;
        let Some(index) = curve.points.iter().position(|p| p.is_near(pixel, tolerance)) else {
            return Ok(None);
        };
        Ok(Some((index, curve.points.remove(index))))
    }

    /// Index of the first point within `tolerance` of `pixel`.
    pub fn point_near(&self, id: usize, pixel: Point, tolerance: f64) -> Option<usize> {
        self.get(id)
            .ok()?
            .points
            .iter()
            .position(|p| p.is_near(pixel, tolerance))
    }

    /// Append an empty curve; returns its ID.
    pub fn add_curve(&mut self) -> Result<usize> {
        if self.curves.len() >= self.max_curves {
            return Err(DigitizeError::CurveLimitReached {
                max: self.max_curves,
            });
        }
        let id = self.curves.len() + 1;
        self.curves.push(Curve::new(id));
        Ok(id)
    }

    /// Delete a curve and shift higher IDs down by one.
    pub fn delete_curve(&mut self, id: usize) -> Result<Curve> {
        self.get(id)?;
        if self.curves.len() == 1 {
            return Err(DigitizeError::LastCurveProtected);
        }

        let removed = self.curves.remove(id - 1);
        for curve in self.curves.iter_mut().skip(id - 1) {
            curve.id -= 1;
        }

        if self.current > id {
            self.current -= 1;
        } else if self.current == id {
            self.current = id.min(self.curves.len());
        }
        Ok(removed)
    }

    /// Make a curve the target of point edits.
    pub fn switch_current(&mut self, id: usize) -> Result<()> {
        self.get(id)?;
        self.current = id;
        Ok(())
    }

    /// Activate the next curve, wrapping to the first; returns its ID.
    pub fn next_curve(&mut self) -> usize {
        self.current = self.current % self.curves.len() + 1;
        self.current
    }

    /// Rename a curve.
    pub fn rename_curve(&mut self, id: usize, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DigitizeError::InvalidStyle("curve name is empty".to_string()));
        }
        self.get_mut(id)?.name = name;
        Ok(())
    }

    /// Change a curve's drawing style.
    pub fn set_style(&mut self, id: usize, style: CurveStyle) -> Result<()> {
        if !(CurveStyle::MIN_WIDTH..=CurveStyle::MAX_WIDTH).contains(&style.width) {
            return Err(DigitizeError::InvalidStyle(format!(
                "width {} outside {}..={}",
                style.width,
                CurveStyle::MIN_WIDTH,
                CurveStyle::MAX_WIDTH
            )));
        }
        self.get_mut(id)?.style = style;
        Ok(())
    }
}

impl Default for CurveStore {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(n: usize) -> CurveStore {
        let mut store = CurveStore::default();
        for _ in 1..n {
            store.add_curve().unwrap();
        }
        store
    }

    #[test]
    fn delete_renumbers_higher_ids() {
        let mut store = store_with(4);
        for id in 1..=4 {
            store.add_point(id, Point::new(id as f64, 0.0)).unwrap();
        }

        let removed = store.delete_curve(2).unwrap();
        assert_eq!(removed.name, "Curve2");

        let ids: Vec<usize> = store.curves().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.get(2).unwrap().name, "Curve3");
        assert_eq!(store.get(2).unwrap().points[0].x, 3.0);
        assert_eq!(store.get(3).unwrap().points[0].x, 4.0);
    }

    #[test]
    fn last_curve_is_protected() {
        let mut store = CurveStore::default();
        assert!(matches!(
            store.delete_curve(1),
            Err(DigitizeError::LastCurveProtected)
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn curve_limit() {
        let mut store = store_with(10);
        assert!(matches!(
            store.add_curve(),
            Err(DigitizeError::CurveLimitReached { max: 10 })
        ));
    }

    #[test]
    fn active_curve_follows_renumbering() {
        let mut store = store_with(4);
        store.switch_current(4).unwrap();
        store.delete_curve(2).unwrap();
        assert_eq!(store.current_id(), 3);
        assert_eq!(store.current().name, "Curve4");

        store.delete_curve(3).unwrap();
        assert_eq!(store.current_id(), 2);
    }

    #[test]
    fn remove_point_is_noop_when_nothing_near() {
        let mut store = CurveStore::default();
        store.add_point(1, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(store.remove_point(1, Point::new(20.0, 20.0), 2.0).unwrap(), None);
        assert_eq!(
            store.remove_point(1, Point::new(11.0, 12.0), 2.0).unwrap(),
            Some((0, Point::new(10.0, 10.0)))
        );
        assert!(store.current().points.is_empty());
    }

    #[test]
    fn next_curve_wraps() {
        let mut store = store_with(3);
        assert_eq!(store.next_curve(), 2);
        assert_eq!(store.next_curve(), 3);
        assert_eq!(store.next_curve(), 1);
    }

    #[test]
    fn style_width_is_bounded() {
        let mut store = CurveStore::default();
        let style = CurveStyle {
            width: 4,
            ..store.current().style
        };
        assert!(store.set_style(1, style).is_err());
        let style = store.current().style.next_width();
        store.set_style(1, style).unwrap();
        assert_eq!(store.current().style.width, 2);
    }

    #[test]
    fn unknown_curve_reported() {
        let mut store = CurveStore::default();
        assert!(matches!(
            store.switch_current(0),
            Err(DigitizeError::CurveNotFound { id: 0 })
        ));
        assert!(store.add_point(5, Point::default()).is_err());
    }

    #[test]
    fn rename_rejects_blank_names() {
        let mut store = store_with(2);
        store.rename_curve(2, "Run A").unwrap();
        assert_eq!(store.get(2).unwrap().name, "Run A");
        assert!(matches!(
            store.rename_curve(1, "  "),
            Err(DigitizeError::InvalidStyle(_))
        ));
        assert_eq!(store.get(1).unwrap().name, "Curve1");
    }
}
