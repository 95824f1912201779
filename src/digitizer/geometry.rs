//! Plain 2D points and segments shared by the core.

/// A 2D coordinate, used both for image pixels and for data values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component (pixels grow downward).
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when `other` lies within `tolerance` on both axes.
    pub fn is_near(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }

    /// True when both components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A straight line between two pixel positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
}

impl Segment {
    /// Create a segment.
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        (self.to.x - self.from.x).hypot(self.to.y - self.from.y)
    }

    /// Split into dashes of `dash` length separated by gaps of the same length.
    pub fn dashes(&self, dash: f64) -> Vec<Segment> {
        let len = self.length();
        if len == 0.0 || dash <= 0.0 {
            return vec![*self];
        }
        let dx = (self.to.x - self.from.x) / len;
        let dy = (self.to.y - self.from.y) / len;
        let at = |d: f64| Point::new(self.from.x + dx * d, self.from.y + dy * d);

        let mut out = Vec::new();
        let mut start = 0.0;
        while start < len {
            let end = (start + dash).min(len);
            out.push(Segment::new(at(start), at(end)));
            start += dash * 2.0;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearness_is_per_axis() {
        let p = Point::new(10.0, 10.0);
        assert!(p.is_near(Point::new(12.0, 8.0), 2.0));
        assert!(!p.is_near(Point::new(12.5, 10.0), 2.0));
    }

    #[test]
    fn dashes_cover_alternate_stretches() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(20.0, 0.0));
        let dashes = seg.dashes(5.0);
        assert_eq!(dashes.len(), 2);
        assert_eq!(dashes[0].to, Point::new(5.0, 0.0));
        assert_eq!(dashes[1].from, Point::new(10.0, 0.0));
    }
}
