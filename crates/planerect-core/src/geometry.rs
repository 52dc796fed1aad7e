use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Width/height pair, in whatever unit the owning space uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size2 {
    pub width: f64,
    pub height: f64,
}

impl Size2 {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `true` when both dimensions are finite and strictly positive.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle: origin is the minimum corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect2 {
    pub origin: Point2<f64>,
    pub size: Size2,
}

impl Rect2 {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point2::new(x, y),
            size: Size2::new(width, height),
        }
    }

    /// Smallest rect containing all `points`; `None` for an empty slice.
    pub fn bounding(points: &[Point2<f64>]) -> Option<Self> {
        let first = points.first()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Self::new(x0, y0, x1 - x0, y1 - y0))
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            self.origin.x + 0.5 * self.size.width,
            self.origin.y + 0.5 * self.size.height,
        )
    }

    /// Half-open containment: min edges inclusive, max edges exclusive.
    pub fn contains_point(&self, p: Point2<f64>) -> bool {
        p.x >= self.min_x() && p.x < self.max_x() && p.y >= self.min_y() && p.y < self.max_y()
    }

    /// Closed containment of another rect, with a small absolute slack for
    /// values that went through floating point arithmetic.
    pub fn contains_rect(&self, other: &Rect2, eps: f64) -> bool {
        other.min_x() >= self.min_x() - eps
            && other.min_y() >= self.min_y() - eps
            && other.max_x() <= self.max_x() + eps
            && other.max_y() <= self.max_y() + eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bounding_covers_all_points() {
        let pts = [
            Point2::new(0.3, 0.7),
            Point2::new(0.6, 0.65),
            Point2::new(0.25, 0.2),
            Point2::new(0.55, 0.25),
        ];
        let r = Rect2::bounding(&pts).expect("non-empty");
        assert_eq!(r.min_x(), 0.25);
        assert_relative_eq!(r.max_x(), 0.6, epsilon = 1e-12);
        assert_eq!(r.min_y(), 0.2);
        assert_relative_eq!(r.max_y(), 0.7, epsilon = 1e-12);
        assert!(Rect2::bounding(&[]).is_none());
    }

    #[test]
    fn containment_is_half_open() {
        let r = Rect2::new(10.0, 20.0, 5.0, 5.0);
        assert!(r.contains_point(Point2::new(10.0, 20.0)));
        assert!(!r.contains_point(Point2::new(15.0, 22.0)));
        assert!(r.contains_rect(&Rect2::new(10.0, 20.0, 5.0, 5.0), 0.0));
        assert!(!r.contains_rect(&Rect2::new(9.0, 20.0, 5.0, 5.0), 1e-9));
    }
}
