//! Normalized detector space <-> display space.
//!
//! The rectangle detector reports corners in `[0, 1] x [0, 1]` with its own
//! axis convention; the display (and the projection used to score hit-test
//! candidates) works in pixels and depends on how the device is held. There
//! is exactly one mapping per orientation, shared by points and rects:
//!
//! | orientation            | x'          | y'          |
//! |------------------------|-------------|-------------|
//! | portrait / unknown     | `y * W`     | `x * H`     |
//! | landscape left         | `(1-x) * W` | `y * H`     |
//! | landscape right        | `x * W`     | `(1-y) * H` |
//! | portrait upside down   | `(1-y) * W` | `(1-x) * H` |

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{Rect2, Size2};

/// How the display is rotated relative to the capture sensor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayOrientation {
    /// Orientation not reported; treated as [`DisplayOrientation::Portrait`].
    Unknown,
    #[default]
    Portrait,
    LandscapeLeft,
    LandscapeRight,
    PortraitUpsideDown,
}

/// Display size plus orientation: everything a conversion needs.
///
/// Passed explicitly to every conversion instead of being read from global
/// UI state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayFrame {
    pub size: Size2,
    #[serde(default)]
    pub orientation: DisplayOrientation,
}

impl DisplayFrame {
    pub fn new(size: Size2, orientation: DisplayOrientation) -> Self {
        Self { size, orientation }
    }

    #[inline]
    pub fn to_display(&self, p: Point2<f64>) -> Point2<f64> {
        to_display_point(p, self.size, self.orientation)
    }

    #[inline]
    pub fn from_display(&self, p: Point2<f64>) -> Option<Point2<f64>> {
        from_display_point(p, self.size, self.orientation)
    }

    #[inline]
    pub fn rect_to_display(&self, r: Rect2) -> Rect2 {
        to_display_rect(r, self.size, self.orientation)
    }

    #[inline]
    pub fn rect_from_display(&self, r: Rect2) -> Option<Rect2> {
        from_display_rect(r, self.size, self.orientation)
    }

    /// The whole display as a rect anchored at the origin.
    pub fn extent(&self) -> Rect2 {
        Rect2 {
            origin: Point2::origin(),
            size: self.size,
        }
    }
}

/// Map a normalized detector point into display pixels.
pub fn to_display_point(p: Point2<f64>, target: Size2, orientation: DisplayOrientation) -> Point2<f64> {
    let (w, h) = (target.width, target.height);
    match orientation {
        DisplayOrientation::Unknown | DisplayOrientation::Portrait => {
            Point2::new(p.y * w, p.x * h)
        }
        DisplayOrientation::LandscapeLeft => Point2::new((1.0 - p.x) * w, p.y * h),
        DisplayOrientation::LandscapeRight => Point2::new(p.x * w, (1.0 - p.y) * h),
        DisplayOrientation::PortraitUpsideDown => Point2::new((1.0 - p.y) * w, (1.0 - p.x) * h),
    }
}

/// Inverse of [`to_display_point`]. `None` when `target` has a zero or
/// non-finite dimension.
pub fn from_display_point(
    p: Point2<f64>,
    target: Size2,
    orientation: DisplayOrientation,
) -> Option<Point2<f64>> {
    if !target.is_usable() {
        return None;
    }
    let u = p.x / target.width;
    let v = p.y / target.height;
    Some(match orientation {
        DisplayOrientation::Unknown | DisplayOrientation::Portrait => Point2::new(v, u),
        DisplayOrientation::LandscapeLeft => Point2::new(1.0 - u, v),
        DisplayOrientation::LandscapeRight => Point2::new(u, 1.0 - v),
        DisplayOrientation::PortraitUpsideDown => Point2::new(1.0 - v, 1.0 - u),
    })
}

/// Map a normalized detector rect into display pixels.
///
/// Origin and size are transformed together, so the result is exactly the
/// bounding box of the four converted corners: when the orientation swaps
/// axes, width and height swap with it.
pub fn to_display_rect(r: Rect2, target: Size2, orientation: DisplayOrientation) -> Rect2 {
    let (x, y) = (r.origin.x, r.origin.y);
    let (w, h) = (r.size.width, r.size.height);
    let (nx, ny, nw, nh) = match orientation {
        DisplayOrientation::Unknown | DisplayOrientation::Portrait => (y, x, h, w),
        DisplayOrientation::LandscapeLeft => (1.0 - x - w, y, w, h),
        DisplayOrientation::LandscapeRight => (x, 1.0 - y - h, w, h),
        DisplayOrientation::PortraitUpsideDown => (1.0 - y - h, 1.0 - x - w, h, w),
    };
    Rect2::new(
        nx * target.width,
        ny * target.height,
        nw * target.width,
        nh * target.height,
    )
}

/// Inverse of [`to_display_rect`].
pub fn from_display_rect(
    r: Rect2,
    target: Size2,
    orientation: DisplayOrientation,
) -> Option<Rect2> {
    if !target.is_usable() {
        return None;
    }
    let nx = r.origin.x / target.width;
    let ny = r.origin.y / target.height;
    let nw = r.size.width / target.width;
    let nh = r.size.height / target.height;
    let (x, y, w, h) = match orientation {
        DisplayOrientation::Unknown | DisplayOrientation::Portrait => (ny, nx, nh, nw),
        DisplayOrientation::LandscapeLeft => (1.0 - nx - nw, ny, nw, nh),
        DisplayOrientation::LandscapeRight => (nx, 1.0 - ny - nh, nw, nh),
        DisplayOrientation::PortraitUpsideDown => (1.0 - ny - nh, 1.0 - nx - nw, nh, nw),
    };
    Some(Rect2::new(x, y, w, h))
}
