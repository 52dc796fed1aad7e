//! Rectangle geometry from three matched world corners.

use nalgebra::Vector3;
use planerect_core::vector;
use serde::{Deserialize, Serialize};

use crate::corners::RectangleCorners;
use crate::error::PlaneRectError;

/// World "forward" direction the orientation is measured against.
#[inline]
fn forward() -> Vector3<f64> {
    Vector3::new(0.0, 0.0, -1.0)
}

/// Smallest sine of the vertex angle accepted as a proper triangle.
pub const MIN_SINE: f64 = 1e-6;

/// Size, placement and facing of a reconstructed rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectangleGeometry {
    pub width: f64,
    pub height: f64,
    pub center: Vector3<f64>,
    /// Unit normal, `cross(c - a, c - b)` normalized.
    pub normal: Vector3<f64>,
    /// Angle in `[0, pi]` between world forward `(0, 0, -1)` and the normal's
    /// horizontal projection. Zero when the normal is vertical.
    pub orientation: f64,
    /// Interior angle at the right-angle vertex; diagnostic only.
    pub corner_angle: f64,
}

/// Right-angle vertex `c` and the two adjacent corners `a`, `b`.
struct Vertex {
    a: Vector3<f64>,
    b: Vector3<f64>,
    c: Vector3<f64>,
}

impl RectangleCorners {
    fn vertex(&self) -> Vertex {
        match *self {
            RectangleCorners::MissingBottomRight {
                top_left: c,
                top_right: a,
                bottom_left: b,
            }
            | RectangleCorners::MissingBottomLeft {
                top_left: a,
                top_right: c,
                bottom_right: b,
            }
            | RectangleCorners::MissingTopRight {
                top_left: a,
                bottom_left: c,
                bottom_right: b,
            }
            | RectangleCorners::MissingTopLeft {
                top_right: a,
                bottom_left: b,
                bottom_right: c,
            } => Vertex { a, b, c },
        }
    }

    /// Length of the horizontal (left to right) edge.
    pub fn width(&self) -> f64 {
        match *self {
            RectangleCorners::MissingBottomRight {
                top_left: left,
                top_right: right,
                ..
            }
            | RectangleCorners::MissingBottomLeft {
                top_left: left,
                top_right: right,
                ..
            }
            | RectangleCorners::MissingTopRight {
                bottom_left: left,
                bottom_right: right,
                ..
            }
            | RectangleCorners::MissingTopLeft {
                bottom_left: left,
                bottom_right: right,
                ..
            } => vector::distance(right, left),
        }
    }

    /// Length of the vertical (top to bottom) edge.
    pub fn height(&self) -> f64 {
        match *self {
            RectangleCorners::MissingBottomRight {
                top_left: top,
                bottom_left: bottom,
                ..
            }
            | RectangleCorners::MissingBottomLeft {
                top_right: top,
                bottom_right: bottom,
                ..
            }
            | RectangleCorners::MissingTopRight {
                top_left: top,
                bottom_left: bottom,
                ..
            }
            | RectangleCorners::MissingTopLeft {
                top_right: top,
                bottom_right: bottom,
                ..
            } => vector::distance(top, bottom),
        }
    }

    /// Midpoint of the diagonal opposite the vertex.
    pub fn center(&self) -> Vector3<f64> {
        let Vertex { a, b, .. } = self.vertex();
        vector::midpoint(a, b)
    }

    /// Interior angle at the vertex, from the law of cosines.
    pub fn corner_angle(&self) -> Option<f64> {
        let Vertex { a, b, c } = self.vertex();
        let dist_a = vector::distance(c, b);
        let dist_b = vector::distance(c, a);
        let dist_c = vector::distance(a, b);
        let denom = 2.0 * dist_a * dist_b;
        if denom < vector::MIN_MAGNITUDE {
            return None;
        }
        let cos_c = (dist_a * dist_a + dist_b * dist_b - dist_c * dist_c) / denom;
        Some(cos_c.clamp(-1.0, 1.0).acos())
    }

    /// Unit normal; `None` when the three points are collinear or coincide.
    ///
    /// Collinearity is judged on the sine of the vertex angle,
    /// `|cross(c - a, c - b)| / (|c - a| |c - b|)`, so the test does not
    /// depend on the rectangle's size.
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let Vertex { a, b, c } = self.vertex();
        let (ca, cb) = (c - a, c - b);
        let n = vector::cross(ca, cb);
        let len = vector::magnitude(n);
        let scale = vector::magnitude(ca) * vector::magnitude(cb);
        if !(scale.is_finite() && len > MIN_SINE * scale) {
            return None;
        }
        Some(n / len)
    }

    /// Rotation about the vertical axis, see [`RectangleGeometry::orientation`].
    pub fn orientation(&self) -> Option<f64> {
        self.normal().map(orientation_of)
    }
}

fn orientation_of(normal: Vector3<f64>) -> f64 {
    vector::normalized(Vector3::new(normal.x, 0.0, normal.z))
        .and_then(|horizontal| vector::angle_between(forward(), horizontal))
        .unwrap_or(0.0)
}

/// Compute the full geometry of a matched corner triple.
///
/// Rejects degenerate triples instead of producing a NaN normal.
pub fn reconstruct(corners: &RectangleCorners) -> Result<RectangleGeometry, PlaneRectError> {
    let omitted = corners.omitted();
    let normal = corners
        .normal()
        .ok_or(PlaneRectError::DegenerateGeometry { omitted })?;
    let corner_angle = corners
        .corner_angle()
        .ok_or(PlaneRectError::DegenerateGeometry { omitted })?;

    Ok(RectangleGeometry {
        width: corners.width(),
        height: corners.height(),
        center: corners.center(),
        normal,
        orientation: orientation_of(normal),
        corner_angle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corners::{CornerRole, ATTEMPT_ORDER};
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    /// A 1.2 x 0.8 window on the wall `z = -3`, facing the viewer.
    fn wall_window() -> [Vector3<f64>; 4] {
        [
            Vector3::new(-0.6, 1.8, -3.0),
            Vector3::new(0.6, 1.8, -3.0),
            Vector3::new(-0.6, 1.0, -3.0),
            Vector3::new(0.6, 1.0, -3.0),
        ]
    }

    fn corners_without(omitted: CornerRole, quad: [Vector3<f64>; 4]) -> RectangleCorners {
        let pick = |role: CornerRole| match role {
            CornerRole::TopLeft => quad[0],
            CornerRole::TopRight => quad[1],
            CornerRole::BottomLeft => quad[2],
            CornerRole::BottomRight => quad[3],
        };
        RectangleCorners::from_triple(omitted, omitted.remaining().map(pick))
    }

    #[test]
    fn every_combination_recovers_the_same_rectangle() {
        let quad = wall_window();
        for omitted in ATTEMPT_ORDER {
            let g = reconstruct(&corners_without(omitted, quad)).expect("non-degenerate");
            assert_relative_eq!(g.width, 1.2, epsilon = 1e-12);
            assert_relative_eq!(g.height, 0.8, epsilon = 1e-12);
            assert_relative_eq!(g.center, Vector3::new(0.0, 1.4, -3.0), epsilon = 1e-12);
            assert_relative_eq!(g.corner_angle, FRAC_PI_2, epsilon = 1e-12);
            assert_relative_eq!(vector::magnitude(g.normal), 1.0, epsilon = 1e-12);
            // normal is +-z; the horizontal projection is parallel to forward
            assert_relative_eq!(g.normal.z.abs(), 1.0, epsilon = 1e-12);
            assert!(g.orientation.abs() < 1e-9 || (g.orientation - PI).abs() < 1e-9);
        }
    }

    #[test]
    fn top_left_vertex_normal_follows_edge_cross_product() {
        let g = reconstruct(&corners_without(CornerRole::BottomRight, wall_window()))
            .expect("non-degenerate");
        // c = TL, a = TR, b = BL: (c - a) x (c - b) = (-1.2, 0, 0) x (0, 0.8, 0)
        assert_relative_eq!(g.normal, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
        assert_relative_eq!(g.orientation, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn normal_uses_each_points_own_coordinates() {
        // a and c share z, b does not; reusing a's z for b would give (0, 0, -1)
        let corners = RectangleCorners::MissingBottomRight {
            top_left: Vector3::new(0.0, 1.0, 0.0),
            top_right: Vector3::new(1.0, 1.0, 0.0),
            bottom_left: Vector3::new(0.0, 0.0, -1.0),
        };
        let n = corners.normal().expect("normal");
        let expected = vector::normalized(vector::cross(
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 1.0),
        ))
        .expect("unit");
        assert_relative_eq!(n, expected, epsilon = 1e-12);
        assert!(n.y.abs() > 0.5);
    }

    #[test]
    fn swapping_a_and_b_only_flips_the_normal() {
        let tl = Vector3::new(0.3, 2.0, -1.0);
        let tr = Vector3::new(1.1, 2.1, -1.6);
        let bl = Vector3::new(0.35, 1.2, -1.05);
        // Top-left vertex with a/b as-is, and the mirrored labelling where the
        // vertex is top-right and the former a/b swap roles.
        let original = RectangleCorners::MissingBottomRight {
            top_left: tl,
            top_right: tr,
            bottom_left: bl,
        };
        let swapped = RectangleCorners::MissingBottomRight {
            top_left: tl,
            top_right: bl,
            bottom_left: tr,
        };
        let n0 = original.normal().expect("normal");
        let n1 = swapped.normal().expect("normal");
        assert_relative_eq!(n0, -n1, epsilon = 1e-12);
        assert_relative_eq!(original.center(), swapped.center(), epsilon = 1e-12);
        assert_relative_eq!(original.width(), swapped.height(), epsilon = 1e-12);
        assert_relative_eq!(original.height(), swapped.width(), epsilon = 1e-12);
        assert_relative_eq!(
            original.corner_angle().expect("angle"),
            swapped.corner_angle().expect("angle"),
            epsilon = 1e-12
        );
    }

    #[test]
    fn rotated_wall_orientation() {
        // wall rotated 45 degrees about y
        let s = FRAC_PI_4.sin();
        let right = Vector3::new(s, 0.0, -s);
        let up = Vector3::y();
        let origin = Vector3::new(0.0, 1.0, -2.0);
        let corners = RectangleCorners::MissingBottomRight {
            top_left: origin + up,
            top_right: origin + up + right,
            bottom_left: origin,
        };
        let g = reconstruct(&corners).expect("non-degenerate");
        assert_relative_eq!(g.orientation, FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(g.width, 1.0, epsilon = 1e-12);
        assert_relative_eq!(g.height, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn floor_rectangle_has_zero_orientation() {
        let corners = RectangleCorners::MissingTopLeft {
            top_right: Vector3::new(1.0, 0.0, -2.0),
            bottom_left: Vector3::new(0.0, 0.0, -1.0),
            bottom_right: Vector3::new(1.0, 0.0, -1.0),
        };
        let g = reconstruct(&corners).expect("non-degenerate");
        assert_relative_eq!(g.normal.y.abs(), 1.0, epsilon = 1e-12);
        assert_eq!(g.orientation, 0.0);
    }

    #[test]
    fn collinear_corners_are_rejected() {
        let corners = RectangleCorners::MissingTopRight {
            top_left: Vector3::new(0.0, 0.0, -1.0),
            bottom_left: Vector3::new(1.0, 0.0, -1.0),
            bottom_right: Vector3::new(2.0, 0.0, -1.0),
        };
        assert_eq!(
            reconstruct(&corners),
            Err(PlaneRectError::DegenerateGeometry {
                omitted: CornerRole::TopRight
            })
        );

        let coincident = RectangleCorners::from_triple(CornerRole::TopLeft, [Vector3::zeros(); 3]);
        assert!(reconstruct(&coincident).is_err());
    }

    #[test]
    fn near_collinear_corners_are_rejected() {
        // sine of the vertex angle is about 1e-11
        let corners = RectangleCorners::MissingTopRight {
            top_left: Vector3::new(0.0, 0.0, -1.0),
            bottom_left: Vector3::new(1.0, 1e-11, -1.0),
            bottom_right: Vector3::new(2.0, 0.0, -1.0),
        };
        assert_eq!(corners.normal(), None);
        assert_eq!(
            reconstruct(&corners),
            Err(PlaneRectError::DegenerateGeometry {
                omitted: CornerRole::TopRight
            })
        );
    }

    #[test]
    fn small_rectangles_are_not_degenerate() {
        // 5 mm x 2 mm label, well above the sine threshold
        let corners = RectangleCorners::MissingBottomRight {
            top_left: Vector3::new(0.0, 0.0, -1.0),
            top_right: Vector3::new(0.005, 0.0, -1.0),
            bottom_left: Vector3::new(0.0, -0.002, -1.0),
        };
        let g = reconstruct(&corners).expect("non-degenerate");
        assert_relative_eq!(g.width, 0.005, epsilon = 1e-15);
        assert_relative_eq!(g.height, 0.002, epsilon = 1e-15);
        assert_relative_eq!(vector::magnitude(g.normal), 1.0, epsilon = 1e-12);
    }
}
