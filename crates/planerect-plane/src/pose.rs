use std::f64::consts::FRAC_PI_2;

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use planerect_core::Size2;
use serde::{Deserialize, Serialize};

use crate::reconstruct::RectangleGeometry;

pub const METERS_TO_INCHES: f64 = 39.3701;

/// A rectangle reconstructed in world space.
///
/// Holds no external resources; the caller owns it for as long as it shows
/// something for it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneRectangle {
    /// Rectangle center, meters.
    pub position: Vector3<f64>,
    /// Width and height, meters.
    pub size: Size2,
    /// Rotation about the vertical axis, radians.
    pub orientation: f64,
    /// Unit normal.
    pub normal: Vector3<f64>,
}

impl PlaneRectangle {
    pub fn from_geometry(g: &RectangleGeometry) -> Self {
        Self {
            position: g.center,
            size: Size2::new(g.width, g.height),
            orientation: g.orientation,
            normal: g.normal,
        }
    }

    /// Rotation that stands a unit plane model (spanning x/y, facing +z)
    /// upright and turns it to `orientation`: a quarter turn about `-z`,
    /// then `orientation` about `+y`.
    pub fn model_rotation(&self) -> UnitQuaternion<f64> {
        let roll = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -FRAC_PI_2);
        let yaw = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.orientation);
        yaw * roll
    }

    /// Model-to-world transform for placing the rectangle in a scene.
    pub fn model_transform(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position), self.model_rotation())
    }

    /// Size in inches, for human-readable logs.
    pub fn size_inches(&self) -> Size2 {
        Size2::new(
            self.size.width * METERS_TO_INCHES,
            self.size.height * METERS_TO_INCHES,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn rect(orientation: f64) -> PlaneRectangle {
        PlaneRectangle {
            position: Vector3::new(0.5, 1.2, -2.0),
            size: Size2::new(1.0, 0.5),
            orientation,
            normal: Vector3::z(),
        }
    }

    #[test]
    fn zero_orientation_is_a_quarter_roll() {
        let r = rect(0.0).model_rotation();
        assert_relative_eq!(r * Vector3::x(), -Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(r * Vector3::z(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn transform_places_model_origin_at_center() {
        let r = rect(0.7);
        let t = r.model_transform();
        assert_relative_eq!(t * Point3::origin(), Point3::from(r.position), epsilon = 1e-12);
        // yaw keeps the vertical axis vertical after the roll
        let up = t.rotation * Vector3::x();
        assert_relative_eq!(up, -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn inches_conversion() {
        let s = rect(0.0).size_inches();
        assert_relative_eq!(s.width, 39.3701);
        assert_relative_eq!(s.height, 19.68505);
    }
}
