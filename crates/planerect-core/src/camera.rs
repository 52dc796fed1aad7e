use nalgebra::{Isometry3, Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::vector;

/// Maps a world point onto the display, in display pixels.
///
/// Returns `None` when the point cannot be seen (behind the camera, or the
/// projection is not finite).
pub trait Projector {
    fn project(&self, world: Vector3<f64>) -> Option<Point2<f64>>;
}

impl<F> Projector for F
where
    F: Fn(Vector3<f64>) -> Option<Point2<f64>>,
{
    #[inline]
    fn project(&self, world: Vector3<f64>) -> Option<Point2<f64>> {
        self(world)
    }
}

/// Pinhole camera in the right-handed, y-up, looking-down-`-Z` convention
/// used by AR frameworks. Display `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinholeCamera {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
    /// World -> camera (view) transform.
    pub camera_from_world: Isometry3<f64>,
}

/// Points closer to the image plane than this are not projected.
const MIN_DEPTH: f64 = 1e-6;

impl PinholeCamera {
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64, camera_from_world: Isometry3<f64>) -> Self {
        Self {
            fx,
            fy,
            cx,
            cy,
            camera_from_world,
        }
    }

    /// Camera at `eye` looking at `target`.
    pub fn looking_at(
        fx: f64,
        fy: f64,
        cx: f64,
        cy: f64,
        eye: Vector3<f64>,
        target: Vector3<f64>,
        up: Vector3<f64>,
    ) -> Self {
        let view = Isometry3::look_at_rh(&Point3::from(eye), &Point3::from(target), &up);
        Self::new(fx, fy, cx, cy, view)
    }

    /// World-space camera center.
    pub fn position(&self) -> Vector3<f64> {
        self.camera_from_world.inverse().translation.vector
    }

    /// World ray through a display pixel. `None` for a degenerate focal length.
    pub fn ray_through(&self, pixel: Point2<f64>) -> Option<Ray> {
        if self.fx == 0.0 || self.fy == 0.0 {
            return None;
        }
        let dir_cam = Vector3::new(
            (pixel.x - self.cx) / self.fx,
            -(pixel.y - self.cy) / self.fy,
            -1.0,
        );
        let world_from_camera = self.camera_from_world.inverse();
        let direction = vector::normalized(world_from_camera.rotation * dir_cam)?;
        Some(Ray {
            origin: world_from_camera.translation.vector,
            direction,
        })
    }
}

impl Projector for PinholeCamera {
    fn project(&self, world: Vector3<f64>) -> Option<Point2<f64>> {
        let pc = self.camera_from_world * Point3::from(world);
        let depth = -pc.z;
        if !depth.is_finite() || depth < MIN_DEPTH {
            return None;
        }
        let u = self.cx + self.fx * pc.x / depth;
        let v = self.cy - self.fy * pc.y / depth;
        (u.is_finite() && v.is_finite()).then(|| Point2::new(u, v))
    }
}

/// Half-line `origin + t * direction`, `t >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3<f64>,
    /// Unit direction.
    pub direction: Vector3<f64>,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f64) -> Vector3<f64> {
        self.origin + self.direction * t
    }

    /// Intersection with the plane through `point` with normal `normal`.
    ///
    /// `None` when the ray is parallel to the plane or the plane is behind
    /// the origin.
    pub fn intersect_plane(&self, point: Vector3<f64>, normal: Vector3<f64>) -> Option<Vector3<f64>> {
        let denom = vector::dot(normal, self.direction);
        if denom.abs() < vector::MIN_MAGNITUDE {
            return None;
        }
        let t = vector::dot(normal, point - self.origin) / denom;
        (t >= 0.0).then(|| self.at(t))
    }
}
