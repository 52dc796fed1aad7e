//! Detected 2D rectangles and what the app does with them before
//! reconstruction: filtering, picking the one under a touch, and cropping a
//! region for an external classifier.

use nalgebra::Point2;
use planerect_core::{expand_rect, DisplayFrame, DisplayOrientation, Rect2, Size2};
use serde::{Deserialize, Serialize};

use crate::corners::{CornerRole, Quad};

/// One rectangle reported by the 2D detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectangleObservation {
    /// Corners in normalized detector space.
    pub corners: Quad<Point2<f64>>,
    /// Detector confidence in `[0, 1]`.
    #[serde(default = "full_confidence")]
    pub confidence: f32,
}

fn full_confidence() -> f32 {
    1.0
}

impl RectangleObservation {
    pub fn new(
        top_left: Point2<f64>,
        top_right: Point2<f64>,
        bottom_left: Point2<f64>,
        bottom_right: Point2<f64>,
        confidence: f32,
    ) -> Self {
        Self {
            corners: Quad::new(top_left, top_right, bottom_left, bottom_right),
            confidence,
        }
    }

    #[inline]
    pub fn corner(&self, role: CornerRole) -> Point2<f64> {
        *self.corners.get(role)
    }

    /// Normalized axis-aligned bounding box of the four corners.
    pub fn bounding_box(&self) -> Rect2 {
        let pts = CornerRole::ALL.map(|role| self.corner(role));
        Rect2::bounding(&pts).unwrap_or_default()
    }

    /// Mean horizontal edge length over mean vertical edge length, measured
    /// in display pixels. `None` if the vertical edges have zero length.
    pub fn aspect_ratio(&self, frame: &DisplayFrame) -> Option<f64> {
        let c = self.corners.clone().map(|p| frame.to_display(p));
        let width = 0.5
            * (nalgebra::distance(&c.top_left, &c.top_right)
                + nalgebra::distance(&c.bottom_left, &c.bottom_right));
        let height = 0.5
            * (nalgebra::distance(&c.top_left, &c.bottom_left)
                + nalgebra::distance(&c.top_right, &c.bottom_right));
        (height > 0.0).then(|| width / height)
    }
}

/// Post-detection filter mirroring the limits the app asks of the
/// rectangle detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationFilter {
    pub min_confidence: f32,
    pub min_aspect_ratio: f64,
    pub max_aspect_ratio: f64,
}

impl Default for ObservationFilter {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            min_aspect_ratio: 0.5,
            max_aspect_ratio: 2.0,
        }
    }
}

impl ObservationFilter {
    pub fn accepts(&self, observation: &RectangleObservation, frame: &DisplayFrame) -> bool {
        if observation.confidence < self.min_confidence {
            return false;
        }
        observation
            .aspect_ratio(frame)
            .is_some_and(|r| r >= self.min_aspect_ratio && r <= self.max_aspect_ratio)
    }

    pub fn retain(
        &self,
        observations: Vec<RectangleObservation>,
        frame: &DisplayFrame,
    ) -> Vec<RectangleObservation> {
        let before = observations.len();
        let kept: Vec<_> = observations
            .into_iter()
            .filter(|o| self.accepts(o, frame))
            .collect();
        log::debug!("observation filter kept {}/{}", kept.len(), before);
        kept
    }
}

/// Index of the first observation whose display-space bounding box contains
/// `location` (display pixels).
pub fn select_at(
    observations: &[RectangleObservation],
    location: Point2<f64>,
    frame: &DisplayFrame,
) -> Option<usize> {
    observations
        .iter()
        .position(|o| frame.rect_to_display(o.bounding_box()).contains_point(location))
}

/// Image region handed to a classifier: the observation's bounding box in
/// image pixels, doubled around its center and clamped to the image.
pub fn classification_crop(
    observation: &RectangleObservation,
    image_size: Size2,
    orientation: DisplayOrientation,
) -> Rect2 {
    let frame = DisplayFrame::new(image_size, orientation);
    expand_rect(frame.rect_to_display(observation.bounding_box()), frame.extent())
}
