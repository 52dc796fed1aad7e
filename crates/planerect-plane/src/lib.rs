//! Planar rectangle reconstruction.
//!
//! Pipeline:
//! 1. A 2D rectangle detector reports four normalized corners
//!    ([`RectangleObservation`]).
//! 2. A hit-tester casts a ray through each corner and returns zero or more
//!    world-space intersection candidates per corner ([`CornerCandidates`]).
//! 3. For each 3-of-4 corner combination, in a fixed order, pick the
//!    candidate per corner whose reprojection best matches the detected
//!    corner ([`match_corners`]).
//! 4. The first fully matched combination is turned into width, height,
//!    center, normal and orientation ([`reconstruct`]).
//!
//! ```
//! use planerect_core::{DisplayFrame, DisplayOrientation, Size2};
//! use planerect_plane::{CornerCandidates, PlaneRectParams, PlaneRectangleDetector};
//! use planerect_plane::RectangleObservation;
//! use nalgebra::{Point2, Vector3};
//!
//! let frame = DisplayFrame::new(Size2::new(1000.0, 1000.0), DisplayOrientation::LandscapeRight);
//! // A toy projector: world x/y in meters map straight onto pixels.
//! let projector = |v: Vector3<f64>| Some(Point2::new(v.x * 1000.0, v.y * 1000.0));
//!
//! let observation = RectangleObservation::new(
//!     Point2::new(0.2, 0.8),
//!     Point2::new(0.6, 0.8),
//!     Point2::new(0.2, 0.3),
//!     Point2::new(0.6, 0.3),
//!     0.9,
//! );
//! let candidates = CornerCandidates {
//!     top_left: vec![Vector3::new(0.2, 0.2, -1.0)],
//!     top_right: vec![Vector3::new(0.6, 0.2, -1.0)],
//!     bottom_left: vec![Vector3::new(0.2, 0.7, -1.0)],
//!     bottom_right: vec![],
//! };
//!
//! let detector = PlaneRectangleDetector::new(PlaneRectParams::default());
//! let found = detector
//!     .detect(&observation, &candidates, &frame, &projector)
//!     .expect("three corners match");
//! assert!((found.rectangle.size.width - 0.4).abs() < 1e-9);
//! ```

mod corners;
mod detector;
mod error;
mod io;
mod matcher;
mod observation;
mod params;
mod pose;
mod reconstruct;

pub use corners::{CornerCandidates, CornerRole, Quad, RectangleCorners, ATTEMPT_ORDER};
pub use detector::{CombinationAttempt, DetectionState, PlaneRectangleDetection, PlaneRectangleDetector};
pub use error::{PlaneRectError, SlotRejection};
pub use io::{PlaneRectIoError, ReconstructReport, SceneConfig, TimingsMs};
pub use matcher::{match_corners, match_slot, relative_error, CornerMatchParams, SlotMatch, TripleMismatch};
pub use observation::{classification_crop, select_at, ObservationFilter, RectangleObservation};
pub use params::PlaneRectParams;
pub use pose::{PlaneRectangle, METERS_TO_INCHES};
pub use reconstruct::{reconstruct, RectangleGeometry, MIN_SINE};
