//! JSON scene and report helpers for plane rectangle reconstruction.

use crate::{
    CombinationAttempt, CornerCandidates, PlaneRectError, PlaneRectParams, PlaneRectangle,
    PlaneRectangleDetection, PlaneRectangleDetector, RectangleCorners, RectangleGeometry,
    RectangleObservation,
};
use nalgebra::{Isometry3, Point2};
use planerect_core::{DisplayFrame, PinholeCamera};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum PlaneRectIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One captured frame: what the 2D detector saw and what the hit-tester
/// returned for each of its corners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub frame: DisplayFrame,
    /// Projects world points onto `frame`.
    pub camera: PinholeCamera,
    pub observation: RectangleObservation,
    pub candidates: CornerCandidates,
    /// Display point the user touched, if any. Observations not under it
    /// are not reconstructed.
    #[serde(default)]
    pub touch: Option<Point2<f64>>,
    #[serde(default)]
    pub params: PlaneRectParams,
    #[serde(default)]
    pub output_path: Option<String>,
}

impl SceneConfig {
    /// Load a JSON scene from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PlaneRectIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this scene to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PlaneRectIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("planerect_report.json"))
    }

    pub fn build_detector(&self) -> PlaneRectangleDetector {
        PlaneRectangleDetector::new(self.params.clone())
    }

    /// Why this scene's observation should not be reconstructed, if anything.
    pub fn screening_error(&self) -> Option<String> {
        if let Some(touch) = self.touch {
            let hit = crate::select_at(std::slice::from_ref(&self.observation), touch, &self.frame);
            if hit.is_none() {
                return Some(format!(
                    "touch ({:.1}, {:.1}) is outside the detected rectangle",
                    touch.x, touch.y
                ));
            }
        }
        if !self.params.filter.accepts(&self.observation, &self.frame) {
            return Some(format!(
                "observation rejected by filter (confidence {:.2}, aspect ratio {})",
                self.observation.confidence,
                self.observation
                    .aspect_ratio(&self.frame)
                    .map_or_else(|| "undefined".to_string(), |r| format!("{r:.2}"))
            ));
        }
        None
    }

    /// Run the detector on this scene with its own camera.
    pub fn detect(&self) -> Result<PlaneRectangleDetection, PlaneRectError> {
        self.build_detector()
            .detect(&self.observation, &self.candidates, &self.frame, &self.camera)
    }
}

/// Wall-clock timings in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingsMs {
    pub load: f64,
    pub detect: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructReport {
    pub scene_path: String,
    /// Candidate counts in top-left, top-right, bottom-left, bottom-right
    /// order.
    pub candidate_counts: [usize; 4],
    #[serde(default)]
    pub rectangle: Option<PlaneRectangle>,
    #[serde(default)]
    pub geometry: Option<RectangleGeometry>,
    #[serde(default)]
    pub corners: Option<RectangleCorners>,
    /// Model-to-world placement of a unit plane.
    #[serde(default)]
    pub model_transform: Option<Isometry3<f64>>,
    #[serde(default)]
    pub attempts: Vec<CombinationAttempt>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub timings: TimingsMs,
}

impl ReconstructReport {
    /// Build a base report from the input scene.
    pub fn new(scene: &SceneConfig, scene_path: &Path) -> Self {
        let c = &scene.candidates;
        Self {
            scene_path: scene_path.to_string_lossy().into_owned(),
            candidate_counts: [
                c.top_left.len(),
                c.top_right.len(),
                c.bottom_left.len(),
                c.bottom_right.len(),
            ],
            rectangle: None,
            geometry: None,
            corners: None,
            model_transform: None,
            attempts: Vec::new(),
            error: None,
            timings: TimingsMs::default(),
        }
    }

    /// Populate report fields from a successful detection.
    pub fn set_detection(&mut self, res: PlaneRectangleDetection) {
        self.model_transform = Some(res.rectangle.model_transform());
        self.rectangle = Some(res.rectangle);
        self.geometry = Some(res.geometry);
        self.corners = Some(res.corners);
        self.attempts = res.attempts;
        self.error = None;
    }

    /// Record a detection error, keeping the attempt trace when there is one.
    pub fn set_error(&mut self, err: PlaneRectError) {
        self.error = Some(err.to_string());
        if let PlaneRectError::AllCombinationsFailed { attempts } = err {
            self.attempts = attempts;
        }
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PlaneRectIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PlaneRectIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CornerRole;
    use nalgebra::Vector3;
    use planerect_core::{DisplayOrientation, Size2};

    /// Camera at the origin looking down `-z`; a 1 x 1 m square on the wall
    /// `z = -2` seen straight on.
    fn scene() -> SceneConfig {
        let camera = PinholeCamera::new(800.0, 800.0, 500.0, 500.0, Isometry3::identity());
        let frame = DisplayFrame::new(Size2::new(1000.0, 1000.0), DisplayOrientation::Portrait);
        let world = [
            Vector3::new(-0.5, 0.5, -2.0),
            Vector3::new(0.5, 0.5, -2.0),
            Vector3::new(-0.5, -0.5, -2.0),
            Vector3::new(0.5, -0.5, -2.0),
        ];
        // portrait: display (u, v) = (y W, x H), so normalized = (v / H, u / W)
        let normalized = world.map(|p| {
            let px = planerect_core::Projector::project(&camera, p).expect("visible");
            Point2::new(px.y / 1000.0, px.x / 1000.0)
        });
        SceneConfig {
            frame,
            camera,
            observation: RectangleObservation::new(
                normalized[0],
                normalized[1],
                normalized[2],
                normalized[3],
                0.95,
            ),
            candidates: CornerCandidates::new(
                vec![world[0]],
                vec![world[1]],
                vec![world[2]],
                vec![world[3]],
            ),
            touch: None,
            params: PlaneRectParams::default(),
            output_path: None,
        }
    }

    #[test]
    fn scene_json_roundtrip_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scene.json");
        let s = scene();
        s.write_json(&path).expect("write");
        let back = SceneConfig::load_json(&path).expect("load");
        assert_eq!(back.observation, s.observation);
        assert_eq!(back.candidates, s.candidates);
        assert_eq!(back.params, s.params);
        assert_eq!(back.output_path(), PathBuf::from("planerect_report.json"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = SceneConfig::load_json(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, PlaneRectIoError::Io(_)));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").expect("write");
        assert!(matches!(
            SceneConfig::load_json(&path),
            Err(PlaneRectIoError::Json(_))
        ));
    }

    #[test]
    fn detect_and_report_success() {
        let s = scene();
        assert_eq!(s.screening_error(), None);
        let det = s.detect().expect("square reconstructed");
        assert!((det.rectangle.size.width - 1.0).abs() < 1e-9);
        assert!((det.rectangle.size.height - 1.0).abs() < 1e-9);

        let mut report = ReconstructReport::new(&s, Path::new("scene.json"));
        assert_eq!(report.candidate_counts, [1, 1, 1, 1]);
        report.set_detection(det);
        assert!(report.error.is_none());
        assert_eq!(report.attempts.len(), 1);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.json");
        report.write_json(&path).expect("write");
        let back = ReconstructReport::load_json(&path).expect("load");
        assert_eq!(back.rectangle, report.rectangle);
        assert_eq!(back.corners.map(|c| c.omitted()), Some(CornerRole::BottomRight));
    }

    #[test]
    fn report_keeps_attempts_on_failure() {
        let mut s = scene();
        s.candidates.top_left.clear();
        s.candidates.top_right.clear();
        let err = s.detect().unwrap_err();
        let mut report = ReconstructReport::new(&s, Path::new("scene.json"));
        report.set_error(err);
        assert!(report.rectangle.is_none());
        assert_eq!(report.attempts.len(), 4);
        assert!(report
            .error
            .as_deref()
            .is_some_and(|e| e.contains("no plane found")));
    }

    #[test]
    fn screening_checks_touch_and_filter() {
        let mut s = scene();
        s.touch = Some(Point2::new(500.0, 500.0));
        assert_eq!(s.screening_error(), None);
        s.touch = Some(Point2::new(5.0, 5.0));
        assert!(s.screening_error().is_some_and(|e| e.contains("outside")));
        s.touch = None;
        s.observation.confidence = 0.1;
        assert!(s.screening_error().is_some_and(|e| e.contains("filter")));
    }
}
