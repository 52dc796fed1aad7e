//! End-to-end helpers over JSON scene files.

use std::path::Path;
use std::time::Instant;

use planerect_core::{Rect2, Size2};
use planerect_plane::{classification_crop, PlaneRectIoError, ReconstructReport, SceneConfig};

#[cfg(feature = "tracing")]
use tracing::instrument;

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

/// Screen a scene's observation, run the detector and collect the outcome
/// in a report.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
pub fn reconstruct(scene: &SceneConfig, scene_path: &Path) -> ReconstructReport {
    let t_total = Instant::now();
    let mut report = ReconstructReport::new(scene, scene_path);
    log::debug!(
        "{}: {:?} candidates",
        scene_path.display(),
        report.candidate_counts
    );

    if let Some(reason) = scene.screening_error() {
        log::info!("skipping reconstruction: {reason}");
        report.error = Some(reason);
    } else {
        let t_detect = Instant::now();
        match scene.detect() {
            Ok(detection) => report.set_detection(detection),
            Err(err) => {
                log::info!("{err}");
                report.set_error(err);
            }
        }
        report.timings.detect = elapsed_ms(t_detect);
    }

    report.timings.total = elapsed_ms(t_total);
    report
}

/// A loaded scene together with its reconstruction report.
#[derive(Debug, Clone)]
pub struct SceneRun {
    pub scene: SceneConfig,
    pub report: ReconstructReport,
}

/// Load a scene file and [`reconstruct`] it; load time is included in the
/// report timings.
///
/// Only IO and JSON problems are errors; a scene without a plane produces a
/// report with `error` set.
pub fn run_scene(path: impl AsRef<Path>) -> Result<SceneRun, PlaneRectIoError> {
    let path = path.as_ref();
    let t_load = Instant::now();
    let scene = SceneConfig::load_json(path)?;
    let load = elapsed_ms(t_load);

    let mut report = reconstruct(&scene, path);
    report.timings.load = load;
    report.timings.total += load;
    Ok(SceneRun { scene, report })
}

/// [`run_scene`] keeping only the report.
pub fn reconstruct_scene(path: impl AsRef<Path>) -> Result<ReconstructReport, PlaneRectIoError> {
    run_scene(path).map(|run| run.report)
}

/// Classifier crop for a scene's observation in an image of `image_size`,
/// using the scene's display orientation.
pub fn scene_crop(path: impl AsRef<Path>, image_size: Size2) -> Result<Rect2, PlaneRectIoError> {
    let scene = SceneConfig::load_json(path)?;
    Ok(classification_crop(
        &scene.observation,
        image_size,
        scene.frame.orientation,
    ))
}
