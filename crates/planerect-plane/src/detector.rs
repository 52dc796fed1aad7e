//! Plane rectangle detection: try 3-of-4 corner combinations in a fixed
//! order and reconstruct the first one that fully matches.

use planerect_core::{DisplayFrame, Projector};
use serde::{Deserialize, Serialize};

use crate::corners::{CornerCandidates, CornerRole, RectangleCorners, ATTEMPT_ORDER};
use crate::error::{PlaneRectError, SlotRejection};
use crate::matcher::{match_corners, SlotMatch};
use crate::observation::RectangleObservation;
use crate::params::PlaneRectParams;
use crate::pose::PlaneRectangle;
use crate::reconstruct::{reconstruct, RectangleGeometry};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Progress of one detection run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "omitted", rename_all = "snake_case")]
pub enum DetectionState {
    NoAttempt,
    /// The combination without this corner is being (or was last) tried.
    Tried(CornerRole),
    Reconstructed,
    Failed,
}

impl DetectionState {
    /// Next state once the current combination has been scored.
    pub fn after(self, matched: bool) -> Self {
        match self {
            DetectionState::NoAttempt => DetectionState::Tried(ATTEMPT_ORDER[0]),
            DetectionState::Tried(_) if matched => DetectionState::Reconstructed,
            DetectionState::Tried(omitted) => ATTEMPT_ORDER
                .iter()
                .position(|&r| r == omitted)
                .and_then(|i| ATTEMPT_ORDER.get(i + 1))
                .map_or(DetectionState::Failed, |&next| DetectionState::Tried(next)),
            terminal => terminal,
        }
    }
}

/// Outcome of scoring one corner combination.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombinationAttempt {
    pub omitted: CornerRole,
    /// Per-slot rejection, in `omitted.remaining()` order.
    pub rejections: [Option<SlotRejection>; 3],
}

impl CombinationAttempt {
    pub fn matched(&self) -> bool {
        self.rejections.iter().all(Option::is_none)
    }
}

/// Successful detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneRectangleDetection {
    pub rectangle: PlaneRectangle,
    pub geometry: RectangleGeometry,
    pub corners: RectangleCorners,
    /// Accepted candidates, in `corners.omitted().remaining()` order.
    pub matches: [SlotMatch; 3],
    /// Every combination tried, the successful one last.
    pub attempts: Vec<CombinationAttempt>,
}

/// Reconstructs a [`PlaneRectangle`] from one observation and its hit-test
/// candidates.
#[derive(Clone, Debug, Default)]
pub struct PlaneRectangleDetector {
    params: PlaneRectParams,
}

impl PlaneRectangleDetector {
    pub fn new(params: PlaneRectParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &PlaneRectParams {
        &self.params
    }

    /// Run the detection.
    ///
    /// Combinations are tried without bottom-right, bottom-left, top-right
    /// and top-left, in that order; the first one where all three corners
    /// match is reconstructed and later ones are never scored. A degenerate
    /// first match is reported as such rather than skipped.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip_all, fields(confidence = observation.confidence))
    )]
    pub fn detect<P: Projector + ?Sized>(
        &self,
        observation: &RectangleObservation,
        candidates: &CornerCandidates,
        frame: &DisplayFrame,
        projector: &P,
    ) -> Result<PlaneRectangleDetection, PlaneRectError> {
        let mut attempts = Vec::with_capacity(ATTEMPT_ORDER.len());
        let mut accepted = None;
        let mut state = DetectionState::NoAttempt.after(false);

        while let DetectionState::Tried(omitted) = state {
            let sets = candidates.triple(omitted).map(Vec::as_slice);
            let references = omitted.remaining().map(|role| observation.corner(role));
            match match_corners(sets, references, frame, projector, &self.params.matching) {
                Ok(matches) => {
                    attempts.push(CombinationAttempt {
                        omitted,
                        rejections: [None; 3],
                    });
                    accepted = Some((omitted, matches));
                    state = state.after(true);
                }
                Err(mismatch) => {
                    log::debug!(
                        "combination without {omitted:?} rejected: {:?}",
                        mismatch.rejections
                    );
                    attempts.push(CombinationAttempt {
                        omitted,
                        rejections: mismatch.rejections,
                    });
                    state = state.after(false);
                }
            }
        }

        let Some((omitted, matches)) = accepted else {
            log::debug!("no plane found after {} combinations", attempts.len());
            return Err(PlaneRectError::AllCombinationsFailed { attempts });
        };

        let corners = RectangleCorners::from_triple(omitted, matches.map(|m| m.position));
        let geometry = reconstruct(&corners).inspect_err(|err| log::warn!("{err}"))?;
        let rectangle = PlaneRectangle::from_geometry(&geometry);
        let inches = rectangle.size_inches();
        log::debug!(
            "{state:?} without {omitted:?}: center {:?}, normal {:?}, corner angle {:.1} deg",
            rectangle.position.as_slice(),
            rectangle.normal.as_slice(),
            geometry.corner_angle.to_degrees()
        );
        log::info!(
            "plane rectangle {:.1} in x {:.1} in, orientation {:.3} rad",
            inches.width,
            inches.height,
            rectangle.orientation
        );

        Ok(PlaneRectangleDetection {
            rectangle,
            geometry,
            corners,
            matches,
            attempts,
        })
    }
}
