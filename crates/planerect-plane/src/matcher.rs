//! Per-corner candidate selection by reprojection error.
//!
//! Every slot is scored on its own: the candidate with the lowest relative
//! reprojection error wins if that error is strictly below the tolerance.
//! There is no joint optimization across slots.

use nalgebra::{Point2, Vector3};
use planerect_core::{DisplayFrame, Projector};
use serde::{Deserialize, Serialize};

use crate::error::SlotRejection;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Corner matching settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerMatchParams {
    /// Maximum relative reprojection error (exclusive) for accepting a
    /// candidate.
    pub tolerance: f64,
}

impl Default for CornerMatchParams {
    fn default() -> Self {
        Self { tolerance: 0.01 }
    }
}

/// Accepted candidate for one corner slot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotMatch {
    /// Index into the slot's candidate list.
    pub index: usize,
    pub position: Vector3<f64>,
    /// Where `position` lands on the display.
    pub projected: Point2<f64>,
    pub error: f64,
}

/// A corner triple where at least one slot found nothing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripleMismatch {
    /// `None` for slots that did match.
    pub rejections: [Option<SlotRejection>; 3],
}

/// `|dx / ref.x| + |dy / ref.y|`; `None` when `reference` has a zero
/// coordinate or the result is not finite.
#[inline]
pub fn relative_error(projected: Point2<f64>, reference: Point2<f64>) -> Option<f64> {
    if reference.x == 0.0 || reference.y == 0.0 {
        return None;
    }
    let e = ((projected.x - reference.x) / reference.x).abs()
        + ((projected.y - reference.y) / reference.y).abs();
    e.is_finite().then_some(e)
}

/// Pick the best candidate for a single slot.
///
/// `reference` is the detected corner already in display space. Candidates
/// that cannot be projected are skipped. Ties keep the earlier candidate.
pub fn match_slot<P: Projector + ?Sized>(
    candidates: &[Vector3<f64>],
    reference: Point2<f64>,
    projector: &P,
    tolerance: f64,
) -> Result<SlotMatch, SlotRejection> {
    if candidates.is_empty() {
        return Err(SlotRejection::NoCandidates);
    }
    if reference.x == 0.0 || reference.y == 0.0 {
        return Err(SlotRejection::DegenerateReference);
    }

    let mut best: Option<SlotMatch> = None;
    let mut lowest = f64::INFINITY;
    for (index, &position) in candidates.iter().enumerate() {
        let Some(projected) = projector.project(position) else {
            continue;
        };
        let Some(error) = relative_error(projected, reference) else {
            continue;
        };
        lowest = lowest.min(error);
        if error >= tolerance {
            continue;
        }
        if best.as_ref().is_none_or(|b| error < b.error) {
            best = Some(SlotMatch {
                index,
                position,
                projected,
                error,
            });
        }
    }

    best.ok_or(SlotRejection::ToleranceExceeded { best_error: lowest })
}

/// Match three corner slots against their detected 2D corners.
///
/// `references` are normalized detector points; they are converted with
/// `frame` before scoring. All three slots are always evaluated so the
/// mismatch reports every failing slot; the triple is accepted only if all
/// three matched.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(candidate_sets, references, frame, projector),
        fields(counts = ?candidate_sets.map(<[Vector3<f64>]>::len))
    )
)]
pub fn match_corners<P: Projector + ?Sized>(
    candidate_sets: [&[Vector3<f64>]; 3],
    references: [Point2<f64>; 3],
    frame: &DisplayFrame,
    projector: &P,
    params: &CornerMatchParams,
) -> Result<[SlotMatch; 3], TripleMismatch> {
    let outcomes: [Result<SlotMatch, SlotRejection>; 3] = std::array::from_fn(|slot| {
        let reference = frame.to_display(references[slot]);
        let outcome = match_slot(candidate_sets[slot], reference, projector, params.tolerance);
        if let Err(reason) = &outcome {
            log::trace!(
                "slot {slot}: {} candidates vs ({:.1}, {:.1}) rejected: {reason}",
                candidate_sets[slot].len(),
                reference.x,
                reference.y
            );
        }
        outcome
    });

    match outcomes {
        [Ok(a), Ok(b), Ok(c)] => Ok([a, b, c]),
        _ => Err(TripleMismatch {
            rejections: outcomes.map(|o| o.err()),
        }),
    }
}
