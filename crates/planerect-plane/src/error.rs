use serde::{Deserialize, Serialize};

use crate::corners::CornerRole;
use crate::detector::CombinationAttempt;

/// Why a single corner slot produced no accepted candidate.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotRejection {
    #[error("no hit-test candidates")]
    NoCandidates,
    #[error("every candidate exceeded the tolerance (best error {best_error:.4})")]
    ToleranceExceeded { best_error: f64 },
    #[error("reference point has a zero coordinate; relative error is undefined")]
    DegenerateReference,
}

/// Errors returned by the plane rectangle detector.
///
/// Both are expected, recoverable outcomes: the caller decides what to tell
/// the user.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlaneRectError {
    #[error("no plane found for this rectangle ({} combinations tried)", .attempts.len())]
    AllCombinationsFailed { attempts: Vec<CombinationAttempt> },
    #[error("matched corners without {omitted:?} are collinear or coincident")]
    DegenerateGeometry { omitted: CornerRole },
}
