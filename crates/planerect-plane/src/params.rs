use serde::{Deserialize, Serialize};

use crate::matcher::CornerMatchParams;
use crate::observation::ObservationFilter;

/// Configuration for the plane rectangle detector.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaneRectParams {
    /// Corner candidate matching.
    #[serde(default)]
    pub matching: CornerMatchParams,
    /// Observation pre-filter.
    ///
    /// Only applied by callers that go through
    /// [`ObservationFilter::retain`]; the detector itself reconstructs
    /// whatever observation it is given.
    #[serde(default)]
    pub filter: ObservationFilter,
}

impl PlaneRectParams {
    /// Defaults with a custom matching tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            matching: CornerMatchParams { tolerance },
            ..Self::default()
        }
    }
}
