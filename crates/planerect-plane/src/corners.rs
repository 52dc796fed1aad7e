use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Logical position of a corner within the idealized rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerRole {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CornerRole {
    pub const ALL: [CornerRole; 4] = [
        CornerRole::TopLeft,
        CornerRole::TopRight,
        CornerRole::BottomLeft,
        CornerRole::BottomRight,
    ];

    /// The three roles left when `self` is omitted, in attempt order.
    pub const fn remaining(self) -> [CornerRole; 3] {
        match self {
            CornerRole::BottomRight => [
                CornerRole::TopLeft,
                CornerRole::TopRight,
                CornerRole::BottomLeft,
            ],
            CornerRole::BottomLeft => [
                CornerRole::TopLeft,
                CornerRole::TopRight,
                CornerRole::BottomRight,
            ],
            CornerRole::TopRight => [
                CornerRole::TopLeft,
                CornerRole::BottomLeft,
                CornerRole::BottomRight,
            ],
            CornerRole::TopLeft => [
                CornerRole::TopRight,
                CornerRole::BottomLeft,
                CornerRole::BottomRight,
            ],
        }
    }
}

/// Omitted corner of each 3-of-4 combination, in the order they are tried.
///
/// Top-left anchored combinations come first; reconstruction results depend
/// on this order.
pub const ATTEMPT_ORDER: [CornerRole; 4] = [
    CornerRole::BottomRight,
    CornerRole::BottomLeft,
    CornerRole::TopRight,
    CornerRole::TopLeft,
];

/// One value per corner role.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Quad<T> {
    pub top_left: T,
    pub top_right: T,
    pub bottom_left: T,
    pub bottom_right: T,
}

/// World-space hit-test candidates per corner, each list in hit-tester order.
pub type CornerCandidates = Quad<Vec<Vector3<f64>>>;

impl<T> Quad<T> {
    pub fn new(top_left: T, top_right: T, bottom_left: T, bottom_right: T) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    #[inline]
    pub fn get(&self, role: CornerRole) -> &T {
        match role {
            CornerRole::TopLeft => &self.top_left,
            CornerRole::TopRight => &self.top_right,
            CornerRole::BottomLeft => &self.bottom_left,
            CornerRole::BottomRight => &self.bottom_right,
        }
    }

    /// Values for the three roles kept when `omitted` is dropped.
    pub fn triple(&self, omitted: CornerRole) -> [&T; 3] {
        omitted.remaining().map(|role| self.get(role))
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Quad<U> {
        Quad {
            top_left: f(self.top_left),
            top_right: f(self.top_right),
            bottom_left: f(self.bottom_left),
            bottom_right: f(self.bottom_right),
        }
    }
}

/// Three world-space corners of a rectangle, tagged by the corner that is
/// missing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "omitted", rename_all = "snake_case")]
pub enum RectangleCorners {
    MissingBottomRight {
        top_left: Vector3<f64>,
        top_right: Vector3<f64>,
        bottom_left: Vector3<f64>,
    },
    MissingBottomLeft {
        top_left: Vector3<f64>,
        top_right: Vector3<f64>,
        bottom_right: Vector3<f64>,
    },
    MissingTopRight {
        top_left: Vector3<f64>,
        bottom_left: Vector3<f64>,
        bottom_right: Vector3<f64>,
    },
    MissingTopLeft {
        top_right: Vector3<f64>,
        bottom_left: Vector3<f64>,
        bottom_right: Vector3<f64>,
    },
}

impl RectangleCorners {
    /// Build from points ordered as `omitted.remaining()`.
    pub fn from_triple(omitted: CornerRole, [p0, p1, p2]: [Vector3<f64>; 3]) -> Self {
        match omitted {
            CornerRole::BottomRight => RectangleCorners::MissingBottomRight {
                top_left: p0,
                top_right: p1,
                bottom_left: p2,
            },
            CornerRole::BottomLeft => RectangleCorners::MissingBottomLeft {
                top_left: p0,
                top_right: p1,
                bottom_right: p2,
            },
            CornerRole::TopRight => RectangleCorners::MissingTopRight {
                top_left: p0,
                bottom_left: p1,
                bottom_right: p2,
            },
            CornerRole::TopLeft => RectangleCorners::MissingTopLeft {
                top_right: p0,
                bottom_left: p1,
                bottom_right: p2,
            },
        }
    }

    pub fn omitted(&self) -> CornerRole {
        match self {
            RectangleCorners::MissingBottomRight { .. } => CornerRole::BottomRight,
            RectangleCorners::MissingBottomLeft { .. } => CornerRole::BottomLeft,
            RectangleCorners::MissingTopRight { .. } => CornerRole::TopRight,
            RectangleCorners::MissingTopLeft { .. } => CornerRole::TopLeft,
        }
    }

    /// The stored corners with their roles, in `omitted().remaining()` order.
    pub fn points(&self) -> [(CornerRole, Vector3<f64>); 3] {
        let [r0, r1, r2] = self.omitted().remaining();
        let [p0, p1, p2] = match *self {
            RectangleCorners::MissingBottomRight {
                top_left,
                top_right,
                bottom_left,
            } => [top_left, top_right, bottom_left],
            RectangleCorners::MissingBottomLeft {
                top_left,
                top_right,
                bottom_right,
            } => [top_left, top_right, bottom_right],
            RectangleCorners::MissingTopRight {
                top_left,
                bottom_left,
                bottom_right,
            } => [top_left, bottom_left, bottom_right],
            RectangleCorners::MissingTopLeft {
                top_right,
                bottom_left,
                bottom_right,
            } => [top_right, bottom_left, bottom_right],
        };
        [(r0, p0), (r1, p1), (r2, p2)]
    }
}
