//! Core types and utilities for planar rectangle reconstruction.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete rectangle detector, hit-tester or renderer: it only
//! knows how to move points between normalized detector space and display
//! space, how to do the 3D vector math the reconstruction needs, and how a
//! world point lands on the display.

mod camera;
mod coords;
mod geometry;
mod logger;
mod roi;
pub mod vector;

pub use camera::{PinholeCamera, Projector, Ray};
pub use coords::{
    from_display_point, from_display_rect, to_display_point, to_display_rect, DisplayFrame,
    DisplayOrientation,
};
pub use geometry::{Rect2, Size2};
pub use roi::expand_rect;

pub use logger::{init_logging, installed, LogConfig, LoggerError, WORKSPACE_TARGETS};

pub use nalgebra::{Point2, Vector3};
