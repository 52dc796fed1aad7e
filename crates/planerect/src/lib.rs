//! High-level facade crate for the `planerect-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying crates
//! - [`run::reconstruct_scene`], the load / screen / detect / report sequence
//!   behind the `planerect` binary
//!
//! ## Quickstart
//!
//! ```no_run
//! use planerect::run::reconstruct_scene;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = reconstruct_scene("scene.json")?;
//! match &report.rectangle {
//!     Some(r) => println!("{:.2} x {:.2} m", r.size.width, r.size.height),
//!     None => println!("no plane: {}", report.error.as_deref().unwrap_or("?")),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `planerect::core`: display-space conversions, region expansion, vector
//!   math, the `Projector` seam and a pinhole camera.
//! - `planerect::plane`: corner matching, geometry reconstruction, the
//!   detector, observation handling and JSON scene IO.

pub use planerect_core as core;
pub use planerect_plane as plane;

pub use planerect_core::{DisplayFrame, DisplayOrientation, PinholeCamera, Projector};
pub use planerect_plane::{
    CornerCandidates, PlaneRectError, PlaneRectParams, PlaneRectangle, PlaneRectangleDetection,
    PlaneRectangleDetector, RectangleObservation,
};

pub mod run;
