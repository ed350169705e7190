//! Arc-length-parameterized Catmull-Rom paths for moving entities.
//!
//! This crate turns a list of control points into a smooth path that
//! travelers can move along at a given speed, and answers the per-tick query
//! "where am I, and which way am I facing, after covering this much distance?"
//!
//! - [`CatmullRomSegment`] - Four-point uniform Catmull-Rom evaluation
//! - [`PathTable`] - Precomputed arc-length samples for an open or looping path
//! - [`PathTable::advance`] - Distance query: new distance, position, heading
//! - [`Traveler`] - Per-entity distance state that commits on successful queries
//! - [`Heading`] - Right-handed orientation along the tangent
//!
//! # Example
//!
//! ```
//! use track_spline::{PathTable, Traveler};
//! use nalgebra::Point3;
//!
//! let track = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//!     Point3::new(10.0, 10.0, 0.0),
//!     Point3::new(0.0, 10.0, 0.0),
//! ];
//! let table = PathTable::looping(&track, 20).expect("valid track");
//!
//! let mut racer = Traveler::new();
//! for _ in 0..60 {
//!     let pose = racer.advance(&table, 4.0, 1.0 / 60.0).expect("smooth track");
//!     assert!(pose.distance < table.total_length());
//! }
//! assert!((racer.distance() - 4.0).abs() < 1e-9);
//! ```
//!
//! # How Queries Work
//!
//! A build samples every segment at evenly spaced `t` and accumulates chord
//! lengths in the plane of travel. A query wraps the traveled distance into
//! one lap, binary-searches the cumulative column for the bracketing pair of
//! samples, interpolates the local parameter between them, and re-evaluates
//! the curve there. Queries never allocate and only read the table, so any
//! number of travelers can share one table across threads.
//!
//! # Coordinate System
//!
//! The plane of travel is described by a [`GroundPlane`]. The default is the
//! right-handed Z-up convention used across this workspace:
//!
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down)
//!
//! Y-up scenes use [`GroundPlane::y_up`].
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for configuration and
//!   sample types

#![doc(html_root_url = "https://docs.rs/track-spline/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::suboptimal_flops,
    clippy::missing_const_for_fn,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]

mod catmull_rom;
mod config;
mod error;
mod heading;
mod query;
mod table;
mod traits;

pub use catmull_rom::{CatmullRomSegment, catmull_rom_point, catmull_rom_tangent, mirror_point};
pub use config::{GroundPlane, PathConfig, UpAxis};
pub use error::PathError;
pub use heading::Heading;
pub use query::{PathLocation, PathPose, TravelQuery, Traveler, wrap_distance};
pub use table::{MIN_CONTROL_POINTS, PathTable, Sample, wrap_index};
pub use traits::Curve;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Result type for path operations.
pub type Result<T> = std::result::Result<T, PathError>;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Evenly spaced collinear points give an exactly uniform open path.
    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_open_straight_run() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ];
        let open = PathTable::open(&points, 16).unwrap();
        assert_relative_eq!(open.total_length(), 3.0, epsilon = 1e-12);

        let pose = open.advance(1.0, 0.5, 1.0).unwrap();
        assert_relative_eq!(pose.position, Point3::new(1.5, 0.0, 0.0), epsilon = 1e-12);
        assert_eq!(pose.segment, 1);
        assert_relative_eq!(pose.heading.yaw(UpAxis::Z), 0.0, epsilon = 1e-12);
    }

    /// A pose's heading points the way the position moves.
    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_heading_matches_motion() {
        let table = PathTable::looping(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 1.0, 0.0),
                Point3::new(5.0, 5.0, 0.0),
                Point3::new(-1.0, 3.0, 0.0),
            ],
            32,
        )
        .unwrap();

        let h = 1e-4;
        for i in 1..20 {
            let d = table.total_length() * f64::from(i) / 20.0;
            let pose = table.pose_at(d).unwrap();
            let ahead = table.position_at(d + h).unwrap();
            let behind = table.position_at(d - h).unwrap();
            let motion = (ahead - behind).normalize();
            assert!(motion.dot(&pose.heading.forward()) > 0.99);
        }
    }

    /// Rebuilding at a different density keeps a stored distance meaningful.
    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_distance_survives_rebuild() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(6.0, 0.0, 0.0),
            Point3::new(6.0, 6.0, 0.0),
            Point3::new(0.0, 6.0, 0.0),
        ];
        let coarse = PathTable::looping(&points, 8).unwrap();
        let fine = PathTable::looping(&points, 64).unwrap();

        let mut traveler = Traveler::new();
        traveler.advance(&coarse, 5.0, 1.0).unwrap();

        let a = coarse.position_at(traveler.distance()).unwrap();
        let b = fine.position_at(traveler.distance()).unwrap();
        assert!((a - b).norm() < 0.05);
    }
}
