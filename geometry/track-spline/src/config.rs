//! Configuration for building path tables.
//!
//! This module provides [`PathConfig`] for controlling sample density,
//! looping, and the plane of travel, and [`GroundPlane`] for describing which
//! axis is vertical.
//!
//! # Presets
//!
//! - [`PathConfig::default()`] - Open path, 10 samples per segment, Z up
//! - [`PathConfig::looping()`] - Closed loop with the given density
//! - [`PathConfig::open()`] - Open path with the given density
//! - [`PathConfig::preview()`] - Coarse sampling for editor previews
//! - [`PathConfig::precise()`] - Dense sampling for accurate arc lengths
//!
//! # Example
//!
//! ```
//! use track_spline::{GroundPlane, PathConfig};
//!
//! // A looping race track lying on the Y-up ground plane at height 0
//! let config = PathConfig::looping(20).with_plane(GroundPlane::y_up().with_height(0.0));
//! assert!(config.validate().is_ok());
//! ```

use crate::{PathError, Result};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The world axis treated as vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UpAxis {
    /// Y is up; travel happens in the XZ plane.
    Y,
    /// Z is up; travel happens in the XY plane.
    #[default]
    Z,
}

impl UpAxis {
    /// Index of this axis in a 3-vector.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Unit vector along this axis.
    #[must_use]
    pub fn unit(self) -> Vector3<f64> {
        match self {
            Self::Y => Vector3::y(),
            Self::Z => Vector3::z(),
        }
    }

    /// In-plane reference direction that yaw is measured from.
    ///
    /// Positive yaw turns from this axis toward [`Self::yaw_side`].
    #[must_use]
    pub fn yaw_reference(self) -> Vector3<f64> {
        match self {
            Self::Y => Vector3::z(),
            Self::Z => Vector3::x(),
        }
    }

    /// In-plane direction a quarter turn (right-handed about up) from
    /// [`Self::yaw_reference`].
    #[must_use]
    pub fn yaw_side(self) -> Vector3<f64> {
        self.unit().cross(&self.yaw_reference())
    }
}

/// The plane entities travel in.
///
/// Arc length is measured in this plane, ignoring the vertical component.
/// When `height` is set, every evaluated position is pinned to that height
/// and headings stay level.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroundPlane {
    /// Vertical axis.
    pub up: UpAxis,
    /// Fixed vertical coordinate for evaluated positions, if any.
    pub height: Option<f64>,
}

impl GroundPlane {
    /// Ground plane with Y up and no pinned height.
    #[must_use]
    pub const fn y_up() -> Self {
        Self {
            up: UpAxis::Y,
            height: None,
        }
    }

    /// Ground plane with Z up and no pinned height.
    #[must_use]
    pub const fn z_up() -> Self {
        Self {
            up: UpAxis::Z,
            height: None,
        }
    }

    /// Pin evaluated positions to a fixed height.
    #[must_use]
    pub const fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// World-up unit vector.
    #[must_use]
    pub fn up_vector(&self) -> Vector3<f64> {
        self.up.unit()
    }

    /// Remove the vertical component of a vector.
    #[must_use]
    pub fn project(&self, v: Vector3<f64>) -> Vector3<f64> {
        let mut projected = v;
        projected[self.up.index()] = 0.0;
        projected
    }

    /// Length of a vector measured in the plane of travel.
    #[must_use]
    pub fn planar_length(&self, v: Vector3<f64>) -> f64 {
        self.project(v).norm()
    }

    /// Replace the vertical coordinate with the pinned height, if one is set.
    #[must_use]
    pub fn pin(&self, p: Point3<f64>) -> Point3<f64> {
        match self.height {
            Some(h) => {
                let mut pinned = p;
                pinned[self.up.index()] = h;
                pinned
            }
            None => p,
        }
    }

    /// Flatten a direction when the height is pinned; leave it alone otherwise.
    #[must_use]
    pub fn level(&self, v: Vector3<f64>) -> Vector3<f64> {
        if self.height.is_some() {
            self.project(v)
        } else {
            v
        }
    }
}

/// Configuration for building a [`PathTable`](crate::PathTable).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathConfig {
    /// Number of chord samples per segment.
    /// Higher values make the arc-length estimate more accurate.
    pub samples_per_segment: usize,

    /// Whether the last control point connects back to the first.
    pub looping: bool,

    /// Plane of travel.
    pub plane: GroundPlane,

    /// Tangents shorter than this are treated as degenerate when building
    /// headings.
    pub tangent_epsilon: f64,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            samples_per_segment: 10,
            looping: false,
            plane: GroundPlane::default(),
            tangent_epsilon: 1e-9,
        }
    }
}

impl PathConfig {
    /// Closed loop with the given sample density.
    #[must_use]
    pub fn looping(samples_per_segment: usize) -> Self {
        Self {
            samples_per_segment,
            looping: true,
            ..Self::default()
        }
    }

    /// Open path with the given sample density.
    #[must_use]
    pub fn open(samples_per_segment: usize) -> Self {
        Self {
            samples_per_segment,
            looping: false,
            ..Self::default()
        }
    }

    /// Coarse sampling, good enough for drawing a preview of the path.
    #[must_use]
    pub fn preview() -> Self {
        Self {
            samples_per_segment: 4,
            ..Self::default()
        }
    }

    /// Dense sampling for accurate arc lengths on tight curves.
    #[must_use]
    pub fn precise() -> Self {
        Self {
            samples_per_segment: 64,
            ..Self::default()
        }
    }

    /// Set the number of samples per segment.
    #[must_use]
    pub const fn with_samples_per_segment(mut self, samples: usize) -> Self {
        self.samples_per_segment = samples;
        self
    }

    /// Set whether the path loops.
    #[must_use]
    pub const fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set the plane of travel.
    #[must_use]
    pub const fn with_plane(mut self, plane: GroundPlane) -> Self {
        self.plane = plane;
        self
    }

    /// Set the degenerate-tangent threshold.
    #[must_use]
    pub const fn with_tangent_epsilon(mut self, epsilon: f64) -> Self {
        self.tangent_epsilon = epsilon;
        self
    }

    /// Check that the configuration can build a table.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidSampleDensity`] if `samples_per_segment` is 0.
    pub fn validate(&self) -> Result<()> {
        if self.samples_per_segment < 1 {
            return Err(PathError::InvalidSampleDensity(self.samples_per_segment));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = PathConfig::default();
        assert_eq!(config.samples_per_segment, 10);
        assert!(!config.looping);
        assert_eq!(config.plane.up, UpAxis::Z);
        assert!(config.plane.height.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert!(PathConfig::looping(5).looping);
        assert!(!PathConfig::open(5).looping);
        assert!(PathConfig::preview().samples_per_segment < PathConfig::precise().samples_per_segment);
    }

    #[test]
    fn test_zero_density_rejected() {
        let config = PathConfig::default().with_samples_per_segment(0);
        assert_eq!(config.validate(), Err(PathError::InvalidSampleDensity(0)));
    }

    #[test]
    fn test_project_and_pin_y_up() {
        let plane = GroundPlane::y_up().with_height(2.0);
        let v = plane.project(Vector3::new(3.0, 7.0, 4.0));
        assert_relative_eq!(v, Vector3::new(3.0, 0.0, 4.0), epsilon = 1e-12);
        assert_relative_eq!(plane.planar_length(Vector3::new(3.0, 7.0, 4.0)), 5.0, epsilon = 1e-12);

        let p = plane.pin(Point3::new(1.0, -9.0, 1.0));
        assert_relative_eq!(p, Point3::new(1.0, 2.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_unpinned_plane_keeps_positions() {
        let plane = GroundPlane::z_up();
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(plane.pin(p), p);
        assert_eq!(plane.level(Vector3::new(0.0, 1.0, 1.0)), Vector3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_yaw_axes_are_right_handed() {
        for axis in [UpAxis::Y, UpAxis::Z] {
            let side = axis.yaw_side();
            assert_relative_eq!(side.dot(&axis.unit()), 0.0, epsilon = 1e-12);
            assert_relative_eq!(side.dot(&axis.yaw_reference()), 0.0, epsilon = 1e-12);
            assert_relative_eq!(side.norm(), 1.0, epsilon = 1e-12);
        }
    }
}
