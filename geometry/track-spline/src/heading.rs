//! Facing direction of a traveler on the path.
//!
//! A [`Heading`] is a right-handed orientation whose forward axis follows the
//! curve tangent and whose up axis stays as close as possible to world up.

use crate::UpAxis;
use nalgebra::{UnitQuaternion, Vector3};

/// Orientation of a traveler.
///
/// The local frame of [`Self::rotation`] maps:
/// - local +Z to [`Self::forward`] (the normalized tangent)
/// - local +Y to [`Self::up`] (world up, orthonormalized against forward)
/// - local +X to [`Self::lateral`] (`up × forward`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    rotation: UnitQuaternion<f64>,
    forward: Vector3<f64>,
}

impl Heading {
    /// Build a heading that looks along `tangent` with `up` as world up.
    ///
    /// Returns `None` when the tangent is shorter than `epsilon` or nearly
    /// parallel to `up`; neither case has a well-defined orientation.
    ///
    /// # Example
    ///
    /// ```
    /// use track_spline::Heading;
    /// use nalgebra::Vector3;
    ///
    /// let heading = Heading::from_tangent(Vector3::new(2.0, 0.0, 0.0), Vector3::z(), 1e-9)
    ///     .expect("tangent is well defined");
    /// assert!((heading.forward() - Vector3::x()).norm() < 1e-12);
    ///
    /// assert!(Heading::from_tangent(Vector3::zeros(), Vector3::z(), 1e-9).is_none());
    /// ```
    #[must_use]
    pub fn from_tangent(tangent: Vector3<f64>, up: Vector3<f64>, epsilon: f64) -> Option<Self> {
        let norm = tangent.norm();
        if !norm.is_finite() || norm < epsilon {
            return None;
        }
        let forward = tangent / norm;

        // Looking straight up or down leaves the roll undefined
        if forward.cross(&up).norm() < epsilon {
            return None;
        }

        let rotation = UnitQuaternion::face_towards(&forward, &up);
        Some(Self { rotation, forward })
    }

    /// The orientation as a unit quaternion.
    #[must_use]
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        self.rotation
    }

    /// Unit vector along the direction of travel.
    #[must_use]
    pub fn forward(&self) -> Vector3<f64> {
        self.forward
    }

    /// Unit up vector of the traveler.
    #[must_use]
    pub fn up(&self) -> Vector3<f64> {
        self.rotation * Vector3::y()
    }

    /// Unit sideways vector (`up × forward`).
    #[must_use]
    pub fn lateral(&self) -> Vector3<f64> {
        self.rotation * Vector3::x()
    }

    /// Signed angle of the forward direction about the world-up axis.
    ///
    /// Measured in radians from [`UpAxis::yaw_reference`] toward
    /// [`UpAxis::yaw_side`], in `(−π, π]`.
    #[must_use]
    pub fn yaw(&self, axis: UpAxis) -> f64 {
        let along = self.forward.dot(&axis.yaw_reference());
        let across = self.forward.dot(&axis.yaw_side());
        across.atan2(along)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_forward_maps_local_z() {
        let tangent = Vector3::new(1.0, 1.0, 0.0);
        let heading = Heading::from_tangent(tangent, Vector3::z(), 1e-9).unwrap();

        assert_relative_eq!(heading.forward(), tangent.normalize(), epsilon = 1e-12);
        assert_relative_eq!(
            heading.rotation() * Vector3::z(),
            tangent.normalize(),
            epsilon = 1e-12
        );
        assert_relative_eq!(heading.up(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_frame_is_right_handed() {
        let heading =
            Heading::from_tangent(Vector3::new(0.3, -2.0, 0.5), Vector3::z(), 1e-9).unwrap();

        let x = heading.lateral();
        let y = heading.up();
        let z = heading.forward();
        assert_relative_eq!(x.cross(&y), z, epsilon = 1e-10);
        assert_relative_eq!(x.dot(&z), 0.0, epsilon = 1e-10);
        assert_relative_eq!(y.dot(&z), 0.0, epsilon = 1e-10);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_yaw() {
        let east = Heading::from_tangent(Vector3::x(), Vector3::z(), 1e-9).unwrap();
        assert_relative_eq!(east.yaw(UpAxis::Z), 0.0, epsilon = 1e-12);

        let north = Heading::from_tangent(Vector3::y(), Vector3::z(), 1e-9).unwrap();
        assert_relative_eq!(north.yaw(UpAxis::Z), FRAC_PI_2, epsilon = 1e-12);

        // Y-up worlds measure yaw from +Z toward +X
        let right = Heading::from_tangent(Vector3::x(), Vector3::y(), 1e-9).unwrap();
        assert_relative_eq!(right.yaw(UpAxis::Y), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_tangents() {
        assert!(Heading::from_tangent(Vector3::zeros(), Vector3::z(), 1e-9).is_none());
        assert!(Heading::from_tangent(Vector3::new(0.0, 0.0, 3.0), Vector3::z(), 1e-9).is_none());
        assert!(
            Heading::from_tangent(Vector3::new(f64::NAN, 0.0, 0.0), Vector3::z(), 1e-9).is_none()
        );
    }
}
