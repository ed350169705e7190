//! Uniform Catmull-Rom curve evaluation.
//!
//! A Catmull-Rom segment interpolates between two control points `p0` and
//! `p1`, taking its end tangents from the neighbors `prev` and `next`.
//!
//! # Equation
//!
//! ```text
//! P(t) = ½ [ 2p0
//!          + (−prev + p1) t
//!          + (2prev − 5p0 + 4p1 − next) t²
//!          + (−prev + 3p0 − 3p1 + next) t³ ]
//! ```

use crate::Curve;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One Catmull-Rom segment: the curve from `p0` to `p1`.
///
/// # Example
///
/// ```
/// use track_spline::{CatmullRomSegment, Curve};
/// use nalgebra::Point3;
///
/// let segment = CatmullRomSegment::new(
///     Point3::new(-1.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
/// );
///
/// // Evenly spaced collinear points give a straight, uniformly parameterized segment
/// let mid = segment.point_at(0.5);
/// assert!((mid.x - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatmullRomSegment {
    /// Neighbor before the start point.
    pub prev: Point3<f64>,
    /// Start point (`t = 0`).
    pub p0: Point3<f64>,
    /// End point (`t = 1`).
    pub p1: Point3<f64>,
    /// Neighbor after the end point.
    pub next: Point3<f64>,
}

impl CatmullRomSegment {
    /// Create a segment from its four control points.
    #[must_use]
    pub const fn new(
        prev: Point3<f64>,
        p0: Point3<f64>,
        p1: Point3<f64>,
        next: Point3<f64>,
    ) -> Self {
        Self {
            prev,
            p0,
            p1,
            next,
        }
    }

    /// Get the control points as an array, in `[prev, p0, p1, next]` order.
    #[must_use]
    pub fn control_points(&self) -> [Point3<f64>; 4] {
        [self.prev, self.p0, self.p1, self.next]
    }
}

impl Curve for CatmullRomSegment {
    fn point_at(&self, t: f64) -> Point3<f64> {
        catmull_rom_point(self.prev, self.p0, self.p1, self.next, t)
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        catmull_rom_tangent(self.prev, self.p0, self.p1, self.next, t)
    }
}

/// Evaluate a uniform Catmull-Rom segment at `t`.
///
/// `t = 0` yields `p0` and `t = 1` yields `p1`. Every axis is interpolated
/// independently.
#[must_use]
pub fn catmull_rom_point(
    prev: Point3<f64>,
    p0: Point3<f64>,
    p1: Point3<f64>,
    next: Point3<f64>,
    t: f64,
) -> Point3<f64> {
    let t2 = t * t;
    let t3 = t2 * t;
    let (a, b, c, d) = (prev.coords, p0.coords, p1.coords, next.coords);

    let coords = (b * 2.0
        + (c - a) * t
        + (a * 2.0 - b * 5.0 + c * 4.0 - d) * t2
        + (-a + b * 3.0 - c * 3.0 + d) * t3)
        * 0.5;

    Point3::from(coords)
}

/// Closed-form derivative of [`catmull_rom_point`] with respect to `t`.
///
/// The result is not normalized and can be zero on degenerate input
/// (coincident or symmetric control points).
#[must_use]
pub fn catmull_rom_tangent(
    prev: Point3<f64>,
    p0: Point3<f64>,
    p1: Point3<f64>,
    next: Point3<f64>,
    t: f64,
) -> Vector3<f64> {
    let t2 = t * t;
    let (a, b, c, d) = (prev.coords, p0.coords, p1.coords, next.coords);

    ((c - a) + (a * 2.0 - b * 5.0 + c * 4.0 - d) * (2.0 * t)
        + (-a + b * 3.0 - c * 3.0 + d) * (3.0 * t2))
        * 0.5
}

/// Reflect `neighbor` through `endpoint`.
///
/// Used to synthesize the phantom neighbor at each end of an open path.
#[must_use]
pub fn mirror_point(endpoint: Point3<f64>, neighbor: Point3<f64>) -> Point3<f64> {
    endpoint - (neighbor - endpoint)
}
