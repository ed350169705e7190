//! Core curve trait.

use nalgebra::{Point3, Vector3};

/// A parametric curve piece evaluated over a local parameter `t ∈ [0, 1]`.
///
/// `t = 0` is the start of the piece and `t = 1` its end. Implementors must
/// be pure: evaluating the same `t` twice returns the same result.
pub trait Curve {
    /// Evaluate the position at parameter `t`.
    fn point_at(&self, t: f64) -> Point3<f64>;

    /// Compute the first derivative (velocity) at parameter `t`.
    ///
    /// This is the non-normalized derivative, which encodes both direction
    /// and parametric speed. It may be zero on degenerate curves.
    fn derivative_at(&self, t: f64) -> Vector3<f64>;

    /// Compute the unit tangent at parameter `t`.
    ///
    /// Returns `None` when the derivative is shorter than `epsilon`, so that
    /// callers never normalize a zero vector into NaN.
    fn unit_tangent_at(&self, t: f64, epsilon: f64) -> Option<Vector3<f64>> {
        let d = self.derivative_at(t);
        let norm = d.norm();
        if norm.is_finite() && norm >= epsilon {
            Some(d / norm)
        } else {
            None
        }
    }
}
