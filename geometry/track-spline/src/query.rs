//! Distance queries against a built [`PathTable`].
//!
//! Given a previously traveled distance, a speed, and a time step, a query
//! wraps the new distance into one lap, brackets it between two samples with
//! a binary search, refines the local curve parameter, and re-evaluates the
//! curve there. Positions are therefore continuous between samples rather
//! than snapping to the nearest one.
//!
//! Queries only read the table, so travelers can be advanced in parallel.

use crate::{Curve, Heading, PathError, PathTable, Result, Sample};
use nalgebra::Point3;
use rayon::prelude::*;
use tracing::{trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a distance falls on the path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathLocation {
    /// Distance wrapped into `[0, total_length)`.
    pub distance: f64,
    /// Segment the distance falls on.
    pub segment: usize,
    /// Refined local parameter within the segment.
    pub t: f64,
}

/// Position and facing of a traveler after a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPose {
    /// Updated traveled distance, wrapped into `[0, total_length)`.
    pub distance: f64,
    /// Position on the curve.
    pub position: Point3<f64>,
    /// Facing along the curve tangent.
    pub heading: Heading,
    /// Segment the traveler is on.
    pub segment: usize,
    /// Local parameter within the segment.
    pub t: f64,
}

/// Input for one traveler in a batched advance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TravelQuery {
    /// Distance covered before this step.
    pub prior_distance: f64,
    /// Speed along the path; negative travels backward.
    pub speed: f64,
}

impl TravelQuery {
    /// Create a travel query.
    #[must_use]
    pub const fn new(prior_distance: f64, speed: f64) -> Self {
        Self {
            prior_distance,
            speed,
        }
    }
}

/// Wrap a distance into `[0, total)` with a true modulo.
///
/// Negative distances wrap from the end of the path.
///
/// # Example
///
/// ```
/// use track_spline::wrap_distance;
///
/// assert_eq!(wrap_distance(12.0, 10.0), 2.0);
/// assert_eq!(wrap_distance(-1.0, 10.0), 9.0);
/// ```
#[must_use]
pub fn wrap_distance(distance: f64, total: f64) -> f64 {
    let wrapped = distance.rem_euclid(total);
    // rem_euclid can round up to `total` for tiny negative inputs
    if wrapped >= total { 0.0 } else { wrapped }
}

impl PathTable {
    /// Find the segment and local parameter for an absolute distance.
    ///
    /// The distance is wrapped into one lap first.
    ///
    /// # Errors
    ///
    /// - [`PathError::NonFiniteDistance`] if `distance` is NaN or infinite
    /// - [`PathError::DegeneratePath`] if the table has no length
    pub fn locate(&self, distance: f64) -> Result<PathLocation> {
        let total = self.total_length();
        if !distance.is_finite() {
            return Err(PathError::NonFiniteDistance(distance));
        }
        let samples = self.samples();
        let Some(end) = samples.last() else {
            return Err(PathError::degenerate_path(total));
        };
        if total <= 0.0 {
            return Err(PathError::degenerate_path(total));
        }

        let distance = wrap_distance(distance, total);

        // First sample at or past the distance
        let low = samples
            .partition_point(|s| s.cumulative_length < distance)
            .min(samples.len() - 1);
        let second = samples[low];

        // Before the first sample, the end of the table stands in for distance zero
        let first = if low > 0 {
            samples[low - 1]
        } else {
            Sample {
                cumulative_length: 0.0,
                segment: 0,
                t: 0.0,
                position: end.position,
            }
        };

        let span = second.cumulative_length - first.cumulative_length;
        let scaler = if span > 0.0 {
            ((distance - first.cumulative_length) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        // The end of the previous segment is t = 0 of this one
        let first_t = if first.segment == second.segment {
            first.t
        } else {
            first.t.fract()
        };
        let t = first_t + scaler * (second.t - first_t);

        trace!(
            distance,
            low,
            first_cumulative = first.cumulative_length,
            second_cumulative = second.cumulative_length,
            segment = second.segment,
            t,
            "Located distance"
        );

        Ok(PathLocation {
            distance,
            segment: second.segment,
            t,
        })
    }

    /// Position on the curve at an absolute distance.
    ///
    /// Unlike [`Self::pose_at`] this never fails on a degenerate tangent.
    ///
    /// # Errors
    ///
    /// See [`Self::locate`].
    pub fn position_at(&self, distance: f64) -> Result<Point3<f64>> {
        let location = self.locate(distance)?;
        let curve = self.curve(location.segment);
        Ok(self.plane().pin(curve.point_at(location.t)))
    }

    /// Full pose at an absolute distance.
    ///
    /// # Errors
    ///
    /// - [`PathError::DegenerateTangent`] if the tangent there cannot be normalized
    /// - see [`Self::locate`] for the rest
    pub fn pose_at(&self, distance: f64) -> Result<PathPose> {
        let location = self.locate(distance)?;
        let plane = self.plane();
        let curve = self.curve(location.segment);

        let position = plane.pin(curve.point_at(location.t));
        let tangent = plane.level(curve.derivative_at(location.t));

        let Some(heading) =
            Heading::from_tangent(tangent, plane.up_vector(), self.config().tangent_epsilon)
        else {
            warn!(
                segment = location.segment,
                t = location.t,
                "Degenerate tangent, cannot orient traveler"
            );
            return Err(PathError::degenerate_tangent(location.segment, location.t));
        };

        trace!(
            distance = location.distance,
            x = position.x,
            y = position.y,
            z = position.z,
            "Evaluated pose"
        );

        Ok(PathPose {
            distance: location.distance,
            position,
            heading,
            segment: location.segment,
            t: location.t,
        })
    }

    /// Advance a traveler by `speed × delta_time` from `prior_distance`.
    ///
    /// The returned distance is wrapped into `[0, total_length)`; store it and
    /// pass it back as `prior_distance` on the next step.
    ///
    /// # Errors
    ///
    /// - [`PathError::NonFiniteDistance`] if the new distance is NaN or infinite
    /// - [`PathError::DegenerateTangent`] if the tangent cannot be normalized
    ///
    /// # Example
    ///
    /// ```
    /// use track_spline::PathTable;
    /// use nalgebra::Point3;
    ///
    /// let table = PathTable::open(&[Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)], 8)
    ///     .expect("valid path");
    ///
    /// let pose = table.advance(2.0, 1.5, 2.0).expect("well-defined tangent");
    /// assert!((pose.distance - 5.0).abs() < 1e-9);
    /// assert!((pose.position.x - 5.0).abs() < 1e-9);
    /// ```
    pub fn advance(&self, prior_distance: f64, speed: f64, delta_time: f64) -> Result<PathPose> {
        self.pose_at(prior_distance + speed * delta_time)
    }

    /// Advance many independent travelers in parallel.
    ///
    /// Results are returned in the same order as `queries`. A failed query
    /// does not affect the others.
    pub fn advance_batch(&self, queries: &[TravelQuery], delta_time: f64) -> Vec<Result<PathPose>> {
        queries
            .par_iter()
            .map(|q| self.advance(q.prior_distance, q.speed, delta_time))
            .collect()
    }
}

/// Per-entity traversal state: the distance covered so far.
///
/// The state only changes when a query succeeds, so a traveler that hits a
/// degenerate spot keeps its last good distance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Traveler {
    distance: f64,
}

impl Traveler {
    /// A traveler at the start of the path.
    #[must_use]
    pub const fn new() -> Self {
        Self { distance: 0.0 }
    }

    /// A traveler that has already covered `distance`.
    #[must_use]
    pub const fn at(distance: f64) -> Self {
        Self { distance }
    }

    /// Distance covered so far.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Advance along `table` and commit the new distance on success.
    ///
    /// # Errors
    ///
    /// See [`PathTable::advance`]. On error the stored distance is unchanged.
    pub fn advance(&mut self, table: &PathTable, speed: f64, delta_time: f64) -> Result<PathPose> {
        let pose = table.advance(self.distance, speed, delta_time)?;
        self.distance = pose.distance;
        Ok(pose)
    }
}
